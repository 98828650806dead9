//! Filepath: src/core/canonical.rs
//! Canonical-entry text normalization. Every entry that reaches the
//! sorter must be a single line with single-space separation; functions
//! contribute their signature only, never the body.

use crate::core::classify::BlockKeyword;

/// Collapse every whitespace run to a single space and drop
/// leading/trailing whitespace. Newlines count as whitespace, so a
/// multi-line declaration flattens to one line.
pub fn normalize_ws(s: &str) -> String
{
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Slice a function declaration down to its signature: everything up
/// to the byte where the body block begins. Declarations without a
/// body (assembly-backed) keep their full text.
pub fn signature_of(
    text: &str,
    body_offset: Option<usize>,
) -> &str
{
    match body_offset
    {
        Some(off) => text
            .get(..off)
            .unwrap_or(text)
            .trim_end(),
        None => text.trim_end(),
    }
}

/// Canonical entry for a function or method declaration.
pub fn function_entry(
    text: &str,
    body_offset: Option<usize>,
) -> String
{
    normalize_ws(signature_of(text, body_offset))
}

/// Canonical entry for one member of a grouped declaration. The
/// member text carries no keyword of its own, so the block's keyword
/// is prefixed here.
pub fn member_entry(
    keyword: BlockKeyword,
    text: &str,
) -> String
{
    format!("{} {}", keyword.as_str(), normalize_ws(text))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn whitespace_collapses_to_single_spaces()
    {
        assert_eq!(normalize_ws("  const   Bar \t=  1 "), "const Bar = 1");
        assert_eq!(normalize_ws("A =\n\t1"), "A = 1");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn normalization_is_idempotent()
    {
        let once = normalize_ws("  a \n b\t\tc ");
        assert_eq!(normalize_ws(&once), once);
    }

    #[test]
    fn signature_stops_at_body()
    {
        let text = "func Foo(x int) string {\n\treturn \"\"\n}";
        let off = text.find('{');
        assert_eq!(signature_of(text, off), "func Foo(x int) string");
    }

    #[test]
    fn multiline_signature_flattens_to_one_line()
    {
        let text = "func Join(\n\ta string,\n\tb string,\n) (string, error) {\n\treturn a + b, nil\n}";
        let off = text.rfind("{\n\treturn");
        let entry = function_entry(text, off);
        assert_eq!(entry, "func Join( a string, b string, ) (string, error)");
        assert!(!entry.contains('\n'));
    }

    #[test]
    fn bodyless_declaration_keeps_full_text()
    {
        assert_eq!(
            signature_of("func Add(a, b int) int\n", None),
            "func Add(a, b int) int"
        );
    }

    #[test]
    fn member_entries_are_keyword_prefixed()
    {
        assert_eq!(
            member_entry(BlockKeyword::Const, "A  = 1"),
            "const A = 1"
        );
        assert_eq!(
            member_entry(BlockKeyword::Type, "Pair struct {\n\tX int\n}"),
            "type Pair struct { X int }"
        );
    }
}
