//! Filepath: src/core/classify.rs
//! Declaration model and classification. The parser hands over one
//! `Declaration` per top-level syntactic unit; the export filter
//! reduces that list to public API elements as a pure function; the
//! classifier renders what is left into canonical entry strings.

use crate::core::canonical;

/// Keyword shared by the members of a const/var/type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKeyword
{
    Const,
    Var,
    Type,
}

impl BlockKeyword
{
    pub fn as_str(self) -> &'static str
    {
        match self
        {
            BlockKeyword::Const => "const",
            BlockKeyword::Var => "var",
            BlockKeyword::Type => "type",
        }
    }
}

/// One member of a grouped declaration
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMember
{
    /// Identifiers declared by this member (`a, B = 1, 2` has two)
    pub names: Vec<String>,

    /// Member text as it appears in the source, keyword-free
    pub text: String,
}

/// One top-level syntactic unit of a source file
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration
{
    /// Function or method declaration
    Function
    {
        /// Declared name (methods use the method name, not the receiver)
        name: String,

        /// Full declaration text, body included
        text: String,

        /// Byte offset of the body block within `text`; None when the
        /// declaration has no body
        body_offset: Option<usize>,
    },

    /// Parenthesized const/var/type block
    Block
    {
        keyword: BlockKeyword,
        members: Vec<BlockMember>,
    },

    /// Non-grouped const/var/type declaration; `text` carries the keyword
    Single
    {
        keyword: BlockKeyword,
        names: Vec<String>,
        text: String,
    },

    /// Import declaration; quoted path strings
    Import
    {
        paths: Vec<String>
    },
}

/// Go export convention: the identifier's first character is an
/// uppercase letter.
pub fn is_exported(name: &str) -> bool
{
    name.chars()
        .next()
        .is_some_and(char::is_uppercase)
}

/// Visibility gate in front of the classifier
pub struct ExportFilter;

impl ExportFilter
{
    /// Produce a new list containing only exported declarations.
    /// Grouped blocks are filtered per member and disappear entirely
    /// when no member survives. A multi-name member is kept when any
    /// of its names is exported. Imports pass through untouched; they
    /// never reach the hash input.
    pub fn retain_exported(decls: Vec<Declaration>) -> Vec<Declaration>
    {
        decls
            .into_iter()
            .filter_map(|decl| match decl
            {
                Declaration::Function { name, text, body_offset } => is_exported(&name)
                    .then(|| Declaration::Function { name, text, body_offset }),

                Declaration::Block { keyword, members } =>
                {
                    let kept: Vec<BlockMember> = members
                        .into_iter()
                        .filter(|m| {
                            m.names
                                .iter()
                                .any(|n| is_exported(n))
                        })
                        .collect();

                    (!kept.is_empty()).then(|| Declaration::Block { keyword, members: kept })
                }

                Declaration::Single { keyword, names, text } =>
                {
                    let any_exported = names
                        .iter()
                        .any(|n| is_exported(n));

                    any_exported.then(|| Declaration::Single { keyword, names, text })
                }

                imports @ Declaration::Import { .. } => Some(imports),
            })
            .collect()
    }
}

/// Entries and import paths rendered from one file's declarations
#[derive(Debug, Default, Clone)]
pub struct ClassifiedFile
{
    /// Canonical entry strings, unordered at this stage
    pub entries: Vec<String>,

    /// Quoted import paths, reported but never hashed
    pub imports: Vec<String>,
}

/// Renders filtered declarations into canonical entries
pub struct Classifier;

impl Classifier
{
    /// Walk the filtered declarations of one file. Functions keep
    /// their signature only; block members get the block keyword
    /// prefixed; singles already carry theirs.
    pub fn classify(decls: &[Declaration]) -> ClassifiedFile
    {
        let mut out = ClassifiedFile::default();

        for decl in decls
        {
            match decl
            {
                Declaration::Function { text, body_offset, .. } =>
                {
                    out.entries
                        .push(canonical::function_entry(text, *body_offset));
                }

                Declaration::Block { keyword, members } =>
                {
                    for member in members
                    {
                        out.entries
                            .push(canonical::member_entry(*keyword, &member.text));
                    }
                }

                Declaration::Single { text, .. } =>
                {
                    out.entries
                        .push(canonical::normalize_ws(text));
                }

                Declaration::Import { paths } =>
                {
                    out.imports
                        .extend(paths.iter().cloned());
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn member(
        name: &str,
        text: &str,
    ) -> BlockMember
    {
        BlockMember { names: vec![name.to_string()], text: text.to_string() }
    }

    #[test]
    fn export_convention_checks_first_char()
    {
        assert!(is_exported("Foo"));
        assert!(is_exported("Ünicode"));
        assert!(!is_exported("foo"));
        assert!(!is_exported("_Hidden"));
        assert!(!is_exported(""));
    }

    #[test]
    fn filter_drops_unexported_functions()
    {
        let decls = vec![
            Declaration::Function {
                name: "Foo".into(),
                text: "func Foo() {}".into(),
                body_offset: Some(11),
            },
            Declaration::Function {
                name: "baz".into(),
                text: "func baz() {}".into(),
                body_offset: Some(11),
            },
        ];

        let kept = ExportFilter::retain_exported(decls);
        assert_eq!(kept.len(), 1);
        assert!(matches!(&kept[0], Declaration::Function { name, .. } if name == "Foo"));
    }

    #[test]
    fn filter_reduces_blocks_per_member()
    {
        let decls = vec![Declaration::Block {
            keyword: BlockKeyword::Const,
            members: vec![member("A", "A = 1"), member("b", "b = 2"), member("C", "C = 3")],
        }];

        let kept = ExportFilter::retain_exported(decls);
        let Declaration::Block { members, .. } = &kept[0]
        else
        {
            panic!("expected a block");
        };
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].names, vec!["A"]);
        assert_eq!(members[1].names, vec!["C"]);
    }

    #[test]
    fn filter_removes_fully_unexported_blocks()
    {
        let decls = vec![Declaration::Block {
            keyword: BlockKeyword::Var,
            members: vec![member("x", "x = 1"), member("y", "y = 2")],
        }];

        assert!(
            ExportFilter::retain_exported(decls).is_empty()
        );
    }

    #[test]
    fn multi_name_member_kept_when_any_name_exported()
    {
        let decls = vec![Declaration::Single {
            keyword: BlockKeyword::Var,
            names: vec!["a".into(), "B".into()],
            text: "var a, B = 1, 2".into(),
        }];

        let kept = ExportFilter::retain_exported(decls);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn imports_pass_through_the_filter()
    {
        let decls = vec![Declaration::Import { paths: vec!["\"fmt\"".into()] }];
        let kept = ExportFilter::retain_exported(decls);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn block_members_become_exactly_one_entry_each()
    {
        // Three members in, three entries out; boundary lines of the
        // source block can never leak because members are rendered
        // individually.
        let decls = vec![Declaration::Block {
            keyword: BlockKeyword::Const,
            members: vec![member("A", "A = 1"), member("B", "B = 2"), member("C", "C = 3")],
        }];

        let classified = Classifier::classify(&decls);
        assert_eq!(
            classified.entries,
            vec!["const A = 1", "const B = 2", "const C = 3"]
        );
    }

    #[test]
    fn functions_contribute_signature_only()
    {
        let text = "func Foo(x int) string {\n\treturn \"\"\n}";
        let decls = vec![Declaration::Function {
            name: "Foo".into(),
            text: text.into(),
            body_offset: text.find('{'),
        }];

        let classified = Classifier::classify(&decls);
        assert_eq!(classified.entries, vec!["func Foo(x int) string"]);
    }

    #[test]
    fn singles_normalize_to_one_line()
    {
        let decls = vec![Declaration::Single {
            keyword: BlockKeyword::Type,
            names: vec!["Point".into()],
            text: "type Point struct {\n\tX int\n\tY int\n}".into(),
        }];

        let classified = Classifier::classify(&decls);
        assert_eq!(
            classified.entries,
            vec!["type Point struct { X int Y int }"]
        );
    }

    #[test]
    fn imports_are_collected_not_entered()
    {
        let decls = vec![
            Declaration::Import { paths: vec!["\"fmt\"".into(), "\"strings\"".into()] },
        ];

        let classified = Classifier::classify(&decls);
        assert!(classified.entries.is_empty());
        assert_eq!(classified.imports, vec!["\"fmt\"", "\"strings\""]);
    }
}
