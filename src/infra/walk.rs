//! Filepath: src/infra/walk.rs
//! Package-directory source listing.
//! - Non-recursive: a Go package is one directory of .go files
//! - `*_test.go` files never participate in the fingerprint
//! - Extra ignore globs (from config) filter on the relative path
//! - Respects .gitignore the way the rest of the toolchain does
//! - Deterministic (sorted) output for stable logs; the pipeline
//!   re-sorts its entries anyway
//!
//! Backed by ripgrep's `ignore` crate and `globset`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

const GO_EXTENSION: &str = "go";
const TEST_SUFFIX: &str = "_test.go";

/// Lists the source files of a single package directory.
pub struct SourceWalker
{
    /// Compiled set of additional ignore patterns
    ignore_patterns: GlobSet,
}

impl SourceWalker
{
    /// Build a walker with additional ignore patterns (e.g.
    /// "*_generated.go"). Patterns match on paths relative to the
    /// package directory.
    pub fn new(additional_ignores: &[String]) -> Result<Self>
    {
        let mut builder = GlobSetBuilder::new();

        for pattern in additional_ignores
        {
            builder.add(Glob::new(pattern)?);
        }

        Ok(Self { ignore_patterns: builder.build()? })
    }

    /// All non-test .go files directly inside `dir`, sorted.
    /// Subdirectories are separate packages and are never entered.
    pub fn package_sources<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> Vec<PathBuf>
    {
        let dir = dir.as_ref();

        let mut builder = WalkBuilder::new(dir);

        // One directory level: the package itself
        builder.max_depth(Some(1));

        // Respect .gitignore / .git/info/exclude / global gitignore
        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);

        let mut out: Vec<PathBuf> = builder
            .build()
            // Drop entries with IO errors
            .filter_map(|res| res.ok())
            // Keep only regular files
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|path| Self::is_package_source(path))
            // Extra ignore globs match on the RELATIVE path
            .filter(|abs| {
                let rel = abs
                    .strip_prefix(dir)
                    .unwrap_or(abs);
                !self
                    .ignore_patterns
                    .is_match(rel)
            })
            .collect();

        // Deterministic order (stable logs & tests)
        out.sort();

        out
    }

    /// A package source is a .go file that is not a test file.
    fn is_package_source(path: &Path) -> bool
    {
        let is_go = path
            .extension()
            .and_then(|e| e.to_str())
            == Some(GO_EXTENSION);

        let is_test = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEST_SUFFIX));

        is_go && !is_test
    }
}
