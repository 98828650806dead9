//! Filepath: src/core/fingerprint.rs
//! End-to-end fingerprint pipeline organized into small structs with
//! associated functions only: collect sources, extract and classify
//! per file (in parallel), sort the canonical entries, hash. Each
//! invocation owns all of its intermediate state; the returned
//! fingerprint is the only thing that outlives it.

use std::{
    collections::BTreeSet,     // Unique, ordered import paths
    path::{Path, PathBuf},     // Paths
};

use anyhow::{Context, Result}; // Error handling
use rayon::prelude::*; // Parallelism
use serde::Serialize; // JSON output record
use tracing::debug; // Stage diagnostics

use crate::{
    cli::AppContext,
    core::classify::{Classifier, ClassifiedFile, ExportFilter},
    infra::{
        config::load_config,
        walk::SourceWalker,
        workspace::{GoGetFetcher, PackageFetcher, Workspace},
    },
    parsers::GoExtractor,
};

/// Options threaded explicitly through the pipeline; no stage reads
/// ambient flag state.
#[derive(Debug, Clone, Default)]
pub struct FingerprintOptions
{
    /// Extra ignore globs for the source walker
    pub ignore_patterns: Vec<String>,

    /// Echo each canonical entry to stderr before hashing
    pub print_entries: bool,
}

/// The pipeline's sole retained output
#[derive(Debug, Clone, Serialize)]
pub struct PackageFingerprint
{
    /// Lowercase hex digest over the sorted entries
    pub fingerprint: String,

    /// Canonical entries in hashed order
    pub entries: Vec<String>,

    /// Unique import paths, reported but never hashed
    pub imports: Vec<String>,
}

/// Public CLI entry point expected by the command layer
pub fn run(
    package: &str,
    fetch: bool,
    ctx: &AppContext,
) -> Result<()>
{
    // Load configuration with graceful fallback
    let config = load_config().unwrap_or_default();

    // Workspace roots come from the configured environment variable
    let workspace = Workspace::from_env(&config.workspace)?;

    // Resolve the package directory, fetching first when asked to.
    // A fetched package lands under the primary root by definition.
    let package_path = if fetch
    {
        let fetcher = GoGetFetcher { inherit_output: ctx.verbose };
        fetcher.fetch(package)?;
        workspace.fetched_path(package)?
    }
    else
    {
        workspace.resolve(package)?
    };

    debug!(package, path = %package_path.display(), "hashing package");

    let opts = FingerprintOptions {
        ignore_patterns: config.ignore_patterns,
        print_entries: ctx.print_entries,
    };
    let report = hash_package(&package_path, &opts)?;

    // One line on stdout; everything else stays on stderr
    if ctx.json
    {
        let record = JsonReport {
            package,
            path: package_path
                .display()
                .to_string(),
            fingerprint: &report.fingerprint,
            entries: &report.entries,
            imports: &report.imports,
        };
        println!("{}", serde_json::to_string(&record)?);
    }
    else
    {
        println!("{}", report.fingerprint);
    }

    Ok(())
}

/// Single-line machine-readable output for `--json`
#[derive(Serialize)]
struct JsonReport<'a>
{
    package: &'a str,
    path: String,
    fingerprint: &'a str,
    entries: &'a [String],
    imports: &'a [String],
}

/// Hash one resolved package directory. Reentrant; every call builds
/// a fresh working set and returns an all-or-nothing result.
pub fn hash_package(
    package_dir: &Path,
    opts: &FingerprintOptions,
) -> Result<PackageFingerprint>
{
    // Collect non-test sources of this one directory
    let walker = SourceWalker::new(&opts.ignore_patterns)?;
    let files = walker.package_sources(package_dir);
    debug!(files = files.len(), "package sources collected");

    // Extract and classify per file; parallel is safe because the
    // sorter below folds any aggregation order into one sequence
    let per_file = ExtractExecutor::extract_parallel(&files)?;

    // Aggregate every file (and every package name found here) into
    // one undifferentiated set
    let mut entries: Vec<String> = Vec::new();
    let mut imports: BTreeSet<String> = BTreeSet::new();
    for classified in per_file
    {
        entries.extend(classified.entries);
        imports.extend(classified.imports);
    }

    DeterministicSorter::sort(&mut entries);

    if opts.print_entries
    {
        for entry in &entries
        {
            eprintln!("{entry}");
        }
    }

    let fingerprint = EntryHasher::digest(&entries);
    debug!(entries = entries.len(), %fingerprint, "package hashed");

    Ok(PackageFingerprint {
        fingerprint,
        entries,
        imports: imports
            .into_iter()
            .collect(),
    })
}

/// Parallel per-file extraction coordinator
struct ExtractExecutor;

impl ExtractExecutor
{
    /// Extract and classify all files using rayon
    fn extract_parallel(files: &[PathBuf]) -> Result<Vec<ClassifiedFile>>
    {
        let extractor = GoExtractor::new()?;

        // Convert to parallel iterator over source files
        let results: Vec<Result<ClassifiedFile>> = files
            .par_iter()
            .map(|file| Self::extract_one(&extractor, file))
            .collect();

        // Aggregate, short-circuiting on first error
        let mut out = Vec::new();
        for r in results
        {
            out.push(r?);
        }

        Ok(out)
    }

    /// Extract canonical entries for a single file
    fn extract_one(
        extractor: &GoExtractor,
        file: &Path,
    ) -> Result<ClassifiedFile>
    {
        // Read file contents as a single UTF-8 String
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;

        // Parse into top-level declarations
        let decls = extractor.parse_declarations(&content, file)?;

        // Visibility gate before classification; pure, no tree mutation
        let exported = ExportFilter::retain_exported(decls);

        Ok(Classifier::classify(&exported))
    }
}

/// Byte-wise ascending order over canonical entries
struct DeterministicSorter;

impl DeterministicSorter
{
    /// Removes dependence on file-system enumeration order and
    /// syntax-tree traversal order. `str` comparison is byte-wise
    /// lexicographic, so the order is stable across platforms.
    fn sort(entries: &mut [String])
    {
        entries.sort_unstable();
    }
}

/// Digest over the sorted entries
struct EntryHasher;

impl EntryHasher
{
    /// Each entry contributes its bytes plus one terminating newline;
    /// the 256-bit digest is rendered as lowercase hex.
    fn digest(entries: &[String]) -> String
    {
        let mut hasher = blake3::Hasher::new();

        for entry in entries
        {
            hasher.update(entry.as_bytes());
            hasher.update(b"\n");
        }

        hasher
            .finalize()
            .to_hex()
            .to_string()
    }
}
