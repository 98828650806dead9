//! **exphash** - Deterministic fingerprints for the exported API surface of Go packages
//!
//! Parses every non-test source file of a package with tree-sitter, keeps
//! exported declarations only, canonicalizes each to a single line, sorts the
//! lines byte-wise, and hashes the result. The fingerprint changes exactly
//! when the package's public API changes in a textually-normalized sense.

/// Command-line interface with clap integration
pub mod cli;

/// Core pipeline - extraction, canonicalization, ordering, hashing
pub mod core {
    /// Whitespace normalization and structural signature truncation
    pub mod canonical;

    /// Declaration model, export filtering, and classification into entries
    pub mod classify;
    pub use classify::{BlockKeyword, BlockMember, Classifier, Declaration, ExportFilter};

    /// Fingerprint pipeline driver: collect, extract, sort, hash
    pub mod fingerprint;
    pub use fingerprint::{FingerprintOptions, PackageFingerprint, hash_package, run as fingerprint_run};
}

/// Language processing - AST parsing of Go sources
pub mod parsers {
    /// Go top-level declaration extraction with tree-sitter
    pub mod go_parser;
    pub use go_parser::GoExtractor;
}

/// Infrastructure - configuration, source listing, workspace resolution
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, load_config};

    /// Package-directory source listing (non-recursive, test files excluded)
    pub mod walk;
    pub use walk::SourceWalker;

    /// Workspace roots, package resolution, and the fetch capability
    pub mod workspace;
    pub use workspace::{GoGetFetcher, PackageFetcher, Workspace, WorkspaceError};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli};
pub use core::fingerprint::{PackageFingerprint, hash_package};
pub use infra::{Config, SourceWalker, load_config};
pub use parsers::GoExtractor;

// Core types for external consumers
pub use core::classify::{BlockKeyword, Declaration};
