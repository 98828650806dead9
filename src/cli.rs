use clap::Parser;

/// Shared application context for mode flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub verbose: bool,       // --verbose
    pub print_entries: bool, // --print-entries
    pub json: bool,          // --json
}

#[derive(Parser)]
#[command(name = "exphash")]
#[command(about = "A fast CLI for fingerprinting the exported API surface of Go packages")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Package identifier to fingerprint (e.g. github.com/user/pkg)
    #[arg(value_name = "PACKAGE", required_unless_present = "init")]
    pub package: Option<String>,

    /// Stage-by-stage diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Echo each canonical entry to stderr before hashing
    #[arg(short, long)]
    pub print_entries: bool,

    /// Fetch the package into the workspace before analysis
    #[arg(short = 'd', long)]
    pub fetch: bool,

    /// Emit a single-line JSON record instead of the bare fingerprint
    #[arg(long)]
    pub json: bool,

    /// Write a default exphash.toml into the current directory and exit
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing config file (with --init)
    #[arg(long, requires = "init")]
    pub force: bool,
}
