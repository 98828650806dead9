use anyhow::Result;
use clap::Parser;
use exphash::cli::{AppContext, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        verbose: cli.verbose,
        print_entries: cli.print_entries,
        json: cli.json,
    };

    init_tracing(cli.verbose);

    if cli.init {
        return exphash::infra::config::init(cli.force, &ctx);
    }

    let Some(package) = cli.package else {
        anyhow::bail!("usage: exh <PACKAGE>");
    };

    exphash::core::fingerprint::run(&package, cli.fetch, &ctx)
}

/// Diagnostics go to stderr; stdout carries only the fingerprint.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("exphash=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
