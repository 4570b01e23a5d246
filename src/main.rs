use std::path::PathBuf;

use clap::Parser;

use swift_smoke::config;
use swift_smoke::config::credentials::Credentials;
use swift_smoke::gate::{self, RunOptions};

#[derive(Parser)]
#[command(
    name = "swift-smoke",
    about = "Credential-gated runner for the Swift integration smoke tests"
)]
struct Cli {
    /// Show config resolution and install/run detail
    #[arg(short, long)]
    verbose: bool,

    /// Skip the pinned install step (suite already present)
    #[arg(long)]
    no_install: bool,

    /// Explicit config file instead of the default search paths
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = config::resolve(cli.config.as_deref(), cli.verbose)?;
    let credentials = Credentials::from_env();
    let outcome = gate::run(
        &config,
        &credentials,
        RunOptions {
            verbose: cli.verbose,
            no_install: cli.no_install,
        },
    )?;
    Ok(outcome.exit_code())
}

fn main() {
    let cli = Cli::parse();
    let exit_code = run(&cli).unwrap_or_else(|e| {
        eprintln!("[swift-smoke] error: {e:#}");
        1
    });
    std::process::exit(exit_code);
}
