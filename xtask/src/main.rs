//! Workspace quality gate.
//!
//! # Commands
//!
//! - `cargo xtask check` - Run every check and report, failing only in `--ci`
//! - `cargo xtask ci` - Same checks, stop with a non-zero status on failure
//! - `cargo xtask props [--cases N]` - Run the property tests with more cases

mod check;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Quality checks for the mosaic workspace", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all quality checks across the workspace
    Check {
        /// Exit with an error if any check fails
        #[arg(long)]
        ci: bool,
    },

    /// Run the full CI suite
    Ci,

    /// Run only the property-based tests, with a larger case count
    Props {
        /// Cases per property
        #[arg(long, default_value_t = 1024)]
        cases: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { ci } => check::run(ci),
        Commands::Ci => check::run(true),
        Commands::Props { cases } => check::run_props(cases),
    }
}
