//! Relay: monday.com ↔ Odoo reconciliation CLI.
//!
//! # Usage
//!
//! ```text
//! relay setup
//! relay config [--init]
//! relay run create-selected|sync-status|export-employees|addresses|wipe [--dry-run]
//! relay run push-fields --phone <p> --item <id> --map <field>=<column>… [--dry-run]
//! relay inspect boards|columns <board>|fields [<model>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    config::ConfigArgs, inspect::InspectCommand, run::RunArgs, setup::SetupArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "relay",
    version,
    about = "Reconcile records between monday.com boards and Odoo",
    long_about = None,
)]
struct Cli {
    /// Log each write as it is issued (RUST_LOG overrides).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enter and save the monday.com API key and the Odoo login.
    Setup(SetupArgs),

    /// Show the effective settings.
    Config(ConfigArgs),

    /// Run one reconciliation procedure.
    Run(RunArgs),

    /// Read-only views of boards, columns and model fields.
    Inspect {
        #[command(subcommand)]
        command: InspectCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Setup(args) => args.run(),
        Commands::Config(args) => args.run(),
        Commands::Run(args) => args.run(),
        Commands::Inspect { command } => commands::inspect::run(command),
    }
}

/// Logs go to stderr so procedure output on stdout stays clean.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
