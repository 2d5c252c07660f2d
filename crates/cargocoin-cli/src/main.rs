// crates/cargocoin-cli/src/main.rs
//
// CLI entrypoint for the CargoCoin developer tools.
//
// Initializes tracing, loads the genesis config, and dispatches to the
// init / run / show / events subcommands. Ledger state persists between
// invocations as a JSON snapshot.

mod commands;
mod config;
mod output;
mod script;
mod snapshot;

use clap::{Parser, Subcommand};
use commands::events::EventsCmd;
use commands::init::InitCmd;
use commands::run::RunCmd;
use commands::show::ShowCmd;
use config::GenesisConfig;
use output::OutputFormat;

/// CargoCoin CLI: a local capped-supply, auto-burning token ledger.
#[derive(Parser, Debug)]
#[command(
    name = "cargocoin",
    version = "0.1.0",
    about = "CargoCoin CLI: capped-supply token ledger with a 2% auto-burn"
)]
struct Cli {
    /// Path to the genesis config (TOML).
    #[arg(long, global = true, default_value = "cargocoin.toml")]
    config: String,

    /// Override the snapshot path from the config.
    #[arg(long, global = true)]
    snapshot: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Deploy and initialize a ledger from the genesis config.
    Init(InitCmd),

    /// Replay a script of ledger calls.
    Run(RunCmd),

    /// Show supply figures and account balances.
    Show(ShowCmd),

    /// Print the event log.
    Events(EventsCmd),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = GenesisConfig::load(&cli.config);
    let log_level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Logs go to stderr so `--json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config =
        loaded.map_err(|e| format!("Could not load config from {}: {}", cli.config, e))?;
    tracing::debug!("Loaded configuration from {}", cli.config);
    if let Some(path) = &cli.snapshot {
        config.snapshot_path = path.clone();
    }

    let format = OutputFormat::from_flag(cli.json);
    match &cli.command {
        Commands::Init(cmd) => commands::init::run(cmd, &config)?,
        Commands::Run(cmd) => commands::run::run(cmd, &config, format)?,
        Commands::Show(cmd) => commands::show::run(cmd, &config, format)?,
        Commands::Events(cmd) => commands::events::run(cmd, &config, format)?,
    }

    Ok(())
}
