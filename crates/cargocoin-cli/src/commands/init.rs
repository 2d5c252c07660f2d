// crates/cargocoin-cli/src/commands/init.rs
//
// `cargocoin init`: deploy and initialize a ledger from the genesis config.

use clap::Args;

use cargocoin_ledger::{versions, Ledger};

use crate::config::GenesisConfig;
use crate::output::{format_account, format_cc};
use crate::snapshot;

#[derive(Debug, Args)]
pub struct InitCmd {
    /// Overwrite an existing ledger snapshot.
    #[arg(long)]
    pub force: bool,
}

/// Run the init command.
pub fn run(cmd: &InitCmd, config: &GenesisConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.snapshot_file()?;
    if path.exists() && !cmd.force {
        return Err(format!(
            "Ledger already exists at {}. Use --force to overwrite.",
            path.display()
        )
        .into());
    }

    let logic = versions::resolve(&config.logic)
        .ok_or_else(|| format!("Unknown logic version: {}", config.logic))?;
    let book = config.book();
    let admin = book.resolve(&config.admin)?;
    let minter = book.resolve(&config.minter)?;
    let initial_supply = config.initial_supply()?;

    let mut ledger = Ledger::deploy(logic);
    let initial = (!initial_supply.is_zero()).then_some(initial_supply);
    ledger.initialize(admin, minter, initial)?;
    snapshot::save(&ledger, &path)?;

    let implementation = ledger.implementation();
    println!(
        "Initialized {} ({}) with {} v{}",
        ledger.name(),
        ledger.symbol(),
        implementation.name,
        implementation.version
    );
    println!("  Admin:          {}", format_account(&book, &admin));
    println!("  Minter:         {}", format_account(&book, &minter));
    println!("  Max supply:     {}", format_cc(ledger.max_supply()));
    println!("  Initial supply: {}", format_cc(ledger.total_supply()));
    println!("  Saved to:       {}", path.display());

    Ok(())
}
