// crates/cargocoin-cli/src/commands/show.rs
//
// `cargocoin show`: supply summary and holder balances.

use clap::Args;
use serde::Serialize;
use std::collections::BTreeSet;
use tabled::Tabled;

use cargocoin_core::Address;
use cargocoin_ledger::Ledger;

use crate::config::{AccountBook, GenesisConfig};
use crate::output::{format_account, format_cc, format_json, format_table, OutputFormat};
use crate::snapshot;

#[derive(Debug, Args)]
pub struct ShowCmd {
    /// Show a single account (config name or hex address).
    #[arg(long)]
    pub account: Option<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    name: &'static str,
    symbol: &'static str,
    decimals: u8,
    implementation: String,
    version: u32,
    total_supply: String,
    max_supply: String,
    available_supply: String,
    circulating_supply: String,
    total_burned: String,
    auto_burn_enabled: bool,
    paused: bool,
    bridge_address: Option<String>,
    holders: Vec<AccountRow>,
}

#[derive(Debug, Tabled, Serialize)]
struct AccountRow {
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Burn exempt")]
    burn_exempt: bool,
    #[tabled(rename = "Roles")]
    roles: String,
}

fn account_row(ledger: &Ledger, book: &AccountBook, address: &Address) -> AccountRow {
    let roles: Vec<&str> = ledger
        .storage()
        .roles
        .roles_of(address)
        .iter()
        .map(|r| r.as_str())
        .collect();
    AccountRow {
        account: format_account(book, address),
        balance: format_cc(ledger.balance_of(address)),
        burn_exempt: ledger.is_burn_exempt(address),
        roles: roles.join(", "),
    }
}

/// Run the show command.
pub fn run(
    cmd: &ShowCmd,
    config: &GenesisConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = snapshot::load(&config.snapshot_file()?)?;
    let book = config.book();

    if let Some(account) = &cmd.account {
        let address = book.resolve(account)?;
        let row = account_row(&ledger, &book, &address);
        match format {
            OutputFormat::Json => println!("{}", format_json(&row)),
            OutputFormat::Table => println!("{}", format_table(&[row])),
        }
        return Ok(());
    }

    // Holders plus every named account, so role holders with no balance show up.
    let mut addresses: BTreeSet<Address> =
        ledger.storage().balances().map(|(a, _)| *a).collect();
    addresses.extend(book.addresses().copied());
    let holders: Vec<AccountRow> = addresses
        .iter()
        .map(|a| account_row(&ledger, &book, a))
        .collect();

    let implementation = ledger.implementation();
    let summary = Summary {
        name: ledger.name(),
        symbol: ledger.symbol(),
        decimals: ledger.decimals(),
        implementation: implementation.name.clone(),
        version: implementation.version,
        total_supply: format_cc(ledger.total_supply()),
        max_supply: format_cc(ledger.max_supply()),
        available_supply: format_cc(ledger.available_supply()),
        circulating_supply: format_cc(ledger.circulating_supply()),
        total_burned: format_cc(ledger.total_burned()),
        auto_burn_enabled: ledger.auto_burn_enabled(),
        paused: ledger.paused(),
        bridge_address: ledger.bridge_address().map(|a| a.to_string()),
        holders,
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&summary)),
        OutputFormat::Table => {
            println!(
                "{} ({}) on {} v{}",
                summary.name, summary.symbol, summary.implementation, summary.version
            );
            println!("  Total supply:   {}", summary.total_supply);
            println!("  Max supply:     {}", summary.max_supply);
            println!("  Available:      {}", summary.available_supply);
            println!("  Total burned:   {}", summary.total_burned);
            println!("  Auto-burn:      {}", on_off(summary.auto_burn_enabled));
            println!("  Paused:         {}", summary.paused);
            if let Some(bridge) = &summary.bridge_address {
                println!("  Bridge:         {}", bridge);
            }
            println!();
            println!("{}", format_table(&summary.holders));
        }
    }

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
