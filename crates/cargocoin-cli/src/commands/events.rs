// crates/cargocoin-cli/src/commands/events.rs
//
// `cargocoin events`: print the ledger event log from a cursor.

use clap::Args;
use tabled::Tabled;

use cargocoin_core::LedgerEvent;

use crate::config::GenesisConfig;
use crate::output::{format_json, format_table, OutputFormat};
use crate::snapshot;

#[derive(Debug, Args)]
pub struct EventsCmd {
    /// First sequence number to print.
    #[arg(long, default_value_t = 0)]
    pub since: u64,

    /// Maximum number of events to print.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Only events with this name, e.g. AutoBurn.
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Seq")]
    seq: u64,
    #[tabled(rename = "Call")]
    call: u64,
    #[tabled(rename = "Event")]
    name: &'static str,
    #[tabled(rename = "Details")]
    details: String,
}

fn matches_name(event: &LedgerEvent, name: Option<&str>) -> bool {
    name.map_or(true, |n| event.name().eq_ignore_ascii_case(n))
}

/// Run the events command.
pub fn run(
    cmd: &EventsCmd,
    config: &GenesisConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = snapshot::load(&config.snapshot_file()?)?;
    let limit = cmd.limit.unwrap_or(usize::MAX);
    let selected: Vec<_> = ledger
        .events()
        .since(cmd.since)
        .iter()
        .filter(|r| matches_name(&r.event, cmd.name.as_deref()))
        .take(limit)
        .collect();

    match format {
        OutputFormat::Json => println!("{}", format_json(&selected)),
        OutputFormat::Table => {
            if selected.is_empty() {
                println!("No events since #{}", cmd.since);
                return Ok(());
            }
            let rows: Vec<EventRow> = selected
                .iter()
                .map(|r| EventRow {
                    seq: r.seq,
                    call: r.call,
                    name: r.event.name(),
                    details: r.event.to_string(),
                })
                .collect();
            println!("{}", format_table(&rows));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cargocoin_core::Address;

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let event = LedgerEvent::Paused {
            account: Address::repeat_byte(1),
        };
        assert!(matches_name(&event, None));
        assert!(matches_name(&event, Some("paused")));
        assert!(!matches_name(&event, Some("Unpaused")));
    }
}
