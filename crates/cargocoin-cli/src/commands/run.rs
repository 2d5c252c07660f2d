// crates/cargocoin-cli/src/commands/run.rs
//
// `cargocoin run <script>`: replay a script of calls against the ledger.
//
// Every entry is resolved before the first call runs. Rejected calls are
// reported and leave the ledger unchanged; the run continues unless
// `--strict` is set, in which case nothing is saved.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::config::GenesisConfig;
use crate::output::{format_account, format_json, format_table, OutputFormat};
use crate::script::Script;
use crate::snapshot;

#[derive(Debug, Args)]
pub struct RunCmd {
    /// Path to the TOML call script.
    pub script: String,

    /// Abort without saving on the first rejected call.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Tabled, Serialize)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Op")]
    op: String,
    #[tabled(rename = "Caller")]
    caller: String,
    #[tabled(rename = "Events")]
    events: usize,
    #[tabled(rename = "Result")]
    result: String,
}

/// Run the run command.
pub fn run(
    cmd: &RunCmd,
    config: &GenesisConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.snapshot_file()?;
    let mut ledger = snapshot::load(&path)?;
    let book = config.book();
    let calls = Script::load(&cmd.script)?.resolve(&book)?;
    tracing::info!("Replaying {} calls from {}", calls.len(), cmd.script);

    let mut rows = Vec::with_capacity(calls.len());
    let mut rejected = 0usize;
    for (i, call) in calls.iter().enumerate() {
        let before = ledger.events().len();
        let result = call.apply(&mut ledger);
        let events = ledger.events().len() - before;
        let outcome = match &result {
            Ok(()) => "ok".to_string(),
            Err(e) => {
                rejected += 1;
                format!("rejected: {}", e)
            }
        };
        rows.push(OutcomeRow {
            index: i + 1,
            op: call.op.name().to_string(),
            caller: format_account(&book, &call.caller),
            events,
            result: outcome,
        });
        if let Err(e) = result {
            if cmd.strict {
                return Err(format!("Call #{} ({}) rejected: {}", i + 1, call.op.name(), e).into());
            }
        }
    }

    snapshot::save(&ledger, &path)?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&rows)),
        OutputFormat::Table => {
            println!("{}", format_table(&rows));
            println!();
            println!(
                "{} calls, {} committed, {} rejected",
                rows.len(),
                rows.len() - rejected,
                rejected
            );
        }
    }

    Ok(())
}
