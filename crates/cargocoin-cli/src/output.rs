// crates/cargocoin-cli/src/output.rs
//
// Output formatting utilities for the CargoCoin CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

use cargocoin_core::{Address, Amount, Cc};

use crate::config::AccountBook;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data)
        .unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Amount as CC, e.g. "9.98 CC".
pub fn format_cc(amount: Amount) -> String {
    Cc::from_base_units(amount).to_string()
}

/// Config name with the address in parentheses, or the bare address.
pub fn format_account(book: &AccountBook, address: &Address) -> String {
    match book.label(address) {
        Some(name) => format!("{} ({})", name, address),
        None => address.to_string(),
    }
}
