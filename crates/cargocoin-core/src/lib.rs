// crates/cargocoin-core/src/lib.rs
//
// cargocoin-core: Core types for the CargoCoin ledger.
//
// This is the leaf crate of the workspace. It defines addresses, amounts,
// roles, the error taxonomy, the event vocabulary, and token constants
// shared by the ledger and its tooling.

pub mod address;
pub mod error;
pub mod events;
pub mod role;
pub mod token;

/// Unsigned 256-bit balance or amount, in base units.
pub type Amount = primitive_types::U256;

// Re-export key types for ergonomic access from downstream crates.
pub use address::Address;
pub use error::LedgerError;
pub use events::LedgerEvent;
pub use role::Role;
pub use token::{
    base_units_per_cc, max_supply, Cc, BPS_DENOMINATOR, BURN_RATE_BPS, DECIMALS, MAX_SUPPLY_CC,
    TOKEN_NAME, TOKEN_SYMBOL,
};
