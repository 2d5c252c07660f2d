// crates/cargocoin-ledger/src/lib.rs
//
// cargocoin-ledger: the CargoCoin ledger core.
//
// A capped-supply token ledger with a 2% auto-burn on ordinary transfers,
// burn exemptions, role-gated administration, a pause switch, and logic that
// can be upgraded in place while storage survives.
//
// All amounts are base units (1 CC = 10^18 base units).
//
// Layout:
//   - storage / layout: persistent state and its append-only schema
//   - logic / versions: stateless operations and the concrete versions
//   - proxy: the `Ledger` callers address; commits events on success
//   - shared: lock-serialized handle for concurrent callers

pub mod event_log;
pub mod fees;
pub mod layout;
pub mod logic;
pub mod proxy;
pub mod roles;
pub mod shared;
pub mod storage;
pub mod versions;

// Re-export key types for ergonomic access from downstream crates.
pub use event_log::{EventLog, RecordedEvent};
pub use fees::{burn_amount, FeeSplit};
pub use layout::{StorageField, StorageLayout};
pub use logic::{Emitted, LedgerLogic};
pub use proxy::{Ledger, LedgerSnapshot};
pub use roles::RoleRegistry;
pub use shared::SharedLedger;
pub use storage::{ImplementationId, LedgerStorage};
pub use versions::{CargoCoinL1, CargoCoinV1};
