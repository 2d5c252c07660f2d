// crates/cargocoin-ledger/src/versions.rs
//
// Concrete logic versions that can be bound behind the proxy.
//
//   - CargoCoinV1: the base ledger (base layout).
//   - CargoCoinL1: base-chain variant. Appends `bridge_address` to the layout
//     and enables `set_bridge_address`. Deployed with an initial supply.

use std::sync::Arc;

use crate::layout::{base_layout, l1_layout, StorageLayout};
use crate::logic::LedgerLogic;
use crate::storage::LedgerStorage;

/// The base CargoCoin ledger logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoCoinV1;

impl LedgerLogic for CargoCoinV1 {
    fn name(&self) -> &'static str {
        "CargoCoin"
    }

    fn version(&self) -> u32 {
        1
    }

    fn storage_layout(&self) -> StorageLayout {
        base_layout()
    }
}

/// Base-chain ledger logic with a bridge address slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoCoinL1;

impl LedgerLogic for CargoCoinL1 {
    fn name(&self) -> &'static str {
        "CargoCoinL1"
    }

    fn version(&self) -> u32 {
        2
    }

    fn storage_layout(&self) -> StorageLayout {
        l1_layout()
    }

    fn migrate(&self, storage: &mut LedgerStorage) {
        // The slot did not exist under the previous layout.
        if !storage.layout.contains("bridge_address") {
            storage.bridge_address = None;
        }
    }
}

/// Look up a built-in logic version by implementation name.
pub fn resolve(name: &str) -> Option<Arc<dyn LedgerLogic>> {
    match name {
        "CargoCoin" | "v1" => Some(Arc::new(CargoCoinV1)),
        "CargoCoinL1" | "l1" => Some(Arc::new(CargoCoinL1)),
        _ => None,
    }
}
