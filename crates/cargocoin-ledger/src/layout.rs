// crates/cargocoin-ledger/src/layout.rs
//
// Versioned storage schema.
//
// Each logic version declares the ordered list of persistent fields it reads
// and writes. A new version may only append fields: the layout currently
// recorded in storage must be an exact prefix of the proposed one. Removing,
// reordering, renaming, or retyping an existing field is rejected.

use serde::{Deserialize, Serialize};

/// One named, typed persistent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageField {
    pub name: String,
    pub ty: String,
}

/// Ordered field list of a storage schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLayout {
    pub fields: Vec<StorageField>,
}

impl StorageLayout {
    /// Build a layout from `(name, type)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(name, ty)| StorageField {
                    name: (*name).to_string(),
                    ty: (*ty).to_string(),
                })
                .collect(),
        }
    }

    /// This layout with extra fields appended.
    pub fn extended(&self, pairs: &[(&str, &str)]) -> Self {
        let mut fields = self.fields.clone();
        fields.extend(Self::from_pairs(pairs).fields);
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a field with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Check that `next` keeps every field of `self` in place.
    ///
    /// Returns a description of the first violation.
    pub fn check_extended_by(&self, next: &StorageLayout) -> Result<(), String> {
        for (slot, current) in self.fields.iter().enumerate() {
            match next.fields.get(slot) {
                None => {
                    return Err(format!(
                        "slot {} ({}: {}) is missing from the new layout",
                        slot, current.name, current.ty
                    ))
                }
                Some(proposed) if proposed != current => {
                    return Err(format!(
                        "slot {} changed from {}: {} to {}: {}",
                        slot, current.name, current.ty, proposed.name, proposed.ty
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Fields of the base CargoCoin ledger.
pub fn base_layout() -> StorageLayout {
    StorageLayout::from_pairs(&[
        ("initialized_version", "uint32"),
        ("balances", "mapping(address => uint256)"),
        ("allowances", "mapping(address => mapping(address => uint256))"),
        ("total_supply", "uint256"),
        ("max_supply", "uint256"),
        ("total_burned", "uint256"),
        ("auto_burn_enabled", "bool"),
        ("burn_exempt", "mapping(address => bool)"),
        ("roles", "mapping(bytes32 => mapping(address => bool))"),
        ("paused", "bool"),
    ])
}

/// Base layout plus the bridge address used by the L1 variant.
pub fn l1_layout() -> StorageLayout {
    base_layout().extended(&[("bridge_address", "address")])
}
