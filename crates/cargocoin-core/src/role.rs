// crates/cargocoin-core/src/role.rs
//
// Named privileges of the ledger. A role is a set of addresses; membership
// gates every privileged operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// A privileged role on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Manages roles, the burn switch, exemptions, and the bridge address.
    Admin,
    /// May mint new supply up to the cap.
    Minter,
    /// May pause and unpause transfers.
    Pauser,
    /// May swap the logic bound to the ledger storage.
    Upgrader,
}

impl Role {
    /// Every role, in storage order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Minter, Role::Pauser, Role::Upgrader];

    /// Canonical role name, e.g. `MINTER_ROLE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN_ROLE",
            Role::Minter => "MINTER_ROLE",
            Role::Pauser => "PAUSER_ROLE",
            Role::Upgrader => "UPGRADER_ROLE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LedgerError;

    /// Accepts `minter`, `MINTER`, or `MINTER_ROLE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_suffix("_ROLE").unwrap_or(&upper);
        match name {
            "ADMIN" => Ok(Role::Admin),
            "MINTER" => Ok(Role::Minter),
            "PAUSER" => Ok(Role::Pauser),
            "UPGRADER" => Ok(Role::Upgrader),
            other => Err(LedgerError::Serialization(format!("Unknown role: {}", other))),
        }
    }
}
