// crates/cargocoin-core/src/events.rs
//
// Events emitted by the ledger. Events form an ordered, append-only output
// channel consumed by indexers and oracles; they are never used as return
// values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::role::Role;
use crate::Amount;

/// A single ledger event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum LedgerEvent {
    /// The initializer ran and set the storage version.
    Initialized { version: u32 },
    /// Balance movement. `from` is zero for mints, `to` is zero for explicit burns.
    /// For fee-bearing transfers `amount` is the net amount credited.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
    /// New supply created by a minter.
    Minted { to: Address, amount: Amount },
    /// Fee destroyed during an ordinary transfer.
    AutoBurn {
        from: Address,
        to: Address,
        amount: Amount,
    },
    /// Supply voluntarily destroyed through `burn` or `burn_from`.
    Burned { from: Address, amount: Amount },
    /// Allowance set by `owner` for `spender`.
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
    BurnExemptionUpdated { account: Address, exempt: bool },
    AutoBurnStatusUpdated { enabled: bool },
    RoleGranted {
        role: Role,
        account: Address,
        sender: Address,
    },
    RoleRevoked {
        role: Role,
        account: Address,
        sender: Address,
    },
    Paused { account: Address },
    Unpaused { account: Address },
    /// The proxy now routes calls to a new logic version.
    Upgraded { implementation: String, version: u32 },
    BridgeAddressUpdated { bridge: Address },
}

impl LedgerEvent {
    /// Short event name, as used in logs and tables.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::Initialized { .. } => "Initialized",
            LedgerEvent::Transfer { .. } => "Transfer",
            LedgerEvent::Minted { .. } => "Minted",
            LedgerEvent::AutoBurn { .. } => "AutoBurn",
            LedgerEvent::Burned { .. } => "Burned",
            LedgerEvent::Approval { .. } => "Approval",
            LedgerEvent::BurnExemptionUpdated { .. } => "BurnExemptionUpdated",
            LedgerEvent::AutoBurnStatusUpdated { .. } => "AutoBurnStatusUpdated",
            LedgerEvent::RoleGranted { .. } => "RoleGranted",
            LedgerEvent::RoleRevoked { .. } => "RoleRevoked",
            LedgerEvent::Paused { .. } => "Paused",
            LedgerEvent::Unpaused { .. } => "Unpaused",
            LedgerEvent::Upgraded { .. } => "Upgraded",
            LedgerEvent::BridgeAddressUpdated { .. } => "BridgeAddressUpdated",
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::Initialized { version } => write!(f, "Initialized(version={})", version),
            LedgerEvent::Transfer { from, to, amount } => {
                write!(f, "Transfer({}, {}, {})", from, to, amount)
            }
            LedgerEvent::Minted { to, amount } => write!(f, "Minted({}, {})", to, amount),
            LedgerEvent::AutoBurn { from, to, amount } => {
                write!(f, "AutoBurn({}, {}, {})", from, to, amount)
            }
            LedgerEvent::Burned { from, amount } => write!(f, "Burned({}, {})", from, amount),
            LedgerEvent::Approval {
                owner,
                spender,
                amount,
            } => write!(f, "Approval({}, {}, {})", owner, spender, amount),
            LedgerEvent::BurnExemptionUpdated { account, exempt } => {
                write!(f, "BurnExemptionUpdated({}, {})", account, exempt)
            }
            LedgerEvent::AutoBurnStatusUpdated { enabled } => {
                write!(f, "AutoBurnStatusUpdated({})", enabled)
            }
            LedgerEvent::RoleGranted {
                role,
                account,
                sender,
            } => write!(f, "RoleGranted({}, {}, {})", role, account, sender),
            LedgerEvent::RoleRevoked {
                role,
                account,
                sender,
            } => write!(f, "RoleRevoked({}, {}, {})", role, account, sender),
            LedgerEvent::Paused { account } => write!(f, "Paused({})", account),
            LedgerEvent::Unpaused { account } => write!(f, "Unpaused({})", account),
            LedgerEvent::Upgraded {
                implementation,
                version,
            } => write!(f, "Upgraded({} v{})", implementation, version),
            LedgerEvent::BridgeAddressUpdated { bridge } => {
                write!(f, "BridgeAddressUpdated({})", bridge)
            }
        }
    }
}
