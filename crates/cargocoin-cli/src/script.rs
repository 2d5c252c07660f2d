// crates/cargocoin-cli/src/script.rs
//
// Call scripts replayed against a ledger by `cargocoin run`.
//
// A script is a TOML file of `[[call]]` tables, each tagged by `op`:
//
//   [[call]]
//   op = "transfer"
//   caller = "alice"
//   to = "bob"
//   amount = "1000"
//
// Accounts are config names or hex addresses. Amounts are decimal CC
// ("1000", "0.5"), raw base units ("980 units"), or "max".

use primitive_types::U256;
use serde::Deserialize;
use std::fs;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use cargocoin_core::{Address, Amount, Cc, LedgerError, Role};
use cargocoin_ledger::versions;
use cargocoin_ledger::{Ledger, LedgerLogic};

use crate::config::AccountBook;

/// Errors in a script entry, detected before any call runs.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Invalid amount {0}: {1}")]
    InvalidAmount(String, LedgerError),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown logic version: {0}")]
    UnknownLogic(String),

    #[error("Script parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a human-entered amount into base units.
pub fn parse_amount(s: &str) -> Result<Amount, ScriptError> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("max") {
        return Ok(U256::MAX);
    }
    if let Some(units) = trimmed.strip_suffix("units") {
        return U256::from_dec_str(units.trim()).map_err(|e| {
            ScriptError::InvalidAmount(
                s.to_string(),
                LedgerError::Serialization(format!("{:?}", e)),
            )
        });
    }
    Cc::from_str(trimmed)
        .map(|cc| cc.base_units())
        .map_err(|e| ScriptError::InvalidAmount(s.to_string(), e))
}

/// A parsed script file.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(rename = "call", default)]
    pub calls: Vec<ScriptCall>,
}

impl Script {
    pub fn load(path: &str) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve every entry up front so a bad script runs nothing.
    pub fn resolve(&self, book: &AccountBook) -> Result<Vec<Call>, ScriptError> {
        self.calls.iter().map(|c| c.resolve(book)).collect()
    }
}

/// One script entry as written.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCall {
    Mint { caller: String, to: String, amount: String },
    Transfer { caller: String, to: String, amount: String },
    TransferFrom { caller: String, from: String, to: String, amount: String },
    Approve { caller: String, spender: String, amount: String },
    Burn { caller: String, amount: String },
    BurnFrom { caller: String, owner: String, amount: String },
    SetAutoBurn { caller: String, enabled: bool },
    SetBurnExemption { caller: String, account: String, exempt: bool },
    AddMinter { caller: String, account: String },
    RemoveMinter { caller: String, account: String },
    GrantRole { caller: String, role: String, account: String },
    RevokeRole { caller: String, role: String, account: String },
    RenounceRole { caller: String, role: String },
    Pause { caller: String },
    Unpause { caller: String },
    SetBridgeAddress { caller: String, bridge: String },
    Upgrade { caller: String, logic: String },
}

impl ScriptCall {
    fn resolve(&self, book: &AccountBook) -> Result<Call, ScriptError> {
        let addr = |s: &String| book.resolve(s);
        let role = |s: &String| Role::from_str(s).map_err(|_| ScriptError::UnknownRole(s.clone()));

        let (caller, op) = match self {
            ScriptCall::Mint { caller, to, amount } => (
                caller,
                Op::Mint {
                    to: addr(to)?,
                    amount: parse_amount(amount)?,
                },
            ),
            ScriptCall::Transfer { caller, to, amount } => (
                caller,
                Op::Transfer {
                    to: addr(to)?,
                    amount: parse_amount(amount)?,
                },
            ),
            ScriptCall::TransferFrom {
                caller,
                from,
                to,
                amount,
            } => (
                caller,
                Op::TransferFrom {
                    from: addr(from)?,
                    to: addr(to)?,
                    amount: parse_amount(amount)?,
                },
            ),
            ScriptCall::Approve {
                caller,
                spender,
                amount,
            } => (
                caller,
                Op::Approve {
                    spender: addr(spender)?,
                    amount: parse_amount(amount)?,
                },
            ),
            ScriptCall::Burn { caller, amount } => (
                caller,
                Op::Burn {
                    amount: parse_amount(amount)?,
                },
            ),
            ScriptCall::BurnFrom {
                caller,
                owner,
                amount,
            } => (
                caller,
                Op::BurnFrom {
                    owner: addr(owner)?,
                    amount: parse_amount(amount)?,
                },
            ),
            ScriptCall::SetAutoBurn { caller, enabled } => {
                (caller, Op::SetAutoBurn { enabled: *enabled })
            }
            ScriptCall::SetBurnExemption {
                caller,
                account,
                exempt,
            } => (
                caller,
                Op::SetBurnExemption {
                    account: addr(account)?,
                    exempt: *exempt,
                },
            ),
            ScriptCall::AddMinter { caller, account } => (
                caller,
                Op::AddMinter {
                    account: addr(account)?,
                },
            ),
            ScriptCall::RemoveMinter { caller, account } => (
                caller,
                Op::RemoveMinter {
                    account: addr(account)?,
                },
            ),
            ScriptCall::GrantRole {
                caller,
                role: r,
                account,
            } => (
                caller,
                Op::GrantRole {
                    role: role(r)?,
                    account: addr(account)?,
                },
            ),
            ScriptCall::RevokeRole {
                caller,
                role: r,
                account,
            } => (
                caller,
                Op::RevokeRole {
                    role: role(r)?,
                    account: addr(account)?,
                },
            ),
            ScriptCall::RenounceRole { caller, role: r } => {
                (caller, Op::RenounceRole { role: role(r)? })
            }
            ScriptCall::Pause { caller } => (caller, Op::Pause),
            ScriptCall::Unpause { caller } => (caller, Op::Unpause),
            ScriptCall::SetBridgeAddress { caller, bridge } => (
                caller,
                Op::SetBridgeAddress {
                    bridge: addr(bridge)?,
                },
            ),
            ScriptCall::Upgrade { caller, logic } => (
                caller,
                Op::Upgrade {
                    logic: versions::resolve(logic)
                        .ok_or_else(|| ScriptError::UnknownLogic(logic.clone()))?,
                },
            ),
        };

        Ok(Call {
            caller: addr(caller)?,
            op,
        })
    }
}

/// A fully resolved call, ready to run.
#[derive(Debug, Clone)]
pub struct Call {
    pub caller: Address,
    pub op: Op,
}

#[derive(Debug, Clone)]
pub enum Op {
    Mint { to: Address, amount: Amount },
    Transfer { to: Address, amount: Amount },
    TransferFrom { from: Address, to: Address, amount: Amount },
    Approve { spender: Address, amount: Amount },
    Burn { amount: Amount },
    BurnFrom { owner: Address, amount: Amount },
    SetAutoBurn { enabled: bool },
    SetBurnExemption { account: Address, exempt: bool },
    AddMinter { account: Address },
    RemoveMinter { account: Address },
    GrantRole { role: Role, account: Address },
    RevokeRole { role: Role, account: Address },
    RenounceRole { role: Role },
    Pause,
    Unpause,
    SetBridgeAddress { bridge: Address },
    Upgrade { logic: Arc<dyn LedgerLogic> },
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Mint { .. } => "mint",
            Op::Transfer { .. } => "transfer",
            Op::TransferFrom { .. } => "transfer_from",
            Op::Approve { .. } => "approve",
            Op::Burn { .. } => "burn",
            Op::BurnFrom { .. } => "burn_from",
            Op::SetAutoBurn { .. } => "set_auto_burn",
            Op::SetBurnExemption { .. } => "set_burn_exemption",
            Op::AddMinter { .. } => "add_minter",
            Op::RemoveMinter { .. } => "remove_minter",
            Op::GrantRole { .. } => "grant_role",
            Op::RevokeRole { .. } => "revoke_role",
            Op::RenounceRole { .. } => "renounce_role",
            Op::Pause => "pause",
            Op::Unpause => "unpause",
            Op::SetBridgeAddress { .. } => "set_bridge_address",
            Op::Upgrade { .. } => "upgrade",
        }
    }
}

impl Call {
    /// Run this call against `ledger`. A rejection leaves the ledger unchanged.
    pub fn apply(&self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        let caller = self.caller;
        match &self.op {
            Op::Mint { to, amount } => ledger.mint(caller, *to, *amount),
            Op::Transfer { to, amount } => ledger.transfer(caller, *to, *amount),
            Op::TransferFrom { from, to, amount } => {
                ledger.transfer_from(caller, *from, *to, *amount)
            }
            Op::Approve { spender, amount } => ledger.approve(caller, *spender, *amount),
            Op::Burn { amount } => ledger.burn(caller, *amount),
            Op::BurnFrom { owner, amount } => ledger.burn_from(caller, *owner, *amount),
            Op::SetAutoBurn { enabled } => ledger.set_auto_burn_enabled(caller, *enabled),
            Op::SetBurnExemption { account, exempt } => {
                ledger.set_burn_exemption(caller, *account, *exempt)
            }
            Op::AddMinter { account } => ledger.add_minter(caller, *account),
            Op::RemoveMinter { account } => ledger.remove_minter(caller, *account),
            Op::GrantRole { role, account } => ledger.grant_role(caller, *role, *account),
            Op::RevokeRole { role, account } => ledger.revoke_role(caller, *role, *account),
            Op::RenounceRole { role } => ledger.renounce_role(caller, *role),
            Op::Pause => ledger.pause(caller),
            Op::Unpause => ledger.unpause(caller),
            Op::SetBridgeAddress { bridge } => ledger.set_bridge_address(caller, *bridge),
            Op::Upgrade { logic } => ledger.upgrade_to(caller, Arc::clone(logic)),
        }
    }
}
