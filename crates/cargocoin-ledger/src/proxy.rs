// crates/cargocoin-ledger/src/proxy.rs
//
// The stable ledger identity callers address.
//
// `Ledger` owns the persistent storage and the event log and routes every
// call to the currently bound `LedgerLogic`. A call either commits all of its
// state changes and events or returns an error with nothing committed.
// `upgrade_to` swaps the bound logic after checking the caller's role (through
// the *current* logic) and the storage layout compatibility of the new one.

use std::sync::Arc;

use cargocoin_core::{
    Address, Amount, LedgerError, LedgerEvent, Role, DECIMALS, TOKEN_NAME, TOKEN_SYMBOL,
};
use serde::{Deserialize, Serialize};

use crate::event_log::EventLog;
use crate::layout::StorageLayout;
use crate::logic::{Emitted, LedgerLogic};
use crate::storage::{ImplementationId, LedgerStorage};
use crate::versions;

/// Serializable image of a ledger: storage plus event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub storage: LedgerStorage,
    pub events: EventLog,
}

/// Proxy binding persistent storage to swappable logic.
#[derive(Debug)]
pub struct Ledger {
    storage: LedgerStorage,
    logic: Arc<dyn LedgerLogic>,
    log: EventLog,
}

impl Ledger {
    /// Deploy an uninitialized ledger behind `logic`.
    pub fn deploy(logic: Arc<dyn LedgerLogic>) -> Self {
        let mut storage = LedgerStorage::new();
        storage.implementation = ImplementationId {
            name: logic.name().to_string(),
            version: logic.version(),
        };
        storage.layout = logic.storage_layout();
        tracing::info!(
            "Deployed ledger proxy with {} v{}",
            logic.name(),
            logic.version()
        );
        Self {
            storage,
            logic,
            log: EventLog::new(),
        }
    }

    /// Rebuild a ledger from a snapshot, re-binding the recorded logic version.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        let recorded = &snapshot.storage.implementation;
        let logic = versions::resolve(&recorded.name).ok_or_else(|| {
            LedgerError::Serialization(format!("Unknown implementation: {}", recorded.name))
        })?;
        if logic.version() != recorded.version {
            return Err(LedgerError::IncompatibleStorageLayout(format!(
                "snapshot records {} v{} but v{} is available",
                recorded.name,
                recorded.version,
                logic.version()
            )));
        }
        if logic.storage_layout() != snapshot.storage.layout {
            return Err(LedgerError::IncompatibleStorageLayout(format!(
                "snapshot layout differs from {} v{}",
                recorded.name, recorded.version
            )));
        }
        snapshot.storage.check_supply_invariant()?;
        check_against_log(&snapshot, logic.as_ref())?;
        Ok(Self {
            storage: snapshot.storage,
            logic,
            log: snapshot.events,
        })
    }

    /// Serializable copy of storage and the event log.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            storage: self.storage.clone(),
            events: self.log.clone(),
        }
    }

    /// Run one call against the bound logic and commit its events on success.
    fn execute<F>(&mut self, op: &'static str, caller: Address, call: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&dyn LedgerLogic, &mut LedgerStorage) -> Result<Emitted, LedgerError>,
    {
        let logic = Arc::clone(&self.logic);
        match call(logic.as_ref(), &mut self.storage) {
            Ok(events) => {
                tracing::debug!(op, %caller, events = events.len(), "call committed");
                self.log.commit(events);
                debug_assert!(self.storage.check_supply_invariant().is_ok());
                Ok(())
            }
            Err(e) => {
                match &e {
                    LedgerError::Unauthorized { .. } => {
                        tracing::warn!(op, %caller, error = %e, "privileged call rejected");
                    }
                    _ => {
                        tracing::debug!(op, %caller, error = %e, "call rejected");
                    }
                }
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------

    /// Run the one-shot initializer. `initial_supply` is minted to `admin`.
    pub fn initialize(
        &mut self,
        admin: Address,
        minter: Address,
        initial_supply: Option<Amount>,
    ) -> Result<(), LedgerError> {
        self.execute("initialize", admin, |logic, s| {
            logic.initialize(s, admin, minter, initial_supply)
        })
    }

    /// Bind `new_logic` to this ledger's storage.
    ///
    /// Requires UPGRADER (checked by the current logic) and a storage layout
    /// that keeps every existing field in place.
    pub fn upgrade_to(
        &mut self,
        caller: Address,
        new_logic: Arc<dyn LedgerLogic>,
    ) -> Result<(), LedgerError> {
        self.execute("upgrade_to", caller, |current, s| {
            current.authorize_upgrade(s, &caller)?;
            let next_layout = new_logic.storage_layout();
            s.layout
                .check_extended_by(&next_layout)
                .map_err(LedgerError::IncompatibleStorageLayout)?;

            new_logic.migrate(s);
            s.layout = next_layout;
            s.implementation = ImplementationId {
                name: new_logic.name().to_string(),
                version: new_logic.version(),
            };
            Ok(vec![LedgerEvent::Upgraded {
                implementation: new_logic.name().to_string(),
                version: new_logic.version(),
            }])
        })?;

        tracing::info!(
            "Upgraded ledger logic {} v{} -> {} v{}",
            self.logic.name(),
            self.logic.version(),
            new_logic.name(),
            new_logic.version()
        );
        self.logic = new_logic;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Balance movement
    // ---------------------------------------------------------------

    /// Mint `amount` to `to`. Requires MINTER; never charged the burn fee.
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute("mint", caller, |logic, s| logic.mint(s, caller, to, amount))
    }

    /// Move `amount` from the caller to `to`, burning 2% unless exempt or disabled.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute("transfer", caller, |logic, s| {
            logic.transfer(s, caller, to, amount)
        })
    }

    /// Move `amount` from `from` to `to`, spending the caller's allowance.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute("transfer_from", caller, |logic, s| {
            logic.transfer_from(s, caller, from, to, amount)
        })
    }

    /// Set the caller's allowance for `spender`.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute("approve", caller, |logic, s| {
            logic.approve(s, caller, spender, amount)
        })
    }

    /// Destroy `amount` of the caller's balance.
    pub fn burn(&mut self, caller: Address, amount: Amount) -> Result<(), LedgerError> {
        self.execute("burn", caller, |logic, s| logic.burn(s, caller, amount))
    }

    /// Destroy `amount` of `owner`'s balance, spending the caller's allowance.
    pub fn burn_from(
        &mut self,
        caller: Address,
        owner: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.execute("burn_from", caller, |logic, s| {
            logic.burn_from(s, caller, owner, amount)
        })
    }

    // ---------------------------------------------------------------
    // Administration
    // ---------------------------------------------------------------

    /// Toggle the transfer fee. Requires ADMIN.
    pub fn set_auto_burn_enabled(
        &mut self,
        caller: Address,
        enabled: bool,
    ) -> Result<(), LedgerError> {
        self.execute("set_auto_burn_enabled", caller, |logic, s| {
            logic.set_auto_burn_enabled(s, caller, enabled)
        })
    }

    /// Exempt `account` from (or subject it to) the transfer fee. Requires ADMIN.
    pub fn set_burn_exemption(
        &mut self,
        caller: Address,
        account: Address,
        exempt: bool,
    ) -> Result<(), LedgerError> {
        self.execute("set_burn_exemption", caller, |logic, s| {
            logic.set_burn_exemption(s, caller, account, exempt)
        })
    }

    /// Grant MINTER to `account`. Requires ADMIN.
    pub fn add_minter(&mut self, caller: Address, account: Address) -> Result<(), LedgerError> {
        self.execute("add_minter", caller, |logic, s| {
            logic.add_minter(s, caller, account)
        })
    }

    /// Revoke MINTER from `account`. Requires ADMIN.
    pub fn remove_minter(&mut self, caller: Address, account: Address) -> Result<(), LedgerError> {
        self.execute("remove_minter", caller, |logic, s| {
            logic.remove_minter(s, caller, account)
        })
    }

    /// Grant `role` to `account`. Requires ADMIN.
    pub fn grant_role(
        &mut self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), LedgerError> {
        self.execute("grant_role", caller, |logic, s| {
            logic.grant_role(s, caller, role, account)
        })
    }

    /// Revoke `role` from `account`. Requires ADMIN.
    pub fn revoke_role(
        &mut self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), LedgerError> {
        self.execute("revoke_role", caller, |logic, s| {
            logic.revoke_role(s, caller, role, account)
        })
    }

    /// Drop one of the caller's own roles.
    pub fn renounce_role(&mut self, caller: Address, role: Role) -> Result<(), LedgerError> {
        self.execute("renounce_role", caller, |logic, s| {
            logic.renounce_role(s, caller, role)
        })
    }

    /// Halt transfers. Requires PAUSER.
    pub fn pause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.execute("pause", caller, |logic, s| logic.pause(s, caller))?;
        tracing::info!("Ledger paused by {}", caller);
        Ok(())
    }

    /// Resume transfers. Requires PAUSER.
    pub fn unpause(&mut self, caller: Address) -> Result<(), LedgerError> {
        self.execute("unpause", caller, |logic, s| logic.unpause(s, caller))?;
        tracing::info!("Ledger unpaused by {}", caller);
        Ok(())
    }

    /// Record the bridge address. Requires ADMIN and a layout with the slot.
    pub fn set_bridge_address(
        &mut self,
        caller: Address,
        bridge: Address,
    ) -> Result<(), LedgerError> {
        self.execute("set_bridge_address", caller, |logic, s| {
            logic.set_bridge_address(s, caller, bridge)
        })
    }

    // ---------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------

    /// Token name.
    pub fn name(&self) -> &'static str {
        TOKEN_NAME
    }

    /// Token symbol.
    pub fn symbol(&self) -> &'static str {
        TOKEN_SYMBOL
    }

    /// Decimal places of the base unit.
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Balance of `account` in base units.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.storage.balance_of(account)
    }

    /// Remaining allowance `owner` has given `spender`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.storage.allowance(owner, spender)
    }

    /// Tokens in existence: minted minus burned.
    pub fn total_supply(&self) -> Amount {
        self.storage.total_supply
    }

    /// The fixed supply cap.
    pub fn max_supply(&self) -> Amount {
        self.storage.max_supply
    }

    /// Cumulative auto-burned and explicitly burned amount.
    pub fn total_burned(&self) -> Amount {
        self.storage.total_burned
    }

    /// Headroom under the cap: `max_supply - total_supply`.
    pub fn available_supply(&self) -> Amount {
        self.storage.max_supply.saturating_sub(self.storage.total_supply)
    }

    /// Burned tokens are already excluded from total supply.
    pub fn circulating_supply(&self) -> Amount {
        self.storage.total_supply
    }

    /// Whether the transfer fee is switched on.
    pub fn auto_burn_enabled(&self) -> bool {
        self.storage.auto_burn_enabled
    }

    /// Whether transfers from `account` skip the fee.
    pub fn is_burn_exempt(&self, account: &Address) -> bool {
        self.storage.is_burn_exempt(account)
    }

    /// Whether transfers are halted.
    pub fn paused(&self) -> bool {
        self.storage.paused
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.storage.roles.has_role(role, account)
    }

    /// Whether `account` holds MINTER.
    pub fn is_minter(&self, account: &Address) -> bool {
        self.has_role(Role::Minter, account)
    }

    /// Fee preview, independent of exemptions and the auto-burn switch.
    pub fn calculate_burn_amount(&self, amount: Amount) -> Amount {
        self.logic.calculate_burn_amount(amount)
    }

    /// Bridge address, if one has been set.
    pub fn bridge_address(&self) -> Option<Address> {
        self.storage.bridge_address
    }

    /// Name and version of the bound logic.
    pub fn implementation(&self) -> &ImplementationId {
        &self.storage.implementation
    }

    /// Storage layout declared by the bound logic.
    pub fn storage_layout(&self) -> &StorageLayout {
        &self.storage.layout
    }

    /// Whether the initializer has run.
    pub fn is_initialized(&self) -> bool {
        self.storage.is_initialized()
    }

    /// Read-only view of the persistent state.
    pub fn storage(&self) -> &LedgerStorage {
        &self.storage
    }

    /// The committed event log.
    pub fn events(&self) -> &EventLog {
        &self.log
    }
}

/// The cap is fixed by the logic, and supply counters must match the
/// `Minted`/`AutoBurn`/`Burned` history: `total_supply + total_burned == minted`.
fn check_against_log(
    snapshot: &LedgerSnapshot,
    logic: &dyn LedgerLogic,
) -> Result<(), LedgerError> {
    let storage = &snapshot.storage;
    let expected_cap = if storage.is_initialized() {
        logic.max_supply()
    } else {
        Amount::zero()
    };
    if storage.max_supply != expected_cap {
        return Err(LedgerError::InvariantViolation(format!(
            "snapshot max supply {} differs from the fixed cap {}",
            storage.max_supply, expected_cap
        )));
    }

    let totals = snapshot
        .events
        .supply_totals()
        .ok_or(LedgerError::ArithmeticOverflow("event log totals"))?;
    if storage.total_burned != totals.burned {
        return Err(LedgerError::InvariantViolation(format!(
            "total burned {} but the event log records {}",
            storage.total_burned, totals.burned
        )));
    }
    let accounted = storage
        .total_supply
        .checked_add(storage.total_burned)
        .ok_or(LedgerError::ArithmeticOverflow("supply plus burned"))?;
    if accounted != totals.minted {
        return Err(LedgerError::InvariantViolation(format!(
            "supply {} plus burned {} but the event log records {} minted",
            storage.total_supply, storage.total_burned, totals.minted
        )));
    }
    Ok(())
}
