// crates/cargocoin-ledger/src/logic.rs
//
// Stateless ledger logic.
//
// A `LedgerLogic` implementation owns no state: every operation receives the
// proxy's `LedgerStorage` by mutable reference plus the calling address, and
// returns the events it emitted. Operations follow a strict
// validate -> write -> emit order. Every check runs before the first write,
// so a returned error leaves storage untouched and its events are discarded
// by the proxy.
//
// The provided method bodies are the CargoCoin behavior. Concrete versions
// (see `versions.rs`) declare their identity and storage layout and may
// override individual hooks.

use primitive_types::U256;
use std::fmt;

use cargocoin_core::{max_supply, Address, Amount, LedgerError, LedgerEvent, Role, BURN_RATE_BPS};

use crate::fees::{self, FeeSplit};
use crate::layout::StorageLayout;
use crate::storage::LedgerStorage;

/// Events emitted by one call, in order.
pub type Emitted = Vec<LedgerEvent>;

/// Executable ledger logic bound behind the proxy.
pub trait LedgerLogic: fmt::Debug + Send + Sync {
    /// Implementation name recorded in the logic pointer.
    fn name(&self) -> &'static str;

    /// Monotonic version number of this implementation.
    fn version(&self) -> u32;

    /// Persistent fields this implementation reads and writes.
    fn storage_layout(&self) -> StorageLayout;

    /// Auto-burn rate in basis points.
    fn burn_rate_bps(&self) -> u64 {
        BURN_RATE_BPS
    }

    /// Cap written to storage by the initializer.
    fn max_supply(&self) -> Amount {
        max_supply()
    }

    /// Populate fields this version appends to the layout. Runs once, at upgrade.
    fn migrate(&self, _storage: &mut LedgerStorage) {}

    /// Gate for `upgrade_to`. The check lives in the implementation, not the proxy.
    fn authorize_upgrade(
        &self,
        storage: &LedgerStorage,
        caller: &Address,
    ) -> Result<(), LedgerError> {
        storage.roles.require(Role::Upgrader, caller)
    }

    /// Pure fee preview: `floor(amount * rate / 10_000)`.
    fn calculate_burn_amount(&self, amount: Amount) -> Amount {
        fees::burn_amount(amount, self.burn_rate_bps())
    }

    /// One-shot initializer.
    ///
    /// Grants ADMIN, PAUSER, and UPGRADER to `admin` and MINTER to `minter`,
    /// writes the supply cap, enables auto-burn, and optionally mints
    /// `initial_supply` to `admin`.
    fn initialize(
        &self,
        storage: &mut LedgerStorage,
        admin: Address,
        minter: Address,
        initial_supply: Option<Amount>,
    ) -> Result<Emitted, LedgerError> {
        if storage.is_initialized() {
            return Err(LedgerError::AlreadyInitialized(storage.initialized_version));
        }
        if admin.is_zero() {
            return Err(LedgerError::InvalidAddress("admin"));
        }
        if minter.is_zero() {
            return Err(LedgerError::InvalidAddress("minter"));
        }
        let cap = self.max_supply();
        let initial = initial_supply.unwrap_or_default();
        if initial > cap {
            return Err(LedgerError::ExceedsMaxSupply {
                requested: initial,
                available: cap,
            });
        }

        storage.initialized_version = self.version();
        storage.max_supply = cap;
        storage.auto_burn_enabled = true;
        storage.paused = false;

        let mut events = vec![LedgerEvent::Initialized {
            version: self.version(),
        }];
        for (role, account) in [
            (Role::Admin, admin),
            (Role::Pauser, admin),
            (Role::Upgrader, admin),
            (Role::Minter, minter),
        ] {
            if storage.roles.grant(role, account) {
                events.push(LedgerEvent::RoleGranted {
                    role,
                    account,
                    sender: admin,
                });
            }
        }

        if !initial.is_zero() {
            let balance = storage.balance_of(&admin);
            storage.set_balance(admin, balance + initial);
            storage.total_supply = storage.total_supply + initial;
            events.push(LedgerEvent::Transfer {
                from: Address::zero(),
                to: admin,
                amount: initial,
            });
            events.push(LedgerEvent::Minted {
                to: admin,
                amount: initial,
            });
        }
        Ok(events)
    }

    /// Create `amount` new base units for `to`. Never charged the burn fee.
    fn mint(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Minter, &caller)?;
        if to.is_zero() {
            return Err(LedgerError::InvalidAddress("to"));
        }
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount("amount"));
        }
        let available = storage.max_supply.saturating_sub(storage.total_supply);
        if amount > available {
            return Err(LedgerError::ExceedsMaxSupply {
                requested: amount,
                available,
            });
        }
        // Cannot overflow: sum(balances) == total_supply <= max_supply - amount.
        let new_balance = storage
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow("mint"))?;

        storage.set_balance(to, new_balance);
        storage.total_supply = storage.total_supply + amount;

        Ok(vec![
            LedgerEvent::Transfer {
                from: Address::zero(),
                to,
                amount,
            },
            LedgerEvent::Minted { to, amount },
        ])
    }

    /// Move `amount` from the caller to `to`, burning the fee if one applies.
    fn transfer(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Emitted, LedgerError> {
        let plan = plan_movement(storage, caller, to, amount, self.burn_rate_bps())?;
        Ok(apply_movement(storage, plan))
    }

    /// Move `amount` from `from` to `to` on behalf of the caller, consuming allowance.
    ///
    /// The allowance is charged for the gross amount; the fee is paid by `from`.
    fn transfer_from(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Emitted, LedgerError> {
        let remaining = check_allowance(storage, &from, &caller, amount)?;
        let plan = plan_movement(storage, from, to, amount, self.burn_rate_bps())?;

        if let Some(left) = remaining {
            storage.set_allowance(from, caller, left);
        }
        Ok(apply_movement(storage, plan))
    }

    /// Set the caller's allowance for `spender`, overwriting any previous value.
    fn approve(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Emitted, LedgerError> {
        if caller.is_zero() {
            return Err(LedgerError::InvalidAddress("owner"));
        }
        if spender.is_zero() {
            return Err(LedgerError::InvalidAddress("spender"));
        }
        storage.set_allowance(caller, spender, amount);
        Ok(vec![LedgerEvent::Approval {
            owner: caller,
            spender,
            amount,
        }])
    }

    /// Destroy `amount` of the caller's own balance.
    ///
    /// Permitted while paused and regardless of the auto-burn switch.
    fn burn(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        amount: Amount,
    ) -> Result<Emitted, LedgerError> {
        let remaining = check_balance(storage, &caller, amount)?;
        let burned_after = check_burn_counter(storage, amount)?;
        Ok(apply_burn(storage, caller, remaining, burned_after, amount))
    }

    /// Destroy `amount` of `owner`'s balance using the caller's allowance.
    fn burn_from(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        owner: Address,
        amount: Amount,
    ) -> Result<Emitted, LedgerError> {
        let allowance_left = check_allowance(storage, &owner, &caller, amount)?;
        let balance_left = check_balance(storage, &owner, amount)?;
        let burned_after = check_burn_counter(storage, amount)?;

        if let Some(left) = allowance_left {
            storage.set_allowance(owner, caller, left);
        }
        Ok(apply_burn(storage, owner, balance_left, burned_after, amount))
    }

    /// Toggle the global auto-burn switch. Emits even when the value is unchanged.
    fn set_auto_burn_enabled(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        enabled: bool,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Admin, &caller)?;
        storage.auto_burn_enabled = enabled;
        Ok(vec![LedgerEvent::AutoBurnStatusUpdated { enabled }])
    }

    /// Add or remove `account` from the exemption set. Emits even when unchanged.
    fn set_burn_exemption(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        account: Address,
        exempt: bool,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Admin, &caller)?;
        if account.is_zero() {
            return Err(LedgerError::InvalidAddress("account"));
        }
        if exempt {
            storage.burn_exempt.insert(account);
        } else {
            storage.burn_exempt.remove(&account);
        }
        Ok(vec![LedgerEvent::BurnExemptionUpdated { account, exempt }])
    }

    /// Grant `role` to `account`. Emits only when membership changes.
    fn grant_role(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Admin, &caller)?;
        let mut events = Vec::new();
        if storage.roles.grant(role, account) {
            events.push(LedgerEvent::RoleGranted {
                role,
                account,
                sender: caller,
            });
        }
        Ok(events)
    }

    /// Revoke `role` from `account`. Emits only when membership changes.
    fn revoke_role(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Admin, &caller)?;
        let mut events = Vec::new();
        if storage.roles.revoke(role, &account) {
            events.push(LedgerEvent::RoleRevoked {
                role,
                account,
                sender: caller,
            });
        }
        Ok(events)
    }

    /// Drop one of the caller's own roles. No role is required.
    fn renounce_role(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        role: Role,
    ) -> Result<Emitted, LedgerError> {
        let mut events = Vec::new();
        if storage.roles.revoke(role, &caller) {
            events.push(LedgerEvent::RoleRevoked {
                role,
                account: caller,
                sender: caller,
            });
        }
        Ok(events)
    }

    fn add_minter(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        account: Address,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Admin, &caller)?;
        if account.is_zero() {
            return Err(LedgerError::InvalidAddress("minter"));
        }
        self.grant_role(storage, caller, Role::Minter, account)
    }

    fn remove_minter(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        account: Address,
    ) -> Result<Emitted, LedgerError> {
        self.revoke_role(storage, caller, Role::Minter, account)
    }

    /// Halt transfers. Fails if already paused.
    fn pause(&self, storage: &mut LedgerStorage, caller: Address) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Pauser, &caller)?;
        if storage.paused {
            return Err(LedgerError::EnforcedPause);
        }
        storage.paused = true;
        Ok(vec![LedgerEvent::Paused { account: caller }])
    }

    /// Resume transfers. Fails if not paused.
    fn unpause(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Pauser, &caller)?;
        if !storage.paused {
            return Err(LedgerError::ExpectedPause);
        }
        storage.paused = false;
        Ok(vec![LedgerEvent::Unpaused { account: caller }])
    }

    /// Record the bridge contract address. Requires a layout with `bridge_address`.
    fn set_bridge_address(
        &self,
        storage: &mut LedgerStorage,
        caller: Address,
        bridge: Address,
    ) -> Result<Emitted, LedgerError> {
        storage.roles.require(Role::Admin, &caller)?;
        if !self.storage_layout().contains("bridge_address") {
            return Err(LedgerError::UnsupportedOperation(
                "set_bridge_address",
                self.name().to_string(),
            ));
        }
        if bridge.is_zero() {
            return Err(LedgerError::InvalidAddress("bridge"));
        }
        storage.bridge_address = Some(bridge);
        Ok(vec![LedgerEvent::BridgeAddressUpdated { bridge }])
    }
}

/// Fully validated effects of an account-to-account movement.
#[derive(Debug, Clone, Copy)]
struct Movement {
    from: Address,
    to: Address,
    from_after: Amount,
    to_after: Amount,
    split: FeeSplit,
    total_burned_after: Amount,
}

/// Validate an account-to-account movement and compute its effects.
///
/// Check order: receiver, pause, balance.
fn plan_movement(
    storage: &LedgerStorage,
    from: Address,
    to: Address,
    amount: Amount,
    rate_bps: u64,
) -> Result<Movement, LedgerError> {
    if from.is_zero() {
        return Err(LedgerError::InvalidAddress("from"));
    }
    if to.is_zero() {
        return Err(LedgerError::InvalidAddress("to"));
    }
    if storage.paused {
        return Err(LedgerError::EnforcedPause);
    }
    let from_after = check_balance(storage, &from, amount)?;

    let charge = storage.auto_burn_enabled && !storage.is_burn_exempt(&from);
    let split = fees::split(amount, rate_bps, charge);

    let to_after = if to == from {
        from_after + split.net
    } else {
        storage
            .balance_of(&to)
            .checked_add(split.net)
            .ok_or(LedgerError::ArithmeticOverflow("transfer credit"))?
    };
    let total_burned_after = check_burn_counter(storage, split.burn)?;

    Ok(Movement {
        from,
        to,
        from_after,
        to_after,
        split,
        total_burned_after,
    })
}

fn apply_movement(storage: &mut LedgerStorage, m: Movement) -> Emitted {
    // For self-transfers `to_after` already accounts for the debit.
    storage.set_balance(m.from, m.from_after);
    storage.set_balance(m.to, m.to_after);
    storage.total_supply = storage.total_supply - m.split.burn;
    storage.total_burned = m.total_burned_after;

    let mut events = vec![LedgerEvent::Transfer {
        from: m.from,
        to: m.to,
        amount: m.split.net,
    }];
    if !m.split.burn.is_zero() {
        events.push(LedgerEvent::AutoBurn {
            from: m.from,
            to: m.to,
            amount: m.split.burn,
        });
    }
    events
}

fn apply_burn(
    storage: &mut LedgerStorage,
    owner: Address,
    remaining: Amount,
    burned_after: Amount,
    amount: Amount,
) -> Emitted {
    storage.set_balance(owner, remaining);
    storage.total_supply = storage.total_supply - amount;
    storage.total_burned = burned_after;
    vec![
        LedgerEvent::Transfer {
            from: owner,
            to: Address::zero(),
            amount,
        },
        LedgerEvent::Burned {
            from: owner,
            amount,
        },
    ]
}

/// Balance left after debiting `amount`, or `InsufficientBalance`.
fn check_balance(
    storage: &LedgerStorage,
    account: &Address,
    amount: Amount,
) -> Result<Amount, LedgerError> {
    let balance = storage.balance_of(account);
    balance
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientBalance {
            account: *account,
            balance,
            needed: amount,
        })
}

fn check_burn_counter(storage: &LedgerStorage, amount: Amount) -> Result<Amount, LedgerError> {
    storage
        .total_burned
        .checked_add(amount)
        .ok_or(LedgerError::ArithmeticOverflow("total burned"))
}

/// Allowance left after spending `amount`. `None` means unlimited (`U256::MAX`).
fn check_allowance(
    storage: &LedgerStorage,
    owner: &Address,
    spender: &Address,
    amount: Amount,
) -> Result<Option<Amount>, LedgerError> {
    let allowance = storage.allowance(owner, spender);
    if allowance == U256::MAX {
        return Ok(None);
    }
    allowance
        .checked_sub(amount)
        .map(Some)
        .ok_or(LedgerError::InsufficientAllowance {
            spender: *spender,
            allowance,
            needed: amount,
        })
}
