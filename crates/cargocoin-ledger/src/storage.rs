// crates/cargocoin-ledger/src/storage.rs
//
// Persistent ledger state.
//
// `LedgerStorage` is the proxy-owned half of the proxy/implementation split:
// it holds every balance, allowance, role, and configuration value and
// survives logic upgrades untouched. Logic versions operate on a mutable
// reference to it and never own state of their own.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use cargocoin_core::{Address, Amount, LedgerError};

use crate::layout::StorageLayout;
use crate::roles::RoleRegistry;

/// Identity of the logic version the proxy currently routes to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationId {
    pub name: String,
    pub version: u32,
}

/// All persistent state of one ledger instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStorage {
    /// Zero until the initializer has run.
    pub initialized_version: u32,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
    pub total_supply: Amount,
    pub max_supply: Amount,
    pub total_burned: Amount,
    pub auto_burn_enabled: bool,
    pub burn_exempt: BTreeSet<Address>,
    pub roles: RoleRegistry,
    pub paused: bool,

    /// Appended by the L1 layout.
    #[serde(default)]
    pub bridge_address: Option<Address>,

    /// Logic pointer and the schema it declared.
    pub implementation: ImplementationId,
    pub layout: StorageLayout,
}

impl LedgerStorage {
    /// Empty, uninitialized storage.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized_version > 0
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Overwrite a balance. Zero balances are dropped from the map.
    pub(crate) fn set_balance(&mut self, account: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn set_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            if let Some(m) = self.allowances.get_mut(&owner) {
                m.remove(&spender);
                if m.is_empty() {
                    self.allowances.remove(&owner);
                }
            }
        } else {
            self.allowances.entry(owner).or_default().insert(spender, amount);
        }
    }

    pub fn is_burn_exempt(&self, account: &Address) -> bool {
        self.burn_exempt.contains(account)
    }

    /// Non-zero balances in address order.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Sum of all balances, or `None` if it does not fit in 256 bits.
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(U256::zero(), |acc, b| acc.checked_add(*b))
    }

    /// Check `sum(balances) == total_supply <= max_supply`.
    pub fn check_supply_invariant(&self) -> Result<(), LedgerError> {
        let sum = self
            .sum_of_balances()
            .ok_or(LedgerError::ArithmeticOverflow("sum of balances"))?;
        if sum != self.total_supply {
            return Err(LedgerError::InvariantViolation(format!(
                "balances sum to {} but total supply is {}",
                sum, self.total_supply
            )));
        }
        if self.total_supply > self.max_supply {
            return Err(LedgerError::InvariantViolation(format!(
                "total supply {} exceeds max supply {}",
                self.total_supply, self.max_supply
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_storage_is_uninitialized_and_empty() {
        let s = LedgerStorage::new();
        assert!(!s.is_initialized());
        assert_eq!(s.total_supply, U256::zero());
        assert_eq!(s.balances().count(), 0);
        assert!(s.check_supply_invariant().is_ok());
    }

    #[test]
    fn test_zero_balances_are_pruned() {
        let mut s = LedgerStorage::new();
        let a = Address::repeat_byte(1);
        s.set_balance(a, U256::from(5));
        assert_eq!(s.balances().count(), 1);
        s.set_balance(a, U256::zero());
        assert_eq!(s.balances().count(), 0);
        assert_eq!(s.balance_of(&a), U256::zero());
    }

    #[test]
    fn test_allowance_set_and_clear() {
        let mut s = LedgerStorage::new();
        let owner = Address::repeat_byte(1);
        let spender = Address::repeat_byte(2);
        s.set_allowance(owner, spender, U256::from(7));
        assert_eq!(s.allowance(&owner, &spender), U256::from(7));
        assert_eq!(s.allowance(&spender, &owner), U256::zero());
        s.set_allowance(owner, spender, U256::zero());
        assert_eq!(s.allowance(&owner, &spender), U256::zero());
    }

    #[test]
    fn test_invariant_detects_mismatch() {
        let mut s = LedgerStorage::new();
        s.max_supply = U256::from(100);
        s.set_balance(Address::repeat_byte(1), U256::from(10));
        assert!(s.check_supply_invariant().is_err());
        s.total_supply = U256::from(10);
        assert!(s.check_supply_invariant().is_ok());
    }

    #[test]
    fn test_json_snapshot_preserves_state() {
        let mut s = LedgerStorage::new();
        let a = Address::repeat_byte(3);
        let b = Address::repeat_byte(4);
        s.initialized_version = 1;
        s.set_balance(a, U256::from(42));
        s.set_allowance(a, b, U256::from(9));
        s.total_supply = U256::from(42);
        s.burn_exempt.insert(b);
        s.roles.grant(cargocoin_core::Role::Minter, a);

        let json = serde_json::to_string(&s).unwrap();
        let back: LedgerStorage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
