// crates/cargocoin-ledger/src/roles.rs
//
// Role registry: a mapping from role tag to the set of addresses holding it.
// Privileged operations call `require` as a guard before touching any state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use cargocoin_core::{Address, LedgerError, Role};

/// Role membership for the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    members: BTreeMap<Role, BTreeSet<Address>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|set| set.contains(account))
    }

    /// Fail with `Unauthorized` unless `account` holds `role`.
    pub fn require(&self, role: Role, account: &Address) -> Result<(), LedgerError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                account: *account,
                role,
            })
        }
    }

    /// Add `account` to `role`. Returns true if membership changed.
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Remove `account` from `role`. Returns true if membership changed.
    pub fn revoke(&mut self, role: Role, account: &Address) -> bool {
        match self.members.get_mut(&role) {
            Some(set) => {
                let removed = set.remove(account);
                if set.is_empty() {
                    self.members.remove(&role);
                }
                removed
            }
            None => false,
        }
    }

    /// Roles held by `account`.
    pub fn roles_of(&self, account: &Address) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.has_role(*role, account))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_and_check() {
        let mut reg = RoleRegistry::new();
        let a = Address::repeat_byte(1);
        assert!(!reg.has_role(Role::Minter, &a));
        assert!(reg.grant(Role::Minter, a));
        assert!(reg.has_role(Role::Minter, &a));
        assert!(!reg.has_role(Role::Admin, &a));
    }

    #[test]
    fn test_grant_twice_reports_no_change() {
        let mut reg = RoleRegistry::new();
        let a = Address::repeat_byte(1);
        assert!(reg.grant(Role::Pauser, a));
        assert!(!reg.grant(Role::Pauser, a));
        assert_eq!(reg.roles_of(&a), vec![Role::Pauser]);
    }

    #[test]
    fn test_revoke() {
        let mut reg = RoleRegistry::new();
        let a = Address::repeat_byte(1);
        reg.grant(Role::Upgrader, a);
        assert!(reg.revoke(Role::Upgrader, &a));
        assert!(!reg.revoke(Role::Upgrader, &a));
        assert!(reg.roles_of(&a).is_empty());
        assert!(reg.members.is_empty());
    }

    #[test]
    fn test_require_unauthorized() {
        let reg = RoleRegistry::new();
        let a = Address::repeat_byte(9);
        let err = reg.require(Role::Admin, &a).unwrap_err();
        assert_eq!(
            err,
            LedgerError::Unauthorized {
                account: a,
                role: Role::Admin
            }
        );
    }

    #[test]
    fn test_roles_of() {
        let mut reg = RoleRegistry::new();
        let a = Address::repeat_byte(1);
        reg.grant(Role::Upgrader, a);
        reg.grant(Role::Admin, a);
        assert_eq!(reg.roles_of(&a), vec![Role::Admin, Role::Upgrader]);
    }
}
