// crates/cargocoin-ledger/tests/supply_invariants.rs
//
// Property tests: arbitrary call sequences never break supply accounting, and
// a rejected call never changes storage.

use std::sync::Arc;

use primitive_types::U256;
use proptest::prelude::*;

use cargocoin_core::Address;
use cargocoin_ledger::{burn_amount, CargoCoinV1, Ledger};

const ADMIN: u8 = 0xa1;
const MINTER: u8 = 0xb2;

#[derive(Debug, Clone)]
enum Op {
    Mint { to: u8, amount: u64 },
    Transfer { from: u8, to: u8, amount: u64 },
    Approve { owner: u8, spender: u8, amount: u64 },
    TransferFrom { spender: u8, from: u8, to: u8, amount: u64 },
    Burn { from: u8, amount: u64 },
    SetExempt { account: u8, exempt: bool },
    SetAutoBurn { enabled: bool },
    TogglePause,
}

fn account() -> impl Strategy<Value = u8> {
    1u8..=4
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (account(), 0u64..1_000_000).prop_map(|(to, amount)| Op::Mint { to, amount }),
        (account(), account(), 0u64..500_000)
            .prop_map(|(from, to, amount)| Op::Transfer { from, to, amount }),
        (account(), account(), 0u64..500_000).prop_map(|(owner, spender, amount)| {
            Op::Approve {
                owner,
                spender,
                amount,
            }
        }),
        (account(), account(), account(), 0u64..500_000).prop_map(
            |(spender, from, to, amount)| Op::TransferFrom {
                spender,
                from,
                to,
                amount,
            }
        ),
        (account(), 0u64..500_000).prop_map(|(from, amount)| Op::Burn { from, amount }),
        (account(), any::<bool>()).prop_map(|(account, exempt)| Op::SetExempt { account, exempt }),
        any::<bool>().prop_map(|enabled| Op::SetAutoBurn { enabled }),
        Just(Op::TogglePause),
    ]
}

fn addr(b: u8) -> Address {
    Address::repeat_byte(b)
}

fn apply(ledger: &mut Ledger, op: &Op) -> Result<(), cargocoin_core::LedgerError> {
    let admin = addr(ADMIN);
    match *op {
        Op::Mint { to, amount } => ledger.mint(addr(MINTER), addr(to), U256::from(amount)),
        Op::Transfer { from, to, amount } => {
            ledger.transfer(addr(from), addr(to), U256::from(amount))
        }
        Op::Approve {
            owner,
            spender,
            amount,
        } => ledger.approve(addr(owner), addr(spender), U256::from(amount)),
        Op::TransferFrom {
            spender,
            from,
            to,
            amount,
        } => ledger.transfer_from(addr(spender), addr(from), addr(to), U256::from(amount)),
        Op::Burn { from, amount } => ledger.burn(addr(from), U256::from(amount)),
        Op::SetExempt { account, exempt } => {
            ledger.set_burn_exemption(admin, addr(account), exempt)
        }
        Op::SetAutoBurn { enabled } => ledger.set_auto_burn_enabled(admin, enabled),
        Op::TogglePause => {
            if ledger.paused() {
                ledger.unpause(admin)
            } else {
                ledger.pause(admin)
            }
        }
    }
}

fn fresh() -> Ledger {
    let mut ledger = Ledger::deploy(Arc::new(CargoCoinV1));
    ledger.initialize(addr(ADMIN), addr(MINTER), None).unwrap();
    ledger
}

proptest! {
    #[test]
    fn prop_supply_accounting_holds(ops in prop::collection::vec(op(), 1..60)) {
        let mut ledger = fresh();
        let mut minted = U256::zero();

        for op in &ops {
            let before = ledger.storage().clone();
            let events_before = ledger.events().len();
            match apply(&mut ledger, op) {
                Ok(()) => {
                    if let Op::Mint { amount, .. } = op {
                        minted += U256::from(*amount);
                    }
                }
                Err(_) => {
                    prop_assert_eq!(ledger.storage(), &before);
                    prop_assert_eq!(ledger.events().len(), events_before);
                }
            }

            prop_assert!(ledger.storage().check_supply_invariant().is_ok());
            prop_assert!(ledger.total_supply() <= ledger.max_supply());
            prop_assert_eq!(ledger.total_supply() + ledger.total_burned(), minted);
        }
    }

    #[test]
    fn prop_transfer_conserves_gross_amount(amount in 0u64..10_000_000, exempt in any::<bool>()) {
        let mut ledger = fresh();
        ledger.mint(addr(MINTER), addr(1), U256::from(10_000_000u64)).unwrap();
        ledger.set_burn_exemption(addr(ADMIN), addr(1), exempt).unwrap();

        ledger.transfer(addr(1), addr(2), U256::from(amount)).unwrap();

        let received = ledger.balance_of(&addr(2));
        let spent = U256::from(10_000_000u64) - ledger.balance_of(&addr(1));
        prop_assert_eq!(spent, U256::from(amount));
        prop_assert_eq!(received + ledger.total_burned(), U256::from(amount));
        if exempt {
            prop_assert_eq!(ledger.total_burned(), U256::zero());
        } else {
            prop_assert_eq!(ledger.total_burned(), burn_amount(U256::from(amount), 200));
        }
    }

    #[test]
    fn prop_burn_preview_is_floor_of_two_percent(amount in any::<u128>()) {
        let ledger = fresh();
        let amount = U256::from(amount);
        // 200 / 10_000 == 1 / 50
        prop_assert_eq!(ledger.calculate_burn_amount(amount), amount / U256::from(50));
    }
}
