// crates/cargocoin-ledger/src/shared.rs
//
// Thread-safe handle to a single ledger.
//
// Calls from concurrent callers are totally ordered by the lock: each call
// runs to completion against the ledger before the next one starts, so no
// caller ever observes a partially applied call. There is no queueing inside
// the ledger itself; ordering between two callers is whatever order they
// acquire the lock in.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::proxy::Ledger;

/// Cloneable, shareable ledger handle.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::CargoCoinV1;
    use cargocoin_core::Address;
    use primitive_types::U256;
    use std::thread;

    #[test]
    fn test_concurrent_transfers_preserve_supply_invariant() {
        let admin = Address::repeat_byte(0xa1);
        let minter = Address::repeat_byte(0xb2);
        let mut ledger = Ledger::deploy(Arc::new(CargoCoinV1));
        ledger.initialize(admin, minter, None).unwrap();

        let senders: Vec<Address> = (1..=4).map(Address::repeat_byte).collect();
        for s in &senders {
            ledger.mint(minter, *s, U256::from(100_000)).unwrap();
        }
        let shared = SharedLedger::new(ledger);

        let handles: Vec<_> = senders
            .iter()
            .enumerate()
            .map(|(i, from)| {
                let shared = shared.clone();
                let from = *from;
                let to = Address::repeat_byte(0x10 + i as u8);
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared
                            .with(|l| l.transfer(from, to, U256::from(1_000)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        shared.with(|l| {
            assert!(l.storage().check_supply_invariant().is_ok());
            // 4 senders * 50 transfers * 20 burned each
            assert_eq!(l.total_burned(), U256::from(4_000));
            assert_eq!(l.total_supply(), U256::from(400_000 - 4_000));
        });
    }

    #[test]
    fn test_panicking_caller_does_not_lock_out_others() {
        let shared = SharedLedger::new(Ledger::deploy(Arc::new(CargoCoinV1)));
        let other = shared.clone();
        let result = thread::spawn(move || {
            other.with(|_ledger: &mut Ledger| -> () { panic!("caller failed mid-call") })
        })
        .join();
        assert!(result.is_err());

        let admin = Address::repeat_byte(0xa1);
        shared
            .with(|l| l.initialize(admin, admin, None))
            .unwrap();
        assert!(shared.with(|l| l.is_initialized()));
    }
}
