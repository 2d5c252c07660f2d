// crates/cargocoin-ledger/src/event_log.rs
//
// Append-only event log written by the proxy after each committed call.
// Indexers poll it with a cursor (`since`) rather than receiving return values.

use serde::{Deserialize, Serialize};

use cargocoin_core::{Amount, LedgerEvent};

/// An event with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Zero-based, gap-free sequence number.
    pub seq: u64,
    /// Sequence number of the call that emitted this event.
    pub call: u64,
    #[serde(flatten)]
    pub event: LedgerEvent,
}

/// Cumulative minted and burned amounts recorded in a log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplyTotals {
    pub minted: Amount,
    pub burned: Amount,
}

/// Ordered event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<RecordedEvent>,
    calls_committed: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the events of one committed call, in emission order.
    pub fn commit(&mut self, events: Vec<LedgerEvent>) {
        let call = self.calls_committed;
        self.calls_committed += 1;
        for event in events {
            let seq = self.entries.len() as u64;
            self.entries.push(RecordedEvent { seq, call, event });
        }
    }

    pub fn entries(&self) -> &[RecordedEvent] {
        &self.entries
    }

    /// Events with `seq >= cursor`.
    pub fn since(&self, cursor: u64) -> &[RecordedEvent] {
        let start = (cursor as usize).min(self.entries.len());
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of calls that committed, including those that emitted nothing.
    pub fn calls_committed(&self) -> u64 {
        self.calls_committed
    }

    pub fn last(&self) -> Option<&LedgerEvent> {
        self.entries.last().map(|r| &r.event)
    }

    /// Sum `Minted`, `AutoBurn`, and `Burned` amounts. `None` on overflow.
    pub fn supply_totals(&self) -> Option<SupplyTotals> {
        self.entries
            .iter()
            .try_fold(SupplyTotals::default(), |mut totals, r| {
                match &r.event {
                    LedgerEvent::Minted { amount, .. } => {
                        totals.minted = totals.minted.checked_add(*amount)?;
                    }
                    LedgerEvent::AutoBurn { amount, .. } | LedgerEvent::Burned { amount, .. } => {
                        totals.burned = totals.burned.checked_add(*amount)?;
                    }
                    _ => {}
                }
                Some(totals)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_are_contiguous() {
        let mut log = EventLog::new();
        log.commit(vec![
            LedgerEvent::AutoBurnStatusUpdated { enabled: false },
            LedgerEvent::AutoBurnStatusUpdated { enabled: true },
        ]);
        log.commit(vec![LedgerEvent::Initialized { version: 1 }]);

        let seqs: Vec<u64> = log.entries().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        let calls: Vec<u64> = log.entries().iter().map(|r| r.call).collect();
        assert_eq!(calls, vec![0, 0, 1]);
    }

    #[test]
    fn test_since_cursor() {
        let mut log = EventLog::new();
        log.commit(vec![LedgerEvent::Initialized { version: 1 }]);
        log.commit(vec![LedgerEvent::AutoBurnStatusUpdated { enabled: true }]);
        assert_eq!(log.since(1).len(), 1);
        assert_eq!(log.since(0).len(), 2);
        assert!(log.since(99).is_empty());
    }

    #[test]
    fn test_empty_commit_counts_call() {
        let mut log = EventLog::new();
        log.commit(Vec::new());
        assert!(log.is_empty());
        assert_eq!(log.calls_committed(), 1);
    }

    #[test]
    fn test_supply_totals_sum_mints_and_burns() {
        use primitive_types::U256;
        let a = cargocoin_core::Address::repeat_byte(1);
        let b = cargocoin_core::Address::repeat_byte(2);
        let mut log = EventLog::new();
        log.commit(vec![LedgerEvent::Minted {
            to: a,
            amount: U256::from(1_000),
        }]);
        log.commit(vec![
            LedgerEvent::Transfer {
                from: a,
                to: b,
                amount: U256::from(98),
            },
            LedgerEvent::AutoBurn {
                from: a,
                to: b,
                amount: U256::from(2),
            },
        ]);
        log.commit(vec![LedgerEvent::Burned {
            from: b,
            amount: U256::from(8),
        }]);

        let totals = log.supply_totals().unwrap();
        assert_eq!(totals.minted, U256::from(1_000));
        assert_eq!(totals.burned, U256::from(10));
    }
}
