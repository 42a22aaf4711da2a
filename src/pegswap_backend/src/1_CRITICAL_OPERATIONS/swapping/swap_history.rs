//! Bounded log of completed swaps
//!
//! Newest-last; capped at insert, age-pruned by the retention timer, and
//! carried across upgrades through stable storage.

use candid::{CandidType, Deserialize, Nat, Principal};
use serde::Serialize;
use std::cell::RefCell;

use crate::infrastructure::constants::MAX_SWAP_HISTORY;

#[derive(CandidType, Deserialize, Serialize, Clone, Debug)]
pub struct SwapRecord {
    pub timestamp: u64,
    pub caller: Principal,
    pub source: Principal,
    pub target: Principal,
    pub amount_in: Nat,
    pub amount_out: Nat,
}

thread_local! {
    static SWAP_HISTORY: RefCell<Vec<SwapRecord>> = RefCell::new(Vec::new());
}

/// Append a record, dropping the oldest past the cap
pub fn record_swap(record: SwapRecord) {
    SWAP_HISTORY.with(|history| {
        let mut history = history.borrow_mut();
        history.push(record);

        let len = history.len();
        if len > MAX_SWAP_HISTORY {
            history.drain(0..(len - MAX_SWAP_HISTORY));
        }
    });
}

pub fn get_full_history() -> Vec<SwapRecord> {
    SWAP_HISTORY.with(|history| history.borrow().clone())
}

pub fn history_len() -> usize {
    SWAP_HISTORY.with(|history| history.borrow().len())
}

/// Drop records recorded strictly before `cutoff`; returns how many went
pub fn prune_older_than(cutoff: u64) -> usize {
    SWAP_HISTORY.with(|history| {
        let mut history = history.borrow_mut();
        let before = history.len();
        history.retain(|record| record.timestamp >= cutoff);
        before - history.len()
    })
}

pub fn export_history() -> Vec<SwapRecord> {
    get_full_history()
}

pub fn load_history(records: Vec<SwapRecord>) {
    SWAP_HISTORY.with(|history| *history.borrow_mut() = records);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: u64) -> SwapRecord {
        SwapRecord {
            timestamp,
            caller: Principal::anonymous(),
            source: Principal::from_text("aaaaa-aa").unwrap(),
            target: Principal::from_text("2vxsx-fae").unwrap(),
            amount_in: Nat::from(1u64),
            amount_out: Nat::from(1u64),
        }
    }

    #[test]
    fn test_history_is_capped() {
        load_history(Vec::new());
        for i in 0..(MAX_SWAP_HISTORY + 10) {
            record_swap(record(i as u64));
        }

        assert_eq!(history_len(), MAX_SWAP_HISTORY);
        // oldest records were dropped first
        assert_eq!(get_full_history()[0].timestamp, 10);
    }

    #[test]
    fn test_prune_drops_only_expired() {
        load_history(vec![record(5), record(50), record(500)]);

        let removed = prune_older_than(50);
        assert_eq!(removed, 1);

        let remaining = get_full_history();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|r| r.timestamp >= 50));
    }

    #[test]
    fn test_load_replaces_history() {
        load_history(vec![record(1), record(2)]);
        assert_eq!(history_len(), 2);

        load_history(Vec::new());
        assert_eq!(history_len(), 0);
    }
}
