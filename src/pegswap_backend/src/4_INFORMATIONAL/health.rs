//! Operational health snapshot

use candid::Nat;

use crate::types::common::HealthStatus;
use crate::_1_CRITICAL_OPERATIONS::swapping::swap_history;
use crate::_2_CRITICAL_DATA::ledger::with_ledger;

pub fn get_health_status() -> HealthStatus {
    HealthStatus {
        paused: crate::infrastructure::is_paused(),
        tracked_pairs: with_ledger(|ledger| ledger.pair_count()) as u64,
        recorded_swaps: swap_history::history_len() as u64,
        cycles_balance: Nat::from(ic_cdk::api::canister_balance128()),
        timestamp: ic_cdk::api::time(),
    }
}
