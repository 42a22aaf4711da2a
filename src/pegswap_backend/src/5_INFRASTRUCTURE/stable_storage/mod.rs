//! Stable storage management for upgrade persistence

use candid::{CandidType, Deserialize, Principal};

use crate::_1_CRITICAL_OPERATIONS::swapping::swap_history::SwapRecord;
use crate::_2_CRITICAL_DATA::ledger::LedgerEntry;

#[derive(CandidType, Deserialize, Default)]
pub struct StableState {
    pub admin: Option<Principal>,
    pub paused: bool,
    pub ledger_entries: Vec<LedgerEntry>,
    pub swap_history: Vec<SwapRecord>,
}

pub fn save_state(state: StableState) {
    ic_cdk::println!(
        "💾 Saving {} ledger entries and {} swap records to stable storage",
        state.ledger_entries.len(),
        state.swap_history.len()
    );

    // A failed save must not trap the upgrade; the ledger would be lost, but
    // a wedged canister is worse
    match ic_cdk::storage::stable_save((state,)) {
        Ok(_) => {
            ic_cdk::println!("✅ Successfully saved state to stable memory");
        }
        Err(e) => {
            ic_cdk::println!("⚠️ WARNING: Failed to save state to stable memory: {}", e);
        }
    }
}

pub fn restore_state() -> StableState {
    match ic_cdk::storage::stable_restore::<(StableState,)>() {
        Ok((state,)) => {
            ic_cdk::println!(
                "✅ Restored {} ledger entries and {} swap records from stable storage",
                state.ledger_entries.len(),
                state.swap_history.len()
            );
            state
        }
        Err(e) => {
            ic_cdk::println!(
                "⚠️  No stable state to restore (first deployment or empty): {}",
                e
            );
            StableState::default()
        }
    }
}
