use candid::{CandidType, Deserialize, Nat};
use serde::Serialize;

/// Operational snapshot for monitoring
#[derive(CandidType, Deserialize, Serialize, Debug, Clone)]
pub struct HealthStatus {
    pub paused: bool,
    pub tracked_pairs: u64,
    pub recorded_swaps: u64,
    pub cycles_balance: Nat,
    pub timestamp: u64,
}
