//! Shared constants

/// Maximum retained swap records; oldest entries are dropped past this
pub const MAX_SWAP_HISTORY: usize = 5_000;

/// Swap records older than this are pruned by the retention timer (30 days)
pub const SWAP_RECORD_RETENTION_NANOS: u64 = 30 * 24 * 3600 * 1_000_000_000;

/// Interval of the retention timer (1 hour)
pub const HISTORY_PRUNE_INTERVAL_SECS: u64 = 3_600;

/// Memo attached when pulling the caller's source funds
pub const MEMO_SWAP_PULL: &[u8] = b"pegswap swap in";

/// Memo attached when disbursing target funds to the caller
pub const MEMO_SWAP_DISBURSE: &[u8] = b"pegswap swap out";

/// Memo attached when returning pulled funds after a failed disbursement
pub const MEMO_SWAP_REFUND: &[u8] = b"pegswap refund";

/// Memo attached when collecting seeded liquidity
pub const MEMO_LIQUIDITY_ADD: &[u8] = b"pegswap liquidity add";

/// Memo attached when paying out withdrawn liquidity
pub const MEMO_LIQUIDITY_REMOVE: &[u8] = b"pegswap liquidity remove";
