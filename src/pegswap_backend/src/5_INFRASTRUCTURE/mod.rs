//! Infrastructure - Shared utilities and types
//! Foundation layer for all other modules

pub mod admin;
pub mod constants;
pub mod errors;
pub mod math;
pub mod reentrancy;
pub mod stable_storage;

// Re-export commonly used items
pub use admin::{
    check_not_paused, get_admin, get_admin_log, set_admin_principal, is_paused, log_admin_action,
    require_admin, set_pause, AdminAction,
};
pub use constants::*;
pub use errors::{
    CalculationError, LiquidityError, PegSwapError, QueryError, Result, SwapError, SystemError,
    TransferError, ValidationError,
};
pub use math::{convert_precision, nat_to_u128, u128_to_nat};
pub use reentrancy::{LiquidityGuard, SwapGuard};
