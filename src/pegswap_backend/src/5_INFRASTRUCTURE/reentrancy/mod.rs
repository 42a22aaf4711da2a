//! Reentrancy guards for critical operations
//! Prevents a single caller from interleaving two mutating calls while an
//! earlier one is suspended at an inter-canister await

use candid::Principal;
use std::cell::RefCell;
use std::collections::HashSet;

use crate::infrastructure::errors::{PegSwapError, Result, SystemError};

thread_local! {
    /// Callers with a swap currently in flight
    static ACTIVE_SWAPS: RefCell<HashSet<Principal>> = RefCell::new(HashSet::new());

    /// Callers with a liquidity operation currently in flight
    static ACTIVE_LIQUIDITY_OPS: RefCell<HashSet<Principal>> = RefCell::new(HashSet::new());
}

/// Guard held for the duration of one swap call
pub struct SwapGuard {
    user: Principal,
}

impl SwapGuard {
    pub fn acquire(user: Principal) -> Result<Self> {
        let acquired = ACTIVE_SWAPS.with(|swaps| {
            let mut swaps = swaps.borrow_mut();
            if swaps.contains(&user) {
                false
            } else {
                swaps.insert(user);
                true
            }
        });

        if acquired {
            Ok(SwapGuard { user })
        } else {
            Err(PegSwapError::System(SystemError::OperationInProgress {
                operation: "swap".to_string(),
                user: user.to_text(),
            }))
        }
    }
}

impl Drop for SwapGuard {
    fn drop(&mut self) {
        ACTIVE_SWAPS.with(|swaps| {
            swaps.borrow_mut().remove(&self.user);
        });
    }
}

/// Guard held for the duration of one add/remove liquidity call
pub struct LiquidityGuard {
    user: Principal,
}

impl LiquidityGuard {
    pub fn acquire(user: Principal) -> Result<Self> {
        let acquired = ACTIVE_LIQUIDITY_OPS.with(|ops| {
            let mut ops = ops.borrow_mut();
            if ops.contains(&user) {
                false
            } else {
                ops.insert(user);
                true
            }
        });

        if acquired {
            Ok(LiquidityGuard { user })
        } else {
            Err(PegSwapError::System(SystemError::OperationInProgress {
                operation: "liquidity operation".to_string(),
                user: user.to_text(),
            }))
        }
    }
}

impl Drop for LiquidityGuard {
    fn drop(&mut self) {
        ACTIVE_LIQUIDITY_OPS.with(|ops| {
            ops.borrow_mut().remove(&self.user);
        });
    }
}
