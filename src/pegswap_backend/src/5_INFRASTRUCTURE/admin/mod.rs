//! Admin Controls Module
//!
//! Emergency pause, admin gating for liquidity management, and an audit log
//! of admin actions.
//!
//! The admin principal is captured from the deployer at init (and restored
//! across upgrades); the canister itself also passes the admin check so
//! timer-triggered maintenance can call gated paths.

use candid::Principal;
use std::cell::RefCell;

use crate::infrastructure::errors::{PegSwapError, Result};

thread_local! {
    /// Principal allowed to manage liquidity and toggle the pause
    static ADMIN: RefCell<Option<Principal>> = RefCell::new(None);

    /// Emergency pause state
    static EMERGENCY_PAUSE: RefCell<bool> = RefCell::new(false);

    /// Admin action log storage
    static ADMIN_LOG: RefCell<Vec<AdminAction>> = RefCell::new(Vec::new());
}

const MAX_LOG_ENTRIES: usize = 1_000;

/// Admin action log entry
#[derive(Clone, candid::CandidType, candid::Deserialize, serde::Serialize)]
pub struct AdminAction {
    pub timestamp: u64,
    pub admin: Principal,
    pub action: String,
}

/// Record the admin principal (deployer at init, or a handover)
pub fn set_admin_principal(admin: Principal) {
    ADMIN.with(|a| *a.borrow_mut() = Some(admin));
}

pub fn get_admin() -> Option<Principal> {
    ADMIN.with(|a| *a.borrow())
}

/// Require caller is the admin principal (or the canister itself)
pub fn require_admin() -> Result<()> {
    let caller = ic_cdk::caller();

    let is_admin = ADMIN.with(|a| match *a.borrow() {
        Some(admin) => admin == caller || caller == ic_cdk::id(),
        None => false,
    });

    if is_admin {
        Ok(())
    } else {
        Err(PegSwapError::Other(format!(
            "Authorization failed: {} is not the admin principal",
            caller.to_text()
        )))
    }
}

/// Check if system is paused
pub fn check_not_paused() -> Result<()> {
    EMERGENCY_PAUSE.with(|p| {
        if *p.borrow() {
            Err(PegSwapError::Other(
                "System is emergency paused".to_string(),
            ))
        } else {
            Ok(())
        }
    })
}

pub fn set_pause(paused: bool) {
    EMERGENCY_PAUSE.with(|p| *p.borrow_mut() = paused);
}

pub fn is_paused() -> bool {
    EMERGENCY_PAUSE.with(|p| *p.borrow())
}

/// Log an admin action with the current caller and time
pub fn log_admin_action(action: String) {
    push_admin_action(AdminAction {
        timestamp: ic_cdk::api::time(),
        admin: ic_cdk::caller(),
        action: action.clone(),
    });

    ic_cdk::println!("📝 Admin action: {} by {}", action, ic_cdk::caller());
}

/// Append an entry, keeping only the newest MAX_LOG_ENTRIES
pub fn push_admin_action(entry: AdminAction) {
    ADMIN_LOG.with(|log| {
        let mut log = log.borrow_mut();
        log.push(entry);

        let len = log.len();
        if len > MAX_LOG_ENTRIES {
            log.drain(0..(len - MAX_LOG_ENTRIES));
        }
    });
}

pub fn get_admin_log() -> Vec<AdminAction> {
    ADMIN_LOG.with(|log| log.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_state_default() {
        assert!(!is_paused());
    }

    #[test]
    fn test_pause_toggle() {
        set_pause(true);
        assert!(is_paused());

        set_pause(false);
        assert!(!is_paused());
    }

    #[test]
    fn test_check_not_paused() {
        set_pause(false);
        assert!(check_not_paused().is_ok());

        set_pause(true);
        assert!(check_not_paused().is_err());

        // Reset for other tests
        set_pause(false);
    }

    #[test]
    fn test_admin_defaults_to_unset() {
        assert!(get_admin().is_none());
    }

    #[test]
    fn test_admin_log_is_capped() {
        let admin = Principal::anonymous();
        for i in 0..(MAX_LOG_ENTRIES + 25) {
            push_admin_action(AdminAction {
                timestamp: i as u64,
                admin,
                action: format!("action {}", i),
            });
        }

        let log = get_admin_log();
        assert_eq!(log.len(), MAX_LOG_ENTRIES);
        // oldest entries were drained first
        assert_eq!(log[0].action, "action 25");
    }
}
