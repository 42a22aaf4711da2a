//! PegSwap Backend - Security-First Architecture with Numbered Zones
//!
//! Architecture:
//! 1_CRITICAL_OPERATIONS - Swap execution, liquidity management (highest security)
//! 2_CRITICAL_DATA - Directional liquidity ledger
//! 3_TOKEN_GATEWAY - ICRC ledger interactions
//! 4_INFORMATIONAL - Display and health reporting
//! 5_INFRASTRUCTURE - Math, errors, guards, admin, stable storage

// Import numbered modules with explicit paths
#[path = "1_CRITICAL_OPERATIONS/mod.rs"]
mod critical_operations_1;
use critical_operations_1 as _1_CRITICAL_OPERATIONS;

#[path = "2_CRITICAL_DATA/mod.rs"]
mod critical_data_2;
use critical_data_2 as _2_CRITICAL_DATA;

#[path = "3_TOKEN_GATEWAY/mod.rs"]
mod token_gateway_3;
use token_gateway_3 as _3_TOKEN_GATEWAY;

#[path = "4_INFORMATIONAL/mod.rs"]
mod informational_4;
use informational_4 as _4_INFORMATIONAL;

#[path = "5_INFRASTRUCTURE/mod.rs"]
mod infrastructure_5;
use infrastructure_5 as infrastructure;

mod types;

use candid::{candid_method, Nat, Principal};
use ic_cdk::{init, post_upgrade, pre_upgrade, query, update};
use infrastructure::Result;

// ===== PUBLIC API =====

/// Exchange `amount` of `source` for its pegged counterpart `target`
///
/// Open to any caller who has approved this canister for `amount` on the
/// source ledger. The disbursed amount is `amount` re-denominated into the
/// target token's minor units, bounded by seeded liquidity.
#[update]
#[candid_method(update)]
async fn swap(
    amount: Nat,
    source: Principal,
    target: Principal,
) -> Result<_1_CRITICAL_OPERATIONS::swapping::SwapReceipt> {
    let caller = ic_cdk::caller();
    _1_CRITICAL_OPERATIONS::swapping::execute_swap(caller, amount, source, target).await
}

/// Seed swap capacity for (source -> target); deposits the TARGET token
#[update]
#[candid_method(update)]
async fn add_liquidity(amount: Nat, source: Principal, target: Principal) -> Result<Nat> {
    require_admin()?;
    let caller = ic_cdk::caller();
    _1_CRITICAL_OPERATIONS::liquidity::add_liquidity(caller, amount, source, target).await
}

/// Withdraw seeded capacity for (source -> target); pays out the TARGET token
#[update]
#[candid_method(update)]
async fn remove_liquidity(amount: Nat, source: Principal, target: Principal) -> Result<Nat> {
    require_admin()?;
    let caller = ic_cdk::caller();
    _1_CRITICAL_OPERATIONS::liquidity::remove_liquidity(caller, amount, source, target).await
}

/// Capacity still swappable from `source` into `target`, in target minor units
#[query]
#[candid_method(query)]
fn get_swappable_amount(source: Principal, target: Principal) -> Nat {
    _2_CRITICAL_DATA::with_ledger(|ledger| {
        infrastructure::u128_to_nat(ledger.swappable(source, target))
    })
}

/// Get full swap history (all swaps since deployment, bounded by retention)
#[query]
#[candid_method(query)]
fn get_swap_history() -> Vec<_1_CRITICAL_OPERATIONS::swapping::swap_history::SwapRecord> {
    _1_CRITICAL_OPERATIONS::swapping::swap_history::get_full_history()
}

/// Get paginated swap history
#[query]
#[candid_method(query)]
fn get_swap_history_paginated(
    offset: u64,
    limit: u64,
) -> (Vec<_1_CRITICAL_OPERATIONS::swapping::swap_history::SwapRecord>, u64) {
    let full_history = _1_CRITICAL_OPERATIONS::swapping::swap_history::get_full_history();
    let total = full_history.len() as u64;

    let start = offset as usize;
    let end = std::cmp::min(start + (limit as usize), full_history.len());

    let page = if start < full_history.len() {
        full_history[start..end].to_vec()
    } else {
        Vec::new()
    };

    (page, total)
}

/// Balance this canister holds on a token ledger
#[update]
#[candid_method(update)]
async fn get_custody_balance(token: Principal) -> Result<Nat> {
    _3_TOKEN_GATEWAY::balances::custody_balance(token).await
}

#[query]
#[candid_method(query)]
fn get_health_status() -> types::common::HealthStatus {
    _4_INFORMATIONAL::health::get_health_status()
}

#[query]
#[candid_method(query)]
fn get_canister_id() -> Principal {
    ic_cdk::id()
}

#[query]
#[candid_method(query)]
fn get_cycles_balance() -> Nat {
    Nat::from(ic_cdk::api::canister_balance128())
}

// ===== ADMIN CONTROLS =====

/// Emergency pause - stops swaps and liquidity management
#[update]
#[candid_method(update)]
fn emergency_pause() -> Result<()> {
    infrastructure::require_admin()?;
    infrastructure::set_pause(true);
    infrastructure::log_admin_action("EMERGENCY_PAUSE_ACTIVATED".to_string());
    ic_cdk::println!("🚨 EMERGENCY PAUSE ACTIVATED");
    Ok(())
}

/// Resume operations after emergency pause
#[update]
#[candid_method(update)]
fn emergency_unpause() -> Result<()> {
    infrastructure::require_admin()?;
    infrastructure::set_pause(false);
    infrastructure::log_admin_action("EMERGENCY_PAUSE_DEACTIVATED".to_string());
    ic_cdk::println!("✅ EMERGENCY PAUSE DEACTIVATED");
    Ok(())
}

/// Check if system is currently paused
#[query]
#[candid_method(query)]
fn is_emergency_paused() -> bool {
    infrastructure::is_paused()
}

#[query]
#[candid_method(query)]
fn get_admin() -> Option<Principal> {
    infrastructure::get_admin()
}

/// Hand the admin role to another principal
#[update]
#[candid_method(update)]
fn set_admin(new_admin: Principal) -> Result<()> {
    infrastructure::require_admin()?;
    infrastructure::set_admin_principal(new_admin);
    infrastructure::log_admin_action(format!("ADMIN_CHANGED to {}", new_admin.to_text()));
    Ok(())
}

/// Get admin action log (admin only)
#[query]
#[candid_method(query)]
fn get_admin_action_log() -> Result<Vec<infrastructure::AdminAction>> {
    infrastructure::require_admin()?;
    Ok(infrastructure::get_admin_log())
}

// ===== INITIALIZATION =====

#[init]
fn init() {
    let deployer = ic_cdk::caller();
    infrastructure::set_admin_principal(deployer);

    ic_cdk::println!("===================================");
    ic_cdk::println!("PegSwap Backend Initialized");
    ic_cdk::println!("Admin: {}", deployer.to_text());
    ic_cdk::println!("===================================");

    start_history_prune_timer();
}

#[pre_upgrade]
fn pre_upgrade() {
    ic_cdk::println!("===================================");
    ic_cdk::println!("PegSwap Backend Pre-Upgrade");
    ic_cdk::println!("===================================");

    let state = infrastructure::stable_storage::StableState {
        admin: infrastructure::get_admin(),
        paused: infrastructure::is_paused(),
        ledger_entries: _2_CRITICAL_DATA::with_ledger(|ledger| ledger.export_entries()),
        swap_history: _1_CRITICAL_OPERATIONS::swapping::swap_history::export_history(),
    };

    infrastructure::stable_storage::save_state(state);
}

#[post_upgrade]
fn post_upgrade() {
    ic_cdk::println!("===================================");
    ic_cdk::println!("PegSwap Backend Post-Upgrade");
    ic_cdk::println!("===================================");

    let state = infrastructure::stable_storage::restore_state();

    if let Some(admin) = state.admin {
        infrastructure::set_admin_principal(admin);
    }
    infrastructure::set_pause(state.paused);

    let entry_count = state.ledger_entries.len();
    match _2_CRITICAL_DATA::LiquidityLedger::import_entries(state.ledger_entries) {
        Ok(ledger) => _2_CRITICAL_DATA::replace_ledger(ledger),
        Err(e) => {
            // Leave the empty ledger in place rather than trapping the
            // upgrade with funds already in custody
            ic_cdk::println!("⚠️ Failed to restore {} ledger entries: {}", entry_count, e);
        }
    }

    _1_CRITICAL_OPERATIONS::swapping::swap_history::load_history(state.swap_history);

    start_history_prune_timer();

    ic_cdk::println!("✅ Backend upgraded successfully");
}

// ===== HELPER FUNCTIONS =====

/// Verify caller is the admin principal (uses admin module)
fn require_admin() -> Result<()> {
    infrastructure::require_admin()
}

/// Hourly cleanup of swap records past the retention window
fn start_history_prune_timer() {
    ic_cdk_timers::set_timer_interval(
        std::time::Duration::from_secs(infrastructure::HISTORY_PRUNE_INTERVAL_SECS),
        || {
            let cutoff = ic_cdk::api::time()
                .saturating_sub(infrastructure::SWAP_RECORD_RETENTION_NANOS);
            let removed =
                _1_CRITICAL_OPERATIONS::swapping::swap_history::prune_older_than(cutoff);
            if removed > 0 {
                ic_cdk::println!("🧹 Periodic cleanup: removed {} expired swap records", removed);
            }
        },
    );
}

// ===== CANDID EXPORT =====

ic_cdk::export_candid!();
