//! Liquidity management
//!
//! Seeds and withdraws one-way swap capacity. Amounts are always
//! denominated in the TARGET token of the direction being managed: adding
//! liquidity for (source -> target) deposits target tokens into custody,
//! withdrawing pays target tokens back out.
//!
//! Withdrawal touches only the directed entry it names; reverse-direction
//! capacity accumulated by past swaps is never adjusted here.

use candid::{Nat, Principal};

use crate::infrastructure::constants::{MEMO_LIQUIDITY_ADD, MEMO_LIQUIDITY_REMOVE};
use crate::infrastructure::errors::{
    CalculationError, PegSwapError, Result, SystemError, ValidationError,
};
use crate::infrastructure::math::nat_to_u128;
use crate::infrastructure::reentrancy::LiquidityGuard;
use crate::_2_CRITICAL_DATA::ledger::{with_ledger, with_ledger_mut};
use crate::_3_TOKEN_GATEWAY::transfers;

/// Seed swap capacity for (source -> target) by depositing target tokens
///
/// Pulls `amount` of the target token from the caller (ICRC-2 approval
/// required), then raises the directional capacity by the same amount.
/// Nothing changes if the pull fails.
pub async fn add_liquidity(
    caller: Principal,
    amount: Nat,
    source: Principal,
    target: Principal,
) -> Result<Nat> {
    crate::infrastructure::check_not_paused()?;
    let _guard = LiquidityGuard::acquire(caller)?;

    validate_liquidity_request(&caller, &amount, &source, &target)?;
    let amount_raw = nat_to_u128(&amount)?;

    // Reject a credit that could not be booked before moving any funds
    let fits = with_ledger(|ledger| ledger.can_credit(source, target, amount_raw));
    if !fits {
        return Err(PegSwapError::Calculation(CalculationError::Overflow {
            operation: format!(
                "credit({}, {}, {})",
                source.to_text(),
                target.to_text(),
                amount_raw
            ),
        }));
    }

    let block = transfers::pull_from(target, caller, amount.clone(), MEMO_LIQUIDITY_ADD).await?;

    with_ledger_mut(|ledger| ledger.credit(source, target, amount_raw)).map_err(|e| {
        PegSwapError::System(SystemError::StateCorrupted {
            reason: format!("credit failed after deposit settled: {}", e),
        })
    })?;

    crate::infrastructure::log_admin_action(format!(
        "LIQUIDITY_ADDED {} for {} -> {}",
        amount,
        source.to_text(),
        target.to_text()
    ));

    Ok(block)
}

/// Withdraw seeded capacity for (source -> target), paying target tokens
/// back to the caller
///
/// The debit is taken before the payout so an over-withdrawal fails without
/// moving funds; a failed payout restores the debit.
pub async fn remove_liquidity(
    caller: Principal,
    amount: Nat,
    source: Principal,
    target: Principal,
) -> Result<Nat> {
    crate::infrastructure::check_not_paused()?;
    let _guard = LiquidityGuard::acquire(caller)?;

    validate_liquidity_request(&caller, &amount, &source, &target)?;
    let amount_raw = nat_to_u128(&amount)?;

    with_ledger_mut(|ledger| ledger.debit(source, target, amount_raw))?;

    match transfers::push_to(target, caller, amount.clone(), MEMO_LIQUIDITY_REMOVE).await {
        Ok(block) => {
            crate::infrastructure::log_admin_action(format!(
                "LIQUIDITY_REMOVED {} for {} -> {}",
                amount,
                source.to_text(),
                target.to_text()
            ));
            Ok(block)
        }
        Err(e) => {
            ic_cdk::println!("❌ Liquidity payout failed, restoring capacity: {}", e);
            if let Err(restore_err) =
                with_ledger_mut(|ledger| ledger.credit(source, target, amount_raw))
            {
                // Unreachable: the amount was just debited from this entry
                ic_cdk::println!("⚠️ Failed to restore withdrawn capacity: {}", restore_err);
            }
            Err(e)
        }
    }
}

fn validate_liquidity_request(
    caller: &Principal,
    amount: &Nat,
    source: &Principal,
    target: &Principal,
) -> Result<()> {
    if caller == &Principal::anonymous() {
        return Err(PegSwapError::Validation(ValidationError::InvalidPrincipal {
            principal: caller.to_text(),
        }));
    }

    if amount == &Nat::from(0u64) {
        return Err(PegSwapError::Validation(ValidationError::InvalidAmount {
            amount: amount.to_string(),
            reason: "Liquidity amount must be greater than zero".to_string(),
        }));
    }

    if source == target {
        return Err(PegSwapError::Validation(ValidationError::IdenticalTokens {
            token: source.to_text(),
        }));
    }

    Ok(())
}
