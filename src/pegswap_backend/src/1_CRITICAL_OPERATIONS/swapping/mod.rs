//! # Swap Execution Module
//!
//! Exchanges a holder's source tokens for the pegged target token at a fixed
//! 1:1 nominal rate, re-denominated between the two tokens' minor-unit
//! precisions and bounded by seeded directional liquidity.
//!
//! ## Swap Flow
//! 1. Guard + validate the request
//! 2. Read both tokens' decimals (once per call)
//! 3. Normalize the amount into target minor units; reject zero output
//! 4. Debit directional capacity BEFORE any transfer
//! 5. Pull source funds from the caller (ICRC-2)
//! 6. Disburse target funds to the caller (ICRC-1)
//! 7. Credit the reverse direction with the raw pulled amount
//!
//! ## Atomicity
//! Any failure after the debit restores it; a failed disbursement also
//! returns the already-pulled source funds to the caller. The caller either
//! sees the whole sequence or none of it.

pub mod swap_history;
pub mod swap_validator;

#[cfg(test)]
mod tests;

use candid::{CandidType, Deserialize, Nat, Principal};

use crate::infrastructure::constants::{MEMO_SWAP_DISBURSE, MEMO_SWAP_PULL, MEMO_SWAP_REFUND};
use crate::infrastructure::errors::{
    CalculationError, PegSwapError, Result, SwapError, SystemError, TransferError,
};
use crate::infrastructure::math::{convert_precision, nat_to_u128, u128_to_nat};
use crate::infrastructure::reentrancy::SwapGuard;
use crate::_2_CRITICAL_DATA::ledger::with_ledger_mut;
use crate::_3_TOKEN_GATEWAY::{metadata, transfers};
use crate::_4_INFORMATIONAL::display::format_token_amount;

/// Outcome of a completed swap, returned to the caller
#[derive(CandidType, Deserialize, Clone, Debug)]
pub struct SwapReceipt {
    pub source: Principal,
    pub target: Principal,
    pub amount_in: Nat,
    pub amount_out: Nat,
    pub pull_block: Nat,
    pub disburse_block: Nat,
    pub timestamp: u64,
}

/// Amounts of one swap after normalization, before any effect
pub(crate) struct SwapPlan {
    pub amount_in: u128,
    pub amount_out: u128,
}

/// Pure planning step: re-denominate and reject a zero-value disbursement
/// that would desynchronize the ledger
pub(crate) fn plan_swap(
    amount_in: u128,
    source_decimals: u8,
    target_decimals: u8,
) -> Result<SwapPlan> {
    let amount_out = convert_precision(amount_in, source_decimals, target_decimals)?;

    if amount_out == 0 {
        return Err(PegSwapError::Swap(SwapError::AmountTooSmall {
            amount: amount_in.to_string(),
            source_decimals,
            target_decimals,
        }));
    }

    Ok(SwapPlan {
        amount_in,
        amount_out,
    })
}

/// Execute one swap for `caller`
pub async fn execute_swap(
    caller: Principal,
    amount: Nat,
    source: Principal,
    target: Principal,
) -> Result<SwapReceipt> {
    crate::infrastructure::check_not_paused()?;

    // One in-flight swap per caller
    let _guard = SwapGuard::acquire(caller)?;

    // === STEP 1: Validate Inputs ===
    swap_validator::validate_swap_request(&caller, &amount, &source, &target)?;
    let amount_in = nat_to_u128(&amount)?;

    // === STEP 2: Read Precisions (once per call, immutable for its duration) ===
    let (source_decimals, target_decimals) = metadata::query_decimals_pair(source, target).await?;

    // === STEP 3: Normalize ===
    let plan = plan_swap(amount_in, source_decimals, target_decimals)?;

    ic_cdk::println!(
        "🔄 Swap: {} {} (e{}) → {} {} (e{}) for {}",
        format_token_amount(plan.amount_in, source_decimals),
        source.to_text(),
        source_decimals,
        format_token_amount(plan.amount_out, target_decimals),
        target.to_text(),
        target_decimals,
        caller.to_text()
    );

    // === STEP 4: Reserve Capacity ===
    // Debit before any transfer so a shortfall can never strand a pull, and
    // pre-flight the step-7 reverse credit so it cannot fail after funds move
    with_ledger_mut(|ledger| {
        if !ledger.can_credit(target, source, plan.amount_in) {
            return Err(PegSwapError::Calculation(CalculationError::Overflow {
                operation: format!(
                    "reverse credit({}, {}, {})",
                    target.to_text(),
                    source.to_text(),
                    plan.amount_in
                ),
            }));
        }
        ledger.debit(source, target, plan.amount_out)
    })?;

    // === STEP 5: Pull Source Funds ===
    let pull_block = match transfers::pull_from(source, caller, amount.clone(), MEMO_SWAP_PULL).await
    {
        Ok(block) => block,
        Err(e) => {
            ic_cdk::println!("❌ Pull failed, releasing reserved capacity: {}", e);
            restore_debit(source, target, plan.amount_out);
            return Err(e);
        }
    };

    // === STEP 6: Disburse Target Funds ===
    let amount_out_nat = u128_to_nat(plan.amount_out);
    let disburse_block =
        match transfers::push_to(target, caller, amount_out_nat.clone(), MEMO_SWAP_DISBURSE).await {
            Ok(block) => block,
            Err(disburse_err) => {
                // Custody cannot legitimately run short here; whatever the
                // cause, return the pulled funds and release the reservation
                ic_cdk::println!(
                    "❌ Disbursement failed, returning pulled funds: {}",
                    disburse_err
                );
                let disbursement_reason = disburse_err.to_string();

                let refund = transfers::push_to(source, caller, amount.clone(), MEMO_SWAP_REFUND).await;
                restore_debit(source, target, plan.amount_out);

                return match refund {
                    Ok(_) => Err(disburse_err),
                    Err(refund_err) => {
                        ic_cdk::println!("❌ Refund also failed: {}", refund_err);
                        Err(PegSwapError::Transfer(TransferError::RefundFailed {
                            token: source.to_text(),
                            amount: amount.to_string(),
                            disbursement_reason,
                            refund_reason: refund_err.to_string(),
                        }))
                    }
                };
            }
        };

    // === STEP 7: Credit Reverse Direction ===
    // The raw, unconverted pulled amount becomes capacity under the flipped
    // key, denominated in the source token's minor units; it is
    // re-normalized when a later swap consumes it
    with_ledger_mut(|ledger| ledger.credit(target, source, plan.amount_in)).map_err(|e| {
        PegSwapError::System(SystemError::StateCorrupted {
            reason: format!("reverse credit failed after transfers settled: {}", e),
        })
    })?;

    // === STEP 8: Record ===
    let timestamp = ic_cdk::api::time();
    swap_history::record_swap(swap_history::SwapRecord {
        timestamp,
        caller,
        source,
        target,
        amount_in: amount.clone(),
        amount_out: amount_out_nat.clone(),
    });

    ic_cdk::println!(
        "✅ Swap complete: pulled at block {}, disbursed at block {}",
        pull_block,
        disburse_block
    );

    Ok(SwapReceipt {
        source,
        target,
        amount_in: amount,
        amount_out: amount_out_nat,
        pull_block,
        disburse_block,
        timestamp,
    })
}

/// Return reserved capacity after a failed transfer leg
fn restore_debit(source: Principal, target: Principal, amount: u128) {
    if let Err(e) = with_ledger_mut(|ledger| ledger.credit(source, target, amount)) {
        // Unreachable: the amount was just debited from this entry
        ic_cdk::println!(
            "⚠️ Failed to restore {} to {} -> {}: {}",
            amount,
            source.to_text(),
            target.to_text(),
            e
        );
    }
}
