//! Fund movement through ICRC ledgers
//!
//! `pull_from` is the ICRC-2 approval-based pull into canister custody;
//! `push_to` is the ICRC-1 push out of custody. Ledger fees are left at the
//! ledger default; the peg accounting itself is fee-free.

use candid::{Nat, Principal};
use serde_bytes::ByteBuf;

use crate::infrastructure::errors::{PegSwapError, Result, TransferError};
use crate::types::icrc::{Account, TransferArgs, TransferFromArgs, TransferFromResult, TransferResult};

/// Pull `amount` of `token` from `from` into canister custody
///
/// Requires the holder to have approved this canister on the token ledger;
/// an insufficient allowance or balance surfaces in the ledger's reply.
pub async fn pull_from(token: Principal, from: Principal, amount: Nat, memo: &[u8]) -> Result<Nat> {
    let transfer_from_args = TransferFromArgs {
        from: Account::of(from),
        to: Account::of(ic_cdk::id()),
        amount: amount.clone(),
        fee: None,
        memo: Some(ByteBuf::from(memo.to_vec())),
        created_at_time: Some(ic_cdk::api::time()),
    };

    let (result,): (TransferFromResult,) =
        ic_cdk::call(token, "icrc2_transfer_from", (transfer_from_args,))
            .await
            .map_err(|(code, msg)| {
                PegSwapError::Transfer(TransferError::PullFailed {
                    token: token.to_text(),
                    amount: amount.to_string(),
                    reason: format!("Inter-canister call failed: {} - {}", code as u32, msg),
                })
            })?;

    match result {
        TransferFromResult::Ok(block) => Ok(block),
        TransferFromResult::Err(e) => Err(PegSwapError::Transfer(TransferError::PullFailed {
            token: token.to_text(),
            amount: amount.to_string(),
            reason: format!("{:?}", e),
        })),
    }
}

/// Push `amount` of `token` from canister custody to `to`
pub async fn push_to(token: Principal, to: Principal, amount: Nat, memo: &[u8]) -> Result<Nat> {
    let transfer_args = TransferArgs {
        from_subaccount: None,
        to: Account::of(to),
        amount: amount.clone(),
        fee: None,
        memo: Some(ByteBuf::from(memo.to_vec())),
        created_at_time: Some(ic_cdk::api::time()),
    };

    let (result,): (TransferResult,) = ic_cdk::call(token, "icrc1_transfer", (transfer_args,))
        .await
        .map_err(|(code, msg)| {
            PegSwapError::Transfer(TransferError::DisbursementFailed {
                token: token.to_text(),
                amount: amount.to_string(),
                reason: format!("Inter-canister call failed: {} - {}", code as u32, msg),
            })
        })?;

    match result {
        TransferResult::Ok(block) => Ok(block),
        TransferResult::Err(e) => Err(PegSwapError::Transfer(TransferError::DisbursementFailed {
            token: token.to_text(),
            amount: amount.to_string(),
            reason: format!("{:?}", e),
        })),
    }
}
