//! Custody balance reads

use candid::{Nat, Principal};

use crate::infrastructure::errors::{PegSwapError, QueryError, Result};
use crate::types::icrc::Account;

/// Read an account's balance on a token ledger
pub async fn balance_of(token: Principal, owner: Principal) -> Result<Nat> {
    let (balance,): (Nat,) = ic_cdk::call(token, "icrc1_balance_of", (Account::of(owner),))
        .await
        .map_err(|(code, msg)| {
            PegSwapError::Query(QueryError::CanisterUnreachable {
                canister: token.to_text(),
                reason: format!("Balance query failed: {} - {}", code as u32, msg),
            })
        })?;

    Ok(balance)
}

/// Balance held by this canister itself
pub async fn custody_balance(token: Principal) -> Result<Nat> {
    balance_of(token, ic_cdk::id()).await
}
