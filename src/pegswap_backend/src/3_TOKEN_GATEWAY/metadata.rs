//! Token precision queries
//!
//! Decimals are read once per call per token and treated as immutable for
//! that call; nothing is cached across calls.

use candid::Principal;

use crate::infrastructure::errors::{PegSwapError, QueryError, Result};

/// Read a token's declared minor-unit precision
pub async fn query_decimals(token: Principal) -> Result<u8> {
    let (decimals,): (u8,) = ic_cdk::call(token, "icrc1_decimals", ())
        .await
        .map_err(|(code, msg)| {
            PegSwapError::Query(QueryError::DecimalsUnavailable {
                token: token.to_text(),
                reason: format!("Call failed: {} - {}", code as u32, msg),
            })
        })?;

    Ok(decimals)
}

/// Read both tokens' precisions in parallel
pub async fn query_decimals_pair(source: Principal, target: Principal) -> Result<(u8, u8)> {
    let source_future = query_decimals(source);
    let target_future = query_decimals(target);

    let (source_decimals, target_decimals) = futures::join!(source_future, target_future);

    Ok((source_decimals?, target_decimals?))
}
