//! Error taxonomy for the swap canister
//! Every fallible operation returns `Result<T>` from this module

use candid::{CandidType, Deserialize};
use std::fmt;

pub type Result<T> = std::result::Result<T, PegSwapError>;

/// Top-level error type returned across the candid boundary
#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum PegSwapError {
    Validation(ValidationError),
    Calculation(CalculationError),
    Liquidity(LiquidityError),
    Swap(SwapError),
    Transfer(TransferError),
    Query(QueryError),
    System(SystemError),
    Other(String),
}

/// Request-shape failures detected before any state is touched
#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum ValidationError {
    InvalidAmount {
        amount: String,
        reason: String,
    },
    IdenticalTokens {
        token: String,
    },
    InvalidPrincipal {
        principal: String,
    },
}

/// Arithmetic failures; every overflow fails the call rather than wrapping
#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum CalculationError {
    Overflow {
        operation: String,
    },
    /// A candid Nat too large for the 128-bit accounting range
    UnrepresentableAmount {
        amount: String,
    },
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum LiquidityError {
    InsufficientLiquidity {
        source: String,
        target: String,
        requested: String,
        available: String,
    },
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum SwapError {
    /// Normalized output truncates to zero target minor units
    AmountTooSmall {
        amount: String,
        source_decimals: u8,
        target_decimals: u8,
    },
}

/// Failures at the token-ledger layer; the ledger's reason is always carried
#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum TransferError {
    PullFailed {
        token: String,
        amount: String,
        reason: String,
    },
    DisbursementFailed {
        token: String,
        amount: String,
        reason: String,
    },
    /// Disbursement failed AND returning the pulled funds also failed;
    /// the caller's funds are stranded in custody and need manual recovery
    RefundFailed {
        token: String,
        amount: String,
        disbursement_reason: String,
        refund_reason: String,
    },
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum QueryError {
    CanisterUnreachable {
        canister: String,
        reason: String,
    },
    DecimalsUnavailable {
        token: String,
        reason: String,
    },
}

#[derive(CandidType, Deserialize, Clone, Debug)]
pub enum SystemError {
    OperationInProgress {
        operation: String,
        user: String,
    },
    StateCorrupted {
        reason: String,
    },
}

impl fmt::Display for PegSwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PegSwapError::Validation(e) => write!(f, "Validation error: {}", e),
            PegSwapError::Calculation(e) => write!(f, "Calculation error: {}", e),
            PegSwapError::Liquidity(e) => write!(f, "Liquidity error: {}", e),
            PegSwapError::Swap(e) => write!(f, "Swap error: {}", e),
            PegSwapError::Transfer(e) => write!(f, "Transfer error: {}", e),
            PegSwapError::Query(e) => write!(f, "Query error: {}", e),
            PegSwapError::System(e) => write!(f, "System error: {}", e),
            PegSwapError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidAmount { amount, reason } => {
                write!(f, "Invalid amount {}: {}", amount, reason)
            }
            ValidationError::IdenticalTokens { token } => {
                write!(f, "Source and target token are both {}", token)
            }
            ValidationError::InvalidPrincipal { principal } => {
                write!(f, "Invalid principal: {}", principal)
            }
        }
    }
}

impl fmt::Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationError::Overflow { operation } => {
                write!(f, "Arithmetic overflow in {}", operation)
            }
            CalculationError::UnrepresentableAmount { amount } => {
                write!(f, "Amount {} exceeds the supported 128-bit range", amount)
            }
        }
    }
}

impl fmt::Display for LiquidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquidityError::InsufficientLiquidity {
                source,
                target,
                requested,
                available,
            } => write!(
                f,
                "Insufficient liquidity for {} -> {}: requested {}, available {}",
                source, target, requested, available
            ),
        }
    }
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::AmountTooSmall {
                amount,
                source_decimals,
                target_decimals,
            } => write!(
                f,
                "Amount {} (e{}) truncates to zero target units (e{})",
                amount, source_decimals, target_decimals
            ),
        }
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::PullFailed {
                token,
                amount,
                reason,
            } => write!(f, "Failed to pull {} of {}: {}", amount, token, reason),
            TransferError::DisbursementFailed {
                token,
                amount,
                reason,
            } => write!(f, "Failed to disburse {} of {}: {}", amount, token, reason),
            TransferError::RefundFailed {
                token,
                amount,
                disbursement_reason,
                refund_reason,
            } => write!(
                f,
                "Disbursement failed ({}) and refunding {} of {} also failed ({}). Contact support.",
                disbursement_reason, amount, token, refund_reason
            ),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::CanisterUnreachable { canister, reason } => {
                write!(f, "Canister {} unreachable: {}", canister, reason)
            }
            QueryError::DecimalsUnavailable { token, reason } => {
                write!(f, "Could not read decimals of {}: {}", token, reason)
            }
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::OperationInProgress { operation, user } => {
                write!(f, "A {} is already in progress for {}", operation, user)
            }
            SystemError::StateCorrupted { reason } => {
                write!(f, "Internal state corrupted: {}", reason)
            }
        }
    }
}
