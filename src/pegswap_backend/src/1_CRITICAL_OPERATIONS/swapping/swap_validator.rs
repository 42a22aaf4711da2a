//! Validation for swap requests

use candid::{Nat, Principal};

use crate::infrastructure::errors::{PegSwapError, Result, ValidationError};

pub fn validate_swap_request(
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
            reason: "Swap amount must be greater than zero".to_string(),
        }));
    }

    if source == target {
        return Err(PegSwapError::Validation(ValidationError::IdenticalTokens {
            token: source.to_text(),
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_a() -> Principal {
        Principal::from_text("aaaaa-aa").unwrap()
    }

    fn token_b() -> Principal {
        Principal::from_text("2vxsx-fae").unwrap()
    }

    fn holder() -> Principal {
        Principal::from_slice(&[0x05; 29])
    }

    #[test]
    fn test_valid_request_passes() {
        let result =
            validate_swap_request(&holder(), &Nat::from(1_000_000u64), &token_a(), &token_b());
        assert!(result.is_ok());
    }

    #[test]
    fn test_anonymous_caller_rejected() {
        let result = validate_swap_request(
            &Principal::anonymous(),
            &Nat::from(1_000_000u64),
            &token_a(),
            &token_b(),
        );
        assert!(matches!(
            result,
            Err(PegSwapError::Validation(
                ValidationError::InvalidPrincipal { .. }
            ))
        ));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let result = validate_swap_request(&holder(), &Nat::from(0u64), &token_a(), &token_b());
        assert!(matches!(
            result,
            Err(PegSwapError::Validation(ValidationError::InvalidAmount { .. }))
        ));
    }

    #[test]
    fn test_identical_tokens_rejected() {
        let result =
            validate_swap_request(&holder(), &Nat::from(1_000_000u64), &token_a(), &token_a());
        assert!(matches!(
            result,
            Err(PegSwapError::Validation(
                ValidationError::IdenticalTokens { .. }
            ))
        ));
    }
}
