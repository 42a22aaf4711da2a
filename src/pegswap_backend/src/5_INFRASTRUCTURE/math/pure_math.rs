//! Pure mathematical functions - no I/O, no async
//! All amounts are accounted in u128; every multiply and add is
//! overflow-checked and fails closed

use candid::Nat;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::infrastructure::errors::{CalculationError, PegSwapError, Result};

/// Re-denominate an amount from one token's minor-unit precision to another's
///
/// Scaling up multiplies by a power of ten and is exact; overflow of the
/// factor or the product fails the call. Scaling down divides by a power of
/// ten and truncates toward zero, never rounding up. A downscale whose
/// divisor exceeds the 128-bit range maps every representable amount to zero.
pub fn convert_precision(amount: u128, from_decimals: u8, to_decimals: u8) -> Result<u128> {
    if from_decimals == to_decimals {
        return Ok(amount);
    }

    if from_decimals < to_decimals {
        let exponent = (to_decimals - from_decimals) as u32;
        let factor = pow10(exponent).ok_or_else(|| overflow(amount, from_decimals, to_decimals))?;
        amount
            .checked_mul(factor)
            .ok_or_else(|| overflow(amount, from_decimals, to_decimals))
    } else {
        let exponent = (from_decimals - to_decimals) as u32;
        match pow10(exponent) {
            Some(divisor) => Ok(amount / divisor),
            // Divisor larger than any u128: everything truncates to zero
            None => Ok(0),
        }
    }
}

fn pow10(exponent: u32) -> Option<u128> {
    10u128.checked_pow(exponent)
}

fn overflow(amount: u128, from_decimals: u8, to_decimals: u8) -> PegSwapError {
    PegSwapError::Calculation(CalculationError::Overflow {
        operation: format!(
            "convert_precision({}, e{}, e{})",
            amount, from_decimals, to_decimals
        ),
    })
}

/// Bring a candid Nat into the 128-bit accounting range
pub fn nat_to_u128(value: &Nat) -> Result<u128> {
    value.0.to_u128().ok_or_else(|| {
        PegSwapError::Calculation(CalculationError::UnrepresentableAmount {
            amount: value.to_string(),
        })
    })
}

pub fn u128_to_nat(value: u128) -> Nat {
    Nat::from(BigUint::from(value))
}
