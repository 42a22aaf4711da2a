//! Human-readable amount formatting for log lines

use rust_decimal::Decimal;

/// Render a raw minor-unit amount at its token's declared precision
///
/// Falls back to the raw digit string when the value or precision exceeds
/// what a 96-bit decimal can carry; log output degrades, accounting does not.
pub fn format_token_amount(amount: u128, decimals: u8) -> String {
    match i128::try_from(amount) {
        Ok(mantissa) => match Decimal::try_from_i128_with_scale(mantissa, u32::from(decimals)) {
            Ok(value) => value.normalize().to_string(),
            Err(_) => amount.to_string(),
        },
        Err(_) => amount.to_string(),
    }
}
