//! Checked integer helpers for the pool math.
//! Everything is widened to u128 before multiplying and narrowed back to u64.
use crate::helpers::errors::DexProgramError;

// Calculating the constant product, product of x_i.
pub fn constant_product(reserves: &[u64]) -> Result<u128, DexProgramError> {
    reserves.iter().try_fold(1u128, |acc, &x| {
        acc.checked_mul(u128::from(x))
            .ok_or(DexProgramError::OverflowOrUnderflowOccurred)
    })
}

/// floor(value * numerator / denominator).
pub fn mul_div_floor(value: u64, numerator: u64, denominator: u64) -> Result<u64, DexProgramError> {
    if denominator == 0 {
        return Err(DexProgramError::OverflowOrUnderflowOccurred);
    }
    let result = u128::from(value)
        .checked_mul(u128::from(numerator))
        .ok_or(DexProgramError::OverflowOrUnderflowOccurred)?
        / u128::from(denominator);
    u64::try_from(result).map_err(|_| DexProgramError::OverflowOrUnderflowOccurred)
}
