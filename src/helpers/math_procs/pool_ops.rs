//! Pricing for swaps and proportional withdrawals.
use crate::helpers::errors::DexProgramError;
use crate::helpers::math_procs::numerical_ops::{constant_product, mul_div_floor};

const BPS_DENOMINATOR: u64 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub fee: u64,
    pub amount_out: u64,
}

/// Constant product quote for selling `amount_in` into the pool. The fee is
/// taken from the input before pricing and stays in the pool.
pub fn quote_exact_in(
    reserve_in: u64, reserve_out: u64, amount_in: u64, fee_bps: u16,
) -> Result<SwapQuote, DexProgramError> {
    if amount_in == 0 || u64::from(fee_bps) >= BPS_DENOMINATOR {
        return Err(DexProgramError::InvalidInstructionData);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(DexProgramError::InsufficientFunds);
    }

    let fee = mul_div_floor(amount_in, u64::from(fee_bps), BPS_DENOMINATOR)?;
    let net_in = amount_in
        .checked_sub(fee)
        .ok_or(DexProgramError::OverflowOrUnderflowOccurred)?;
    let new_reserve_in = reserve_in
        .checked_add(net_in)
        .ok_or(DexProgramError::OverflowOrUnderflowOccurred)?;
    let amount_out = mul_div_floor(reserve_out, net_in, new_reserve_in)?;
    if amount_out == 0 {
        return Err(DexProgramError::InsufficientFunds);
    }

    // The pool keeps the full input, fee included.
    let pool_in = reserve_in
        .checked_add(amount_in)
        .ok_or(DexProgramError::OverflowOrUnderflowOccurred)?;
    let pool_out = reserve_out
        .checked_sub(amount_out)
        .ok_or(DexProgramError::OverflowOrUnderflowOccurred)?;
    if constant_product(&[pool_in, pool_out])? < constant_product(&[reserve_in, reserve_out])? {
        return Err(DexProgramError::OverflowOrUnderflowOccurred);
    }

    Ok(SwapQuote { amount_in, fee, amount_out })
}

/// Portion of `reserve` owed for `shares` basis points of the pool.
pub fn share_of_reserve(reserve: u64, shares: u64) -> Result<u64, DexProgramError> {
    if shares == 0 || shares > BPS_DENOMINATOR {
        return Err(DexProgramError::InvalidInstructionData);
    }
    mul_div_floor(reserve, shares, BPS_DENOMINATOR)
}
