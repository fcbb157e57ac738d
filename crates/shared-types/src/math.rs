//! # Fixed-Point Arithmetic
//!
//! `a * b / c` without intermediate overflow, rounding toward zero.

use crate::entities::{Amount, BIPS_DENOMINATOR, U256};

/// Compute `a * b / denominator` through a 256-bit intermediate.
///
/// Returns `None` when `denominator` is zero or the quotient does not fit
/// in an [`Amount`].
pub fn mul_div(a: Amount, b: Amount, denominator: Amount) -> Option<Amount> {
    if denominator == 0 {
        return None;
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(denominator);
    if quotient > U256::from(Amount::MAX) {
        return None;
    }
    Some(quotient.low_u128())
}

/// Portion of `amount` represented by `bips` basis points.
pub fn apply_bips(amount: Amount, bips: u32) -> Option<Amount> {
    mul_div(amount, Amount::from(bips), Amount::from(BIPS_DENOMINATOR))
}
