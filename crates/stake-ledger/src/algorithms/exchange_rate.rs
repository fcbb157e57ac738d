//! # Exchange Rate
//!
//! The rate is always derived from `total_ftm_worth / liquid_supply`; it is
//! never stored. Conversions go through the raw totals rather than the
//! rounded rate so no precision is lost twice.

use crate::domain::{ExchangeRate, StakingError, StakingResult};
use shared_types::{mul_div, Amount, RATE_PRECISION};

/// Current rate. An empty supply prices at exactly 1.0.
pub fn exchange_rate(total_worth: Amount, liquid_supply: Amount) -> StakingResult<ExchangeRate> {
    if liquid_supply == 0 {
        return Ok(ExchangeRate::ONE);
    }
    mul_div(total_worth, RATE_PRECISION, liquid_supply)
        .map(ExchangeRate)
        .ok_or(StakingError::ArithmeticOverflow)
}

/// Liquid units issued for a deposit of `amount`.
pub fn liquid_for_deposit(
    amount: Amount,
    total_worth: Amount,
    liquid_supply: Amount,
) -> StakingResult<Amount> {
    if liquid_supply == 0 {
        return Ok(amount);
    }
    if total_worth == 0 {
        return Err(StakingError::InvalidState(
            "liquid supply outstanding with no backing".to_string(),
        ));
    }
    mul_div(amount, liquid_supply, total_worth).ok_or(StakingError::ArithmeticOverflow)
}

/// FTM owed for redeeming `liquid` units.
pub fn ftm_for_liquid(
    liquid: Amount,
    total_worth: Amount,
    liquid_supply: Amount,
) -> StakingResult<Amount> {
    if liquid > liquid_supply {
        return Err(StakingError::InvalidState(format!(
            "redeeming {liquid} units of a {liquid_supply} supply"
        )));
    }
    mul_div(liquid, total_worth, liquid_supply).ok_or(StakingError::ArithmeticOverflow)
}
