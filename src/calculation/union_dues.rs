//! Trade union dues calculation.
//!
//! Dues are a fixed share of the SI/HI contribution base, capped at a
//! monthly ceiling and rounded to whole VND.

use rust_decimal::Decimal;

use crate::config::UnionDuesConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, UnionDues};

use super::rounding::round_vnd;

/// Calculates union dues on an SI/HI contribution base.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `insurance_base` is negative.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_union_dues;
/// use salary_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let config = &loader.config().settings().union_dues;
///
/// let dues = calculate_union_dues(Decimal::from(58_500_000), config).unwrap();
/// assert_eq!(dues.amount, Decimal::from(234_000));
/// assert!(dues.capped_at_max);
/// ```
pub fn calculate_union_dues(
    insurance_base: Decimal,
    config: &UnionDuesConfig,
) -> EngineResult<UnionDues> {
    if insurance_base < Decimal::ZERO {
        return Err(EngineError::InvalidArgument {
            message: format!("union dues base must not be negative, got {}", insurance_base),
        });
    }

    let calculated = insurance_base * config.rate;
    let capped_at_max = calculated > config.max_amount;

    Ok(UnionDues {
        amount: round_vnd(calculated.min(config.max_amount)),
        calculation_base: insurance_base,
        capped_at_max,
        rate: config.rate,
        max_amount: config.max_amount,
    })
}

/// Take-home pay after union dues: `net − union_dues.amount`.
///
/// Any tax-exempt allowance has already lowered the tax inside `net` and is
/// not added again.
pub fn final_net(result: &CalculationResult) -> Decimal {
    let dues = result
        .union_dues
        .as_ref()
        .map_or(Decimal::ZERO, |dues| dues.amount);
    result.net - dues
}
