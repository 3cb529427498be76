//! Employee insurance contribution calculation.

use crate::config::InsuranceRates;
use crate::models::{Insurance, InsuranceBases};

use super::rounding::round_vnd;

/// Applies the SI, HI and UI rates to resolved bases.
///
/// Each component is rounded to whole VND before summing, so `total` is
/// always exactly `si + hi + ui`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_insurance;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::InsuranceBases;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let bases = InsuranceBases {
///     base_si_hi: Decimal::from(30_000_000),
///     base_ui: Decimal::from(30_000_000),
/// };
/// let insurance = calculate_insurance(bases, &loader.config().settings().insurance);
/// assert_eq!(insurance.total, Decimal::from(3_150_000));
/// ```
pub fn calculate_insurance(bases: InsuranceBases, rates: &InsuranceRates) -> Insurance {
    let si = round_vnd(bases.base_si_hi * rates.si_rate);
    let hi = round_vnd(bases.base_si_hi * rates.hi_rate);
    let ui = round_vnd(bases.base_ui * rates.ui_rate);

    Insurance {
        bases,
        si,
        hi,
        ui,
        total: si + hi + ui,
    }
}
