//! Insurance contribution base resolution.
//!
//! Social and health insurance share one base capped at a multiple of the
//! statutory base salary; unemployment insurance has its own base capped at
//! a multiple of the regional minimum wage. Both are floored at the regional
//! minimum wage.

use rust_decimal::Decimal;

use crate::config::InsuranceRates;
use crate::models::InsuranceBases;

use super::rounding::clamp;

/// Resolves the SI/HI and UI contribution bases.
///
/// The candidate is `custom_base` when given, otherwise `gross`. It is then
/// clamped independently into `[regional_min_wage, cap_si_hi]` and
/// `[regional_min_wage, cap_ui]`. Negative candidates are not rejected; they
/// floor at the regional minimum wage.
///
/// # Arguments
///
/// * `gross` - Gross monthly salary
/// * `regional_min_wage` - Minimum wage of the employee's region
/// * `rates` - Insurance settings supplying the base salary and cap multipliers
/// * `custom_base` - Optional declared contribution base
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::resolve_insurance_bases;
/// use salary_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let rates = &loader.config().settings().insurance;
///
/// let bases = resolve_insurance_bases(
///     Decimal::from(100_000_000),
///     Decimal::from(4_960_000),
///     rates,
///     None,
/// );
/// assert_eq!(bases.base_si_hi, Decimal::from(46_800_000));
/// assert_eq!(bases.base_ui, Decimal::from(99_200_000));
/// ```
pub fn resolve_insurance_bases(
    gross: Decimal,
    regional_min_wage: Decimal,
    rates: &InsuranceRates,
    custom_base: Option<Decimal>,
) -> InsuranceBases {
    let candidate = custom_base.unwrap_or(gross);

    InsuranceBases {
        base_si_hi: clamp(candidate, regional_min_wage, rates.cap_si_hi()),
        base_ui: clamp(candidate, regional_min_wage, rates.cap_ui(regional_min_wage)),
    }
}
