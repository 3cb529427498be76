//! Side-by-side comparison of two tax regimes.

use rust_decimal::Decimal;

use crate::config::{EngineConfig, EngineSettings, Regime};
use crate::error::EngineResult;
use crate::models::{ComparisonInputs, ComparisonResult, RegimeDeltas};

use super::net_salary::calculate_all;

/// Compares the configured baseline and proposed regimes (2025 and 2026 by
/// default) on the same inputs.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compare_regimes;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::{ComparisonInputs, Region};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let inputs = ComparisonInputs {
///     gross: Decimal::from(30_000_000),
///     dependents: 2,
///     region: Region::I,
///     insurance_base: None,
///     is_union_member: false,
/// };
///
/// let comparison = compare_regimes(&inputs, None, loader.config()).unwrap();
/// assert_eq!(comparison.deltas.personal_deduction, Decimal::from(4_500_000));
/// assert!(comparison.deltas.net_salary > Decimal::ZERO);
/// ```
pub fn compare_regimes(
    inputs: &ComparisonInputs,
    exempt_allowance: Option<Decimal>,
    config: &EngineConfig,
) -> EngineResult<ComparisonResult> {
    compare_regimes_with(
        inputs,
        config.baseline_regime(),
        config.proposed_regime(),
        exempt_allowance,
        config.settings(),
    )
}

/// Compares any two regimes on the same inputs; deltas are
/// `proposed − baseline`.
pub fn compare_regimes_with(
    inputs: &ComparisonInputs,
    baseline: &Regime,
    proposed: &Regime,
    exempt_allowance: Option<Decimal>,
    settings: &EngineSettings,
) -> EngineResult<ComparisonResult> {
    let baseline = calculate_all(&inputs.with_regime(baseline), exempt_allowance, settings)?;
    let proposed = calculate_all(&inputs.with_regime(proposed), exempt_allowance, settings)?;
    let deltas = RegimeDeltas::between(&baseline, &proposed);

    Ok(ComparisonResult {
        baseline,
        proposed,
        deltas,
    })
}
