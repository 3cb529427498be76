//! Calculation input models.
//!
//! This module defines the [`Region`] enum and the per-request
//! [`CalculatorInputs`] / [`ComparisonInputs`] structures.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Regime;

/// Vietnamese minimum-wage region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Hanoi, Ho Chi Minh City and major urban areas.
    I,
    /// Secondary cities and provincial capitals.
    II,
    /// Smaller cities and towns.
    III,
    /// Rural areas.
    IV,
}

impl Region {
    /// All regions in order.
    pub const ALL: [Region; 4] = [Region::I, Region::II, Region::III, Region::IV];

    /// Returns the roman numeral for the region.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::I => "I",
            Region::II => "II",
            Region::III => "III",
            Region::IV => "IV",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One calculation request for a single regime.
///
/// Values are expected to be pre-validated by the caller (gross and any
/// custom insurance base non-negative); the calculation functions do not
/// reject them.
///
/// # Example
///
/// ```
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::{CalculatorInputs, Region};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let inputs = CalculatorInputs {
///     gross: Decimal::from(30_000_000),
///     dependents: 2,
///     region: Region::I,
///     regime: loader.get_regime("2025").unwrap().clone(),
///     insurance_base: None,
///     is_union_member: false,
/// };
/// assert_eq!(inputs.contribution_candidate(), Decimal::from(30_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    /// Gross monthly salary (VND).
    pub gross: Decimal,
    /// Number of registered dependents.
    pub dependents: u32,
    /// Minimum-wage region.
    pub region: Region,
    /// Tax regime to apply.
    pub regime: Regime,
    /// Custom insurance contribution base; gross is used when absent.
    #[serde(default)]
    pub insurance_base: Option<Decimal>,
    /// Whether the employee is a trade union member.
    #[serde(default)]
    pub is_union_member: bool,
}

impl CalculatorInputs {
    /// The base submitted for insurance clamping: the custom base or gross.
    pub fn contribution_candidate(&self) -> Decimal {
        self.insurance_base.unwrap_or(self.gross)
    }
}

/// Calculation inputs without a regime, used by the regime comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonInputs {
    /// Gross monthly salary (VND).
    pub gross: Decimal,
    /// Number of registered dependents.
    pub dependents: u32,
    /// Minimum-wage region.
    pub region: Region,
    /// Custom insurance contribution base; gross is used when absent.
    #[serde(default)]
    pub insurance_base: Option<Decimal>,
    /// Whether the employee is a trade union member.
    #[serde(default)]
    pub is_union_member: bool,
}

impl ComparisonInputs {
    /// Attaches a regime, producing single-regime inputs.
    pub fn with_regime(&self, regime: &Regime) -> CalculatorInputs {
        CalculatorInputs {
            gross: self.gross,
            dependents: self.dependents,
            region: self.region,
            regime: regime.clone(),
            insurance_base: self.insurance_base,
            is_union_member: self.is_union_member,
        }
    }
}
