//! Configuration types for salary calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. A [`Regime`] can only be
//! obtained through [`Regime::new`] (serde routes through it as well), so
//! every regime the calculator sees already satisfies the bracket ordering
//! rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Region;

/// Statutory monthly minimum wage for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// The monthly minimum wage in VND.
    pub min_wage: Decimal,
}

/// Minimum wages for all four regions, shared by every regime.
///
/// Holding one field per region makes [`RegionalMinimumWages::get`] total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalMinimumWages {
    /// Region I: Hanoi, Ho Chi Minh City and major urban areas.
    #[serde(rename = "I")]
    pub region_i: RegionConfig,
    /// Region II: secondary cities and provincial capitals.
    #[serde(rename = "II")]
    pub region_ii: RegionConfig,
    /// Region III: smaller cities and towns.
    #[serde(rename = "III")]
    pub region_iii: RegionConfig,
    /// Region IV: rural areas.
    #[serde(rename = "IV")]
    pub region_iv: RegionConfig,
}

impl RegionalMinimumWages {
    /// Returns the configuration for a region.
    pub fn get(&self, region: Region) -> &RegionConfig {
        match region {
            Region::I => &self.region_i,
            Region::II => &self.region_ii,
            Region::III => &self.region_iii,
            Region::IV => &self.region_iv,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (Region, &RegionConfig)> {
        Region::ALL.into_iter().map(move |region| (region, self.get(region)))
    }

    /// Checks that every regional minimum wage is positive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSettings`] naming the first offending
    /// region.
    pub fn validate(&self) -> EngineResult<()> {
        match self.iter().find(|(_, config)| config.min_wage <= Decimal::ZERO) {
            Some((region, _)) => Err(EngineError::InvalidSettings {
                message: format!("minimum wage for region {} must be positive", region),
            }),
            None => Ok(()),
        }
    }
}

/// One progressive income tax bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the bracket (inclusive), or `None` for the top bracket.
    pub threshold: Option<Decimal>,
    /// Tax rate as a fraction (0.05 = 5%).
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bracket ending at `threshold`.
    pub fn bounded(threshold: Decimal, rate: Decimal) -> Self {
        Self {
            threshold: Some(threshold),
            rate,
        }
    }

    /// Creates the open-ended top bracket.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            threshold: None,
            rate,
        }
    }
}

/// Raw regime data as written in a regime YAML file.
///
/// Convert it with [`Regime::new`] to get a validated [`Regime`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeDefinition {
    /// Regime identifier (e.g., "2025").
    pub id: String,
    /// Human-readable name of the regime.
    pub name: String,
    /// Flat per-taxpayer deduction (VND/month).
    pub personal_deduction: Decimal,
    /// Deduction per registered dependent (VND/month).
    pub dependent_deduction: Decimal,
    /// Brackets in strictly increasing threshold order.
    pub brackets: Vec<TaxBracket>,
}

/// A complete, validated tax regime.
///
/// Brackets are guaranteed to be non-empty, strictly increasing by threshold
/// and terminated by exactly one unbounded bracket.
///
/// # Example
///
/// ```
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let regime = loader.get_regime("2026").unwrap();
/// assert_eq!(regime.brackets().len(), 5);
/// assert!(regime.brackets().last().unwrap().threshold.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegimeDefinition", into = "RegimeDefinition")]
pub struct Regime {
    id: String,
    name: String,
    personal_deduction: Decimal,
    dependent_deduction: Decimal,
    brackets: Vec<TaxBracket>,
}

impl Regime {
    /// Validates a definition and builds a regime from it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRegime`] when:
    /// - the bracket list is empty
    /// - a rate is not in `(0, 1]`
    /// - a bounded threshold is not positive or not above its predecessor
    /// - the last bracket is bounded, or an earlier one is unbounded
    /// - a deduction is negative
    pub fn new(definition: RegimeDefinition) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidRegime {
            id: definition.id.clone(),
            message,
        };

        if definition.brackets.is_empty() {
            return Err(invalid("at least one bracket is required".to_string()));
        }
        if definition.personal_deduction < Decimal::ZERO {
            return Err(invalid("personal deduction must not be negative".to_string()));
        }
        if definition.dependent_deduction < Decimal::ZERO {
            return Err(invalid("dependent deduction must not be negative".to_string()));
        }

        let last = definition.brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (index, bracket) in definition.brackets.iter().enumerate() {
            if bracket.rate <= Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} must be within (0, 1]",
                    index + 1,
                    bracket.rate
                )));
            }

            match (bracket.threshold, index == last) {
                (None, true) => {}
                (None, false) => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the last bracket",
                        index + 1
                    )));
                }
                (Some(_), true) => {
                    return Err(invalid("last bracket must be unbounded".to_string()));
                }
                (Some(threshold), false) => {
                    if threshold <= previous {
                        return Err(invalid(format!(
                            "bracket {} threshold {} must be greater than {}",
                            index + 1,
                            threshold,
                            previous
                        )));
                    }
                    previous = threshold;
                }
            }
        }

        Ok(Self {
            id: definition.id,
            name: definition.name,
            personal_deduction: definition.personal_deduction,
            dependent_deduction: definition.dependent_deduction,
            brackets: definition.brackets,
        })
    }

    /// Returns the regime identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the human-readable regime name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the personal deduction.
    pub fn personal_deduction(&self) -> Decimal {
        self.personal_deduction
    }

    /// Returns the per-dependent deduction.
    pub fn dependent_deduction(&self) -> Decimal {
        self.dependent_deduction
    }

    /// Returns the ordered bracket list.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

impl TryFrom<RegimeDefinition> for Regime {
    type Error = EngineError;

    fn try_from(definition: RegimeDefinition) -> EngineResult<Self> {
        Regime::new(definition)
    }
}

impl From<Regime> for RegimeDefinition {
    fn from(regime: Regime) -> Self {
        RegimeDefinition {
            id: regime.id,
            name: regime.name,
            personal_deduction: regime.personal_deduction,
            dependent_deduction: regime.dependent_deduction,
            brackets: regime.brackets,
        }
    }
}

/// Employee-side insurance rates and contribution caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceRates {
    /// Statutory base salary used for the SI/HI cap (VND/month).
    pub base_salary: Decimal,
    /// Social insurance rate.
    pub si_rate: Decimal,
    /// Health insurance rate.
    pub hi_rate: Decimal,
    /// Unemployment insurance rate.
    pub ui_rate: Decimal,
    /// SI/HI cap as a multiple of the base salary.
    pub sihi_cap_multiplier: Decimal,
    /// UI cap as a multiple of the regional minimum wage.
    pub ui_cap_multiplier: Decimal,
}

impl InsuranceRates {
    /// The SI/HI contribution cap (46,800,000 VND with reference values).
    pub fn cap_si_hi(&self) -> Decimal {
        self.sihi_cap_multiplier * self.base_salary
    }

    /// The UI contribution cap for a regional minimum wage.
    pub fn cap_ui(&self, regional_min_wage: Decimal) -> Decimal {
        self.ui_cap_multiplier * regional_min_wage
    }
}

/// Trade union dues settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionDuesConfig {
    /// Dues rate applied to the SI/HI base.
    pub rate: Decimal,
    /// Monthly ceiling on dues (VND).
    pub max_amount: Decimal,
}

/// The two regimes compared by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Id of the regime deltas are measured from.
    pub baseline: String,
    /// Id of the regime deltas are measured to.
    pub proposed: String,
}

/// Engine-wide settings from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Human-readable name of the configuration set.
    pub name: String,
    /// Regional minimum wages, used by every regime.
    pub regional_minimums: RegionalMinimumWages,
    /// Insurance rates and caps.
    pub insurance: InsuranceRates,
    /// Union dues settings.
    pub union_dues: UnionDuesConfig,
    /// Tax-exempt allowance (VND/month) used when a request enables the
    /// allowance without giving an amount.
    pub default_exempt_allowance: Decimal,
    /// Default comparison pair.
    pub comparison: ComparisonConfig,
}

/// The complete engine configuration.
///
/// Guarantees that the baseline and proposed regimes named in the settings
/// are present.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    /// Regimes sorted by id.
    regimes: Vec<Regime>,
    baseline: usize,
    proposed: usize,
}

impl EngineConfig {
    /// Creates a new EngineConfig from settings and regimes.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidSettings`] if a regional minimum wage is not positive
    /// - [`EngineError::InvalidRegime`] if two regimes share an id
    /// - [`EngineError::RegimeNotFound`] if a comparison regime is missing
    pub fn new(settings: EngineSettings, regimes: Vec<Regime>) -> EngineResult<Self> {
        settings.regional_minimums.validate()?;

        let mut sorted = regimes;
        sorted.sort_by(|a, b| a.id().cmp(b.id()));

        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(EngineError::InvalidRegime {
                id: pair[0].id().to_string(),
                message: "regime id is defined more than once".to_string(),
            });
        }

        let position = |id: &str| {
            sorted
                .iter()
                .position(|regime| regime.id() == id)
                .ok_or_else(|| EngineError::RegimeNotFound { id: id.to_string() })
        };
        let baseline = position(&settings.comparison.baseline)?;
        let proposed = position(&settings.comparison.proposed)?;

        Ok(Self {
            settings,
            regimes: sorted,
            baseline,
            proposed,
        })
    }

    /// Returns the engine-wide settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all regimes, sorted by id.
    pub fn regimes(&self) -> &[Regime] {
        &self.regimes
    }

    /// Looks up a regime by id.
    pub fn regime(&self, id: &str) -> Option<&Regime> {
        self.regimes.iter().find(|regime| regime.id() == id)
    }

    /// Returns the regime comparisons start from (2025 by default).
    pub fn baseline_regime(&self) -> &Regime {
        &self.regimes[self.baseline]
    }

    /// Returns the regime comparisons measure against (2026 by default).
    pub fn proposed_regime(&self) -> &Regime {
        &self.regimes[self.proposed]
    }
}
