//! Request types for the salary engine API.
//!
//! This module defines the JSON request bodies for `/calculate` and
//! `/compare`, and the validation step that turns them into calculator
//! inputs. Region and dependent-count domains are enforced by their serde
//! types; money amounts must be whole, non-negative VND.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, EngineSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculatorInputs, ComparisonInputs, Region};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross monthly salary (VND).
    pub gross: Decimal,
    /// Number of registered dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Minimum-wage region ("I" to "IV").
    pub region: Region,
    /// Id of the regime to apply (e.g., "2025").
    pub regime: String,
    /// Optional custom insurance contribution base.
    #[serde(default)]
    pub insurance_base: Option<Decimal>,
    /// Whether the employee is a trade union member.
    #[serde(default)]
    pub is_union_member: bool,
    /// Enables the tax-exempt allowance at its configured default amount.
    #[serde(default)]
    pub has_exempt_allowance: bool,
    /// Optional tax-exempt allowance deducted from taxable income.
    #[serde(default)]
    pub exempt_allowance: Option<Decimal>,
}

impl CalculationRequest {
    /// Validates the request and resolves its regime.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInput`] if the gross salary, insurance base or
    ///   allowance is negative or not a whole VND amount
    /// - [`EngineError::RegimeNotFound`] if the regime id is unknown
    pub fn into_inputs(&self, config: &EngineConfig) -> EngineResult<CalculatorInputs> {
        validate_amounts(self.gross, self.insurance_base, self.exempt_allowance)?;

        let regime = config
            .regime(&self.regime)
            .ok_or_else(|| EngineError::RegimeNotFound {
                id: self.regime.clone(),
            })?;

        Ok(CalculatorInputs {
            gross: self.gross,
            dependents: self.dependents,
            region: self.region,
            regime: regime.clone(),
            insurance_base: self.insurance_base,
            is_union_member: self.is_union_member,
        })
    }

    /// The allowance to apply: the explicit amount, else the configured
    /// default when `has_exempt_allowance` is set.
    pub fn resolved_allowance(&self, settings: &EngineSettings) -> Option<Decimal> {
        resolve_allowance(self.exempt_allowance, self.has_exempt_allowance, settings)
    }
}

/// Request body for the `/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    /// Gross monthly salary (VND).
    pub gross: Decimal,
    /// Number of registered dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Minimum-wage region ("I" to "IV").
    pub region: Region,
    /// Optional custom insurance contribution base.
    #[serde(default)]
    pub insurance_base: Option<Decimal>,
    /// Whether the employee is a trade union member.
    #[serde(default)]
    pub is_union_member: bool,
    /// Enables the tax-exempt allowance at its configured default amount.
    #[serde(default)]
    pub has_exempt_allowance: bool,
    /// Optional tax-exempt allowance deducted from taxable income.
    #[serde(default)]
    pub exempt_allowance: Option<Decimal>,
}

impl ComparisonRequest {
    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if the gross salary, insurance
    /// base or allowance is negative or not a whole VND amount.
    pub fn into_inputs(&self) -> EngineResult<ComparisonInputs> {
        validate_amounts(self.gross, self.insurance_base, self.exempt_allowance)?;

        Ok(ComparisonInputs {
            gross: self.gross,
            dependents: self.dependents,
            region: self.region,
            insurance_base: self.insurance_base,
            is_union_member: self.is_union_member,
        })
    }

    /// The allowance to apply: the explicit amount, else the configured
    /// default when `has_exempt_allowance` is set.
    pub fn resolved_allowance(&self, settings: &EngineSettings) -> Option<Decimal> {
        resolve_allowance(self.exempt_allowance, self.has_exempt_allowance, settings)
    }
}

fn resolve_allowance(
    amount: Option<Decimal>,
    enabled: bool,
    settings: &EngineSettings,
) -> Option<Decimal> {
    amount.or(enabled.then_some(settings.default_exempt_allowance))
}

fn validate_amounts(
    gross: Decimal,
    insurance_base: Option<Decimal>,
    exempt_allowance: Option<Decimal>,
) -> EngineResult<()> {
    let fields = [
        ("gross", Some(gross)),
        ("insurance_base", insurance_base),
        ("exempt_allowance", exempt_allowance),
    ];

    for (field, value) in fields {
        if let Some(amount) = value {
            if amount < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", amount),
                });
            }
            if !amount.fract().is_zero() {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must be a whole VND amount, got {}", amount),
                });
            }
        }
    }

    Ok(())
}
