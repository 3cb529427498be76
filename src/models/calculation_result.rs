//! Calculation result models for the salary engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures that capture all outputs of a gross-to-net calculation,
//! including insurance, deductions, the bracket-by-bracket tax breakdown,
//! union dues and an audit trace. [`ComparisonResult`] pairs two results
//! with their signed deltas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculatorInputs;

/// Insurance contribution bases after floor/cap clamping.
///
/// # Example
///
/// ```
/// use salary_engine::models::InsuranceBases;
/// use rust_decimal::Decimal;
///
/// let bases = InsuranceBases {
///     base_si_hi: Decimal::from(30_000_000),
///     base_ui: Decimal::from(30_000_000),
/// };
/// assert_eq!(bases.base_si_hi, bases.base_ui);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceBases {
    /// Base for social and health insurance.
    pub base_si_hi: Decimal,
    /// Base for unemployment insurance.
    pub base_ui: Decimal,
}

/// Employee-side insurance contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    /// The bases the amounts were computed from.
    pub bases: InsuranceBases,
    /// Social insurance (BHXH).
    pub si: Decimal,
    /// Health insurance (BHYT).
    pub hi: Decimal,
    /// Unemployment insurance (BHTN).
    pub ui: Decimal,
    /// `si + hi + ui`.
    pub total: Decimal,
}

/// Deductions subtracted from gross before tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Personal deduction.
    pub personal: Decimal,
    /// Dependent count × per-dependent deduction.
    pub dependents: Decimal,
    /// Insurance total.
    pub insurance: Decimal,
    /// Sum of the three.
    pub total: Decimal,
}

/// Tax charged within one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitItem {
    /// Display label, e.g. "Bậc 2: 5.000.000–10.000.000 @ 10%".
    pub label: String,
    /// Income allocated to this bracket.
    pub slab: Decimal,
    /// Bracket rate.
    pub rate: Decimal,
    /// Tax on the slab, rounded to whole VND.
    pub tax: Decimal,
}

/// Personal income tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pit {
    /// Taxable income, never negative.
    pub taxable: Decimal,
    /// Per-bracket items, lowest bracket first.
    pub items: Vec<PitItem>,
    /// Sum of item taxes.
    pub total: Decimal,
}

/// Trade union dues for a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionDues {
    /// Dues payable: `min(base × rate, max_amount)`.
    pub amount: Decimal,
    /// The SI/HI base the dues were computed from.
    pub calculation_base: Decimal,
    /// Whether the ceiling was applied.
    pub capped_at_max: bool,
    /// The dues rate.
    pub rate: Decimal,
    /// The dues ceiling.
    pub max_amount: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of the
/// gross-to-net pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of one regime's calculation for one input set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The inputs the result was computed from.
    pub inputs: CalculatorInputs,
    /// Insurance contributions.
    pub insurance: Insurance,
    /// Pre-tax deductions.
    pub deductions: Deductions,
    /// Personal income tax.
    pub pit: Pit,
    /// `gross − insurance.total − pit.total`.
    pub net: Decimal,
    /// Present only for union members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union_dues: Option<UnionDues>,
    /// Tax-exempt allowance that reduced taxable income, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_allowance: Option<Decimal>,
    /// Take-home pay after union dues.
    pub final_net: Decimal,
    /// Steps taken to produce this result.
    pub audit_trace: Vec<AuditStep>,
}

/// Signed differences between two calculation results (proposed − baseline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeDeltas {
    /// Δ personal deduction.
    pub personal_deduction: Decimal,
    /// Δ dependent deduction.
    pub dependent_deduction: Decimal,
    /// Δ total deductions.
    pub total_deductions: Decimal,
    /// Δ insurance total; zero whenever both regimes share a regional table.
    pub insurance: Decimal,
    /// Δ taxable income.
    pub taxable_income: Decimal,
    /// Δ PIT total.
    pub pit: Decimal,
    /// Δ net salary (positive means the proposed regime pays more).
    pub net_salary: Decimal,
}

impl RegimeDeltas {
    /// Computes `proposed − baseline` for every compared field.
    pub fn between(baseline: &CalculationResult, proposed: &CalculationResult) -> Self {
        Self {
            personal_deduction: proposed.deductions.personal - baseline.deductions.personal,
            dependent_deduction: proposed.deductions.dependents - baseline.deductions.dependents,
            total_deductions: proposed.deductions.total - baseline.deductions.total,
            insurance: proposed.insurance.total - baseline.insurance.total,
            taxable_income: proposed.pit.taxable - baseline.pit.taxable,
            pit: proposed.pit.total - baseline.pit.total,
            net_salary: proposed.net - baseline.net,
        }
    }
}

/// Side-by-side results for two regimes on identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Result under the baseline regime (2025 by default).
    pub baseline: CalculationResult,
    /// Result under the proposed regime (2026 by default).
    pub proposed: CalculationResult,
    /// `proposed − baseline`.
    pub deltas: RegimeDeltas,
}
