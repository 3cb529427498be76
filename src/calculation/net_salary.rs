//! Single-regime gross-to-net orchestration.
//!
//! [`calculate_all`] chains the calculators for one regime and records an
//! [`AuditStep`] for every stage it runs.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::{AuditStep, CalculationResult, CalculatorInputs};

use super::deductions::aggregate_deductions;
use super::insurance::calculate_insurance;
use super::insurance_base::resolve_insurance_bases;
use super::progressive_tax::calculate_pit;
use super::union_dues::calculate_union_dues;

/// Runs the full gross-to-net calculation for one regime.
///
/// The optional `exempt_allowance` (for example a lunch allowance) is
/// subtracted from taxable income once. It lowers the tax inside `net` and
/// is not added to `final_net` afterwards, so `final_net` is `net` minus any
/// union dues. Passing `None` gives the same result as a calculation without
/// an allowance concept.
///
/// # Errors
///
/// Propagates [`EngineError::InvalidArgument`](crate::error::EngineError)
/// from the union dues calculation.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_all;
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
///
/// let result = calculate_all(&inputs, None, loader.config().settings()).unwrap();
/// assert_eq!(result.pit.total, Decimal::from(455_000));
/// assert_eq!(result.net, Decimal::from(26_395_000));
/// ```
pub fn calculate_all(
    inputs: &CalculatorInputs,
    exempt_allowance: Option<Decimal>,
    settings: &EngineSettings,
) -> EngineResult<CalculationResult> {
    let regime = &inputs.regime;
    let rates = &settings.insurance;
    let mut audit_trace = Vec::new();

    let regional_min_wage = settings.regional_minimums.get(inputs.region).min_wage;
    let bases = resolve_insurance_bases(
        inputs.gross,
        regional_min_wage,
        rates,
        inputs.insurance_base,
    );
    audit_trace.push(AuditStep {
        step_number: 1,
        rule_id: "insurance_base".to_string(),
        rule_name: "Insurance Base Resolution".to_string(),
        input: serde_json::json!({
            "candidate": inputs.contribution_candidate().to_string(),
            "custom_base": inputs.insurance_base.map(|base| base.to_string()),
            "region": inputs.region,
            "regional_min_wage": regional_min_wage.to_string(),
            "cap_si_hi": rates.cap_si_hi().to_string(),
            "cap_ui": rates.cap_ui(regional_min_wage).to_string()
        }),
        output: serde_json::json!({
            "base_si_hi": bases.base_si_hi.to_string(),
            "base_ui": bases.base_ui.to_string()
        }),
        reasoning: format!(
            "Clamped {} VND to the region {} floor of {} VND: SI/HI base {}, UI base {}",
            inputs.contribution_candidate(),
            inputs.region,
            regional_min_wage,
            bases.base_si_hi,
            bases.base_ui
        ),
    });

    let insurance = calculate_insurance(bases, rates);
    audit_trace.push(AuditStep {
        step_number: 2,
        rule_id: "insurance_contributions".to_string(),
        rule_name: "Insurance Contributions".to_string(),
        input: serde_json::json!({
            "base_si_hi": bases.base_si_hi.to_string(),
            "base_ui": bases.base_ui.to_string(),
            "si_rate": rates.si_rate.normalize().to_string(),
            "hi_rate": rates.hi_rate.normalize().to_string(),
            "ui_rate": rates.ui_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "si": insurance.si.to_string(),
            "hi": insurance.hi.to_string(),
            "ui": insurance.ui.to_string(),
            "total": insurance.total.to_string()
        }),
        reasoning: format!(
            "SI {} + HI {} + UI {} = {} VND",
            insurance.si, insurance.hi, insurance.ui, insurance.total
        ),
    });

    let deductions = aggregate_deductions(regime, inputs.dependents, insurance.total);
    audit_trace.push(AuditStep {
        step_number: 3,
        rule_id: "deductions".to_string(),
        rule_name: "Pre-tax Deductions".to_string(),
        input: serde_json::json!({
            "regime": regime.id(),
            "dependents": inputs.dependents,
            "insurance_total": insurance.total.to_string()
        }),
        output: serde_json::json!({
            "personal": deductions.personal.to_string(),
            "dependents": deductions.dependents.to_string(),
            "insurance": deductions.insurance.to_string(),
            "total": deductions.total.to_string()
        }),
        reasoning: format!(
            "Personal {} + {} dependent(s) × {} + insurance {} = {} VND",
            deductions.personal,
            inputs.dependents,
            regime.dependent_deduction(),
            deductions.insurance,
            deductions.total
        ),
    });

    let allowance = exempt_allowance.unwrap_or(Decimal::ZERO);
    let taxable = (inputs.gross - deductions.total - allowance).max(Decimal::ZERO);
    audit_trace.push(AuditStep {
        step_number: 4,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        input: serde_json::json!({
            "gross": inputs.gross.to_string(),
            "deductions_total": deductions.total.to_string(),
            "exempt_allowance": exempt_allowance.map(|amount| amount.to_string())
        }),
        output: serde_json::json!({
            "taxable": taxable.to_string()
        }),
        reasoning: match exempt_allowance {
            Some(amount) => format!(
                "max(0, {} - {} - exempt allowance {}) = {} VND",
                inputs.gross, deductions.total, amount, taxable
            ),
            None => format!(
                "max(0, {} - {}) = {} VND",
                inputs.gross, deductions.total, taxable
            ),
        },
    });

    let pit = calculate_pit(taxable, regime);
    let items: Vec<serde_json::Value> = pit
        .items
        .iter()
        .map(|item| {
            serde_json::json!({
                "label": item.label,
                "slab": item.slab.to_string(),
                "tax": item.tax.to_string()
            })
        })
        .collect();
    audit_trace.push(AuditStep {
        step_number: 5,
        rule_id: "progressive_tax".to_string(),
        rule_name: "Progressive Income Tax".to_string(),
        input: serde_json::json!({
            "taxable": pit.taxable.to_string(),
            "regime": regime.id(),
            "brackets": regime.brackets().len()
        }),
        output: serde_json::json!({
            "items": items,
            "total": pit.total.to_string()
        }),
        reasoning: format!(
            "Taxable income spans {} bracket(s) of regime {}; tax {} VND",
            pit.items.len(),
            regime.id(),
            pit.total
        ),
    });

    let net = inputs.gross - insurance.total - pit.total;
    audit_trace.push(AuditStep {
        step_number: 6,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross": inputs.gross.to_string(),
            "insurance_total": insurance.total.to_string(),
            "pit_total": pit.total.to_string()
        }),
        output: serde_json::json!({
            "net": net.to_string()
        }),
        reasoning: format!(
            "{} - {} - {} = {} VND",
            inputs.gross, insurance.total, pit.total, net
        ),
    });

    let union_dues = if inputs.is_union_member {
        let dues = calculate_union_dues(bases.base_si_hi, &settings.union_dues)?;
        audit_trace.push(AuditStep {
            step_number: 7,
            rule_id: "union_dues".to_string(),
            rule_name: "Trade Union Dues".to_string(),
            input: serde_json::json!({
                "base_si_hi": dues.calculation_base.to_string(),
                "rate": dues.rate.normalize().to_string(),
                "max_amount": dues.max_amount.to_string()
            }),
            output: serde_json::json!({
                "amount": dues.amount.to_string(),
                "capped_at_max": dues.capped_at_max
            }),
            reasoning: if dues.capped_at_max {
                format!("Dues capped at {} VND", dues.max_amount)
            } else {
                format!(
                    "{} × {} = {} VND",
                    dues.calculation_base,
                    dues.rate.normalize(),
                    dues.amount
                )
            },
        });
        Some(dues)
    } else {
        None
    };

    let dues_amount = union_dues
        .as_ref()
        .map_or(Decimal::ZERO, |dues| dues.amount);
    let final_net = net - dues_amount;
    let step_number = audit_trace.len() as u32 + 1;
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "final_net".to_string(),
        rule_name: "Final Take-home Pay".to_string(),
        input: serde_json::json!({
            "net": net.to_string(),
            "union_dues": dues_amount.to_string()
        }),
        output: serde_json::json!({
            "final_net": final_net.to_string()
        }),
        reasoning: format!("{} - union dues {} = {} VND", net, dues_amount, final_net),
    });

    debug!(
        gross = %inputs.gross,
        regime = regime.id(),
        region = %inputs.region,
        net = %net,
        final_net = %final_net,
        "calculated net salary"
    );

    Ok(CalculationResult {
        inputs: inputs.clone(),
        insurance,
        deductions,
        pit,
        net,
        union_dues,
        lunch_allowance: exempt_allowance,
        final_net,
        audit_trace,
    })
}
