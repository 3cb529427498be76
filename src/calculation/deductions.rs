//! Pre-tax deduction aggregation.

use rust_decimal::Decimal;

use crate::config::Regime;
use crate::models::Deductions;

/// Sums the personal, dependent and insurance deductions for a regime.
pub fn aggregate_deductions(
    regime: &Regime,
    dependents: u32,
    insurance_total: Decimal,
) -> Deductions {
    let personal = regime.personal_deduction();
    let dependents = Decimal::from(dependents) * regime.dependent_deduction();

    Deductions {
        personal,
        dependents,
        insurance: insurance_total,
        total: personal + dependents + insurance_total,
    }
}
