//! Calculation logic for the salary engine.
//!
//! This module contains the gross-to-net pipeline: insurance base
//! resolution, insurance contributions, pre-tax deductions, progressive
//! income tax, trade union dues, the single-regime orchestrator and the
//! two-regime comparator.

mod comparison;
mod deductions;
mod insurance;
mod insurance_base;
mod net_salary;
mod progressive_tax;
mod rounding;
mod union_dues;

pub use comparison::{compare_regimes, compare_regimes_with};
pub use deductions::aggregate_deductions;
pub use insurance::calculate_insurance;
pub use insurance_base::resolve_insurance_bases;
pub use net_salary::calculate_all;
pub use progressive_tax::calculate_pit;
pub use rounding::{clamp, round_vnd};
pub use union_dues::{calculate_union_dues, final_net};
