//! Core data models for the salary engine.
//!
//! This module contains the plain-data inputs and results exchanged with
//! the calculation functions.

mod calculation_result;
mod inputs;

pub use calculation_result::{
    AuditStep, CalculationResult, ComparisonResult, Deductions, Insurance, InsuranceBases, Pit,
    PitItem, RegimeDeltas, UnionDues,
};
pub use inputs::{CalculatorInputs, ComparisonInputs, Region};
