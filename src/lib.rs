//! Gross-to-net salary engine for Vietnamese payroll.
//!
//! This crate computes employee insurance contributions, pre-tax deductions,
//! progressive personal income tax, trade union dues and take-home pay for a
//! monthly gross salary, and compares the current (2025) and proposed (2026)
//! tax regimes on identical inputs.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
