//! Configuration loading and management for the salary engine.
//!
//! This module provides functionality to load the regime and region tables
//! from YAML files: insurance rates and caps, union dues, tax regimes with
//! their bracket schedules, and regional minimum wages.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/vn").unwrap();
//! println!("Loaded: {}", config.config().settings().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ComparisonConfig, EngineConfig, EngineSettings, InsuranceRates, Regime, RegimeDefinition,
    RegionConfig, RegionalMinimumWages, TaxBracket, UnionDuesConfig,
};
