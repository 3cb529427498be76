//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! validating inputs and calculating net salary.

use thiserror::Error;

/// The main error type for the salary engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Regime id was not found in the configuration.
    #[error("Regime not found: {id}")]
    RegimeNotFound {
        /// The regime id that was not found.
        id: String,
    },

    /// A regime definition broke one of its structural rules.
    #[error("Invalid regime '{id}': {message}")]
    InvalidRegime {
        /// The id of the offending regime.
        id: String,
        /// A description of the violated rule.
        message: String,
    },

    /// Engine-wide settings broke one of their rules.
    #[error("Invalid engine settings: {message}")]
    InvalidSettings {
        /// A description of the violated rule.
        message: String,
    },

    /// A calculation request carried an out-of-range value.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A calculation function was called with an argument outside its domain.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// A description of the invalid argument.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
