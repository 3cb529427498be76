//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files, or from the reference tables embedded in
//! the crate.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineSettings, Regime};

const BUILTIN_ENGINE: &str = include_str!("../../config/vn/engine.yaml");
const BUILTIN_REGIMES: [(&str, &str); 2] = [
    (
        "regimes/2025.yaml",
        include_str!("../../config/vn/regimes/2025.yaml"),
    ),
    (
        "regimes/2026.yaml",
        include_str!("../../config/vn/regimes/2026.yaml"),
    ),
];

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query regimes and engine settings.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/vn/
/// ├── engine.yaml          # Regional minimums, insurance, union dues, comparison pair
/// └── regimes/
///     ├── 2025.yaml        # One file per tax regime
///     └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/vn").unwrap();
///
/// let regime = loader.get_regime("2025").unwrap();
/// println!("Personal deduction: {}", regime.personal_deduction());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/vn")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or an invalid regime
    /// - A regional minimum wage in `engine.yaml` is not positive
    /// - A comparison regime named in `engine.yaml` is not defined
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let regimes = Self::load_regimes(&path.join("regimes"))?;

        debug!(
            path = %path.display(),
            regimes = regimes.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, regimes)?,
        })
    }

    /// Builds the configuration from the reference tables compiled into the
    /// crate (the same files as `config/vn`).
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// assert_eq!(loader.config().baseline_regime().id(), "2025");
    /// assert_eq!(loader.config().proposed_regime().id(), "2026");
    /// ```
    pub fn builtin() -> EngineResult<Self> {
        let settings = Self::parse_yaml::<EngineSettings>("engine.yaml", BUILTIN_ENGINE)?;
        let regimes = BUILTIN_REGIMES
            .iter()
            .map(|(name, content)| Self::parse_yaml::<Regime>(name, content))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            config: EngineConfig::new(settings, regimes)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse_yaml(&path_str, &content)
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(path: &str, content: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads all regime files from the regimes directory.
    fn load_regimes(regimes_dir: &Path) -> EngineResult<Vec<Regime>> {
        let regimes_dir_str = regimes_dir.display().to_string();

        let entries = fs::read_dir(regimes_dir).map_err(|_| EngineError::ConfigNotFound {
            path: regimes_dir_str.clone(),
        })?;

        let mut regimes = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: regimes_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                regimes.push(Self::load_yaml::<Regime>(&path)?);
            }
        }

        if regimes.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no regime files found)", regimes_dir_str),
            });
        }

        Ok(regimes)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gets a regime by its id.
    ///
    /// # Arguments
    ///
    /// * `id` - The regime id (e.g., "2025")
    ///
    /// # Returns
    ///
    /// Returns the regime if found, or `RegimeNotFound` error.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin()?;
    /// let regime = loader.get_regime("2026")?;
    /// assert_eq!(regime.name(), "Proposed law (2026)");
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn get_regime(&self, id: &str) -> EngineResult<&Regime> {
        self.config
            .regime(id)
            .ok_or_else(|| EngineError::RegimeNotFound { id: id.to_string() })
    }
}
