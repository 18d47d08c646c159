//! Top-level RiskQuant configuration with layered resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScenarioConfig, SimulationConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the root passed to `load`.
pub const PROJECT_CONFIG_FILE: &str = "riskquant.toml";

pub const ENV_SIMULATION_ITERATIONS: &str = "RISKQUANT_SIMULATION_ITERATIONS";
pub const ENV_SIMULATION_SEED: &str = "RISKQUANT_SIMULATION_SEED";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`RISKQUANT_*`)
/// 3. Project config (`riskquant.toml` in project root)
/// 4. User config (`~/.riskquant/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskQuantConfig {
    pub simulation: SimulationConfig,
    pub scenarios: Vec<ScenarioConfig>,
}

/// Overrides supplied by the embedding application.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub iterations: Option<u32>,
    pub seed: Option<u64>,
}

impl RiskQuantConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;

        tracing::debug!(
            iterations = config.simulation.effective_iterations(),
            seed = ?config.simulation.seed,
            scenarios = config.scenarios.len(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RiskQuantConfig) -> Result<(), ConfigError> {
        if config.simulation.iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (i, scenario) in config.scenarios.iter().enumerate() {
            if scenario.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("scenarios[{i}].name"),
                    message: "must not be empty".to_string(),
                });
            }
            if !seen.insert(scenario.name.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("scenarios[{i}].name"),
                    message: format!("duplicate scenario name '{}'", scenario.name),
                });
            }
        }
        Ok(())
    }

    /// Look up a scenario by name.
    pub fn scenario(&self, name: &str) -> Option<&ScenarioConfig> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Returns the user config path: `~/.riskquant/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".riskquant").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut RiskQuantConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RiskQuantConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Merge `other` into `base`. Scalar settings override only when set;
    /// a non-empty scenario list replaces the inherited one wholesale.
    fn merge(base: &mut RiskQuantConfig, other: RiskQuantConfig) {
        if other.simulation.iterations.is_some() {
            base.simulation.iterations = other.simulation.iterations;
        }
        if other.simulation.seed.is_some() {
            base.simulation.seed = other.simulation.seed;
        }
        if !other.scenarios.is_empty() {
            base.scenarios = other.scenarios;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `RISKQUANT_SIMULATION_ITERATIONS`, `RISKQUANT_SIMULATION_SEED`.
    fn apply_env_overrides(config: &mut RiskQuantConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var(ENV_SIMULATION_ITERATIONS) {
            let v = val.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                field: ENV_SIMULATION_ITERATIONS.to_string(),
                message: e.to_string(),
            })?;
            config.simulation.iterations = Some(v);
        }
        if let Ok(val) = std::env::var(ENV_SIMULATION_SEED) {
            let v = val.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                field: ENV_SIMULATION_SEED.to_string(),
                message: e.to_string(),
            })?;
            config.simulation.seed = Some(v);
        }
        Ok(())
    }

    /// Apply programmatic overrides (highest priority).
    pub fn apply_overrides(config: &mut RiskQuantConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.iterations {
            config.simulation.iterations = Some(v);
        }
        if let Some(v) = overrides.seed {
            config.simulation.seed = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
