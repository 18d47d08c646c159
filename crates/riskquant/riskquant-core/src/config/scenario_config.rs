//! Risk scenario definitions: the eight derived-frequency parameters.

use serde::{Deserialize, Serialize};

/// Conventional PERT shape used when a scenario omits kurtosis.
pub const DEFAULT_KURTOSIS: f64 = 4.0;

/// One named risk scenario as written in `riskquant.toml`:
///
/// ```toml
/// [[scenarios]]
/// name = "credential-stuffing"
/// min_tef = 1.0
/// most_likely_tef = 5.0
/// max_tef = 10.0
/// min_vuln = 0.1
/// most_likely_vuln = 0.5
/// max_vuln = 0.9
/// ```
///
/// Range and peak invariants are checked when the model is built, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub min_tef: f64,
    pub max_tef: f64,
    pub most_likely_tef: f64,
    pub min_vuln: f64,
    pub max_vuln: f64,
    pub most_likely_vuln: f64,
    #[serde(default)]
    pub kurtosis_tef: Option<f64>,
    #[serde(default)]
    pub kurtosis_vuln: Option<f64>,
}

impl ScenarioConfig {
    /// Returns the effective TEF kurtosis, defaulting to 4.0.
    pub fn effective_kurtosis_tef(&self) -> f64 {
        self.kurtosis_tef.unwrap_or(DEFAULT_KURTOSIS)
    }

    /// Returns the effective vulnerability kurtosis, defaulting to 4.0.
    pub fn effective_kurtosis_vuln(&self) -> f64 {
        self.kurtosis_vuln.unwrap_or(DEFAULT_KURTOSIS)
    }
}
