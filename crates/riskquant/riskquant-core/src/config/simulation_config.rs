//! Monte Carlo simulation configuration.

use serde::{Deserialize, Serialize};

/// Default iteration count when none is configured.
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Configuration for the frequency simulator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Draws per simulation run. Default: 10 000.
    pub iterations: Option<u32>,
    /// Fixed RNG seed for reproducible runs. Default: seeded from entropy.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Returns the effective iteration count, defaulting to 10 000.
    pub fn effective_iterations(&self) -> u32 {
        self.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }
}
