//! Monte Carlo runs of a frequency model with P10/P50/P90 summaries.
//!
//! Configurable iteration count and seed for reproducibility.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use riskquant_core::config::SimulationConfig;
use riskquant_core::errors::ModelResult;

use crate::frequency::DerivedFrequencyModel;

/// Summary of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySummary {
    pub iterations: u32,
    /// Average loss events per draw.
    pub mean: f64,
    pub p10: u64,
    pub p50: u64,
    pub p90: u64,
    pub max: u64,
    /// Fraction of draws with no loss event.
    pub zero_event_probability: f64,
}

impl FrequencySummary {
    /// Percentiles must be ordered and bounded by the maximum.
    pub fn is_valid(&self) -> bool {
        self.p10 <= self.p50 && self.p50 <= self.p90 && self.p90 <= self.max
    }

    /// Summarize raw counts. Empty input yields an all-zero summary.
    pub fn from_counts(counts: &[u64]) -> Self {
        if counts.is_empty() {
            return Self {
                iterations: 0,
                mean: 0.0,
                p10: 0,
                p50: 0,
                p90: 0,
                max: 0,
                zero_event_probability: 0.0,
            };
        }

        let mut sorted = counts.to_vec();
        sorted.sort_unstable();

        let n = sorted.len() as f64;
        let total: f64 = sorted.iter().map(|&c| c as f64).sum();
        let zeros = sorted.iter().take_while(|&&c| c == 0).count();

        Self {
            iterations: u32::try_from(sorted.len()).unwrap_or(u32::MAX),
            mean: total / n,
            p10: percentile(&sorted, 10),
            p50: percentile(&sorted, 50),
            p90: percentile(&sorted, 90),
            max: sorted[sorted.len() - 1],
            zero_event_probability: zeros as f64 / n,
        }
    }
}

/// Monte Carlo runner for a [`DerivedFrequencyModel`].
pub struct FrequencySimulator {
    iterations: u32,
    /// `None` seeds from OS entropy on every run.
    seed: Option<u64>,
}

impl FrequencySimulator {
    /// Create a simulator; at least one iteration is always run.
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
            seed: None,
        }
    }

    /// Set a deterministic seed for reproducible results.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let sim = Self::new(config.effective_iterations());
        match config.seed {
            Some(seed) => sim.with_seed(seed),
            None => sim,
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Draw `iterations` counts from `model` and summarize them.
    pub fn run(&self, model: &DerivedFrequencyModel) -> ModelResult<FrequencySummary> {
        let started = Instant::now();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let counts = model.draw(self.iterations as usize, &mut rng)?;
        let summary = FrequencySummary::from_counts(&counts);

        tracing::info!(
            iterations = self.iterations,
            seed = ?self.seed,
            expected_rate = model.expected_rate(),
            mean = summary.mean,
            p50 = summary.p50,
            p90 = summary.p90,
            simulation_time_ms = started.elapsed().as_millis() as u64,
            "frequency simulation complete"
        );
        Ok(summary)
    }
}

impl Default for FrequencySimulator {
    fn default() -> Self {
        Self::new(riskquant_core::config::simulation_config::DEFAULT_ITERATIONS)
    }
}

/// k-th percentile of a sorted slice, nearest rank.
fn percentile(sorted: &[u64], k: u32) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (k as f64 / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
