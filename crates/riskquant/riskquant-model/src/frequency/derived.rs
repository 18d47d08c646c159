//! Derived loss-event frequency: PERT threat event frequency times PERT
//! vulnerability, fed as the rate of a Poisson event count.
//!
//! FAIR guidance: the most likely value sets the skew/peak, and the
//! confidence in it sets the kurtosis (temperature) of each distribution.

use rand::Rng;
use serde::{Deserialize, Serialize};

use riskquant_core::config::ScenarioConfig;
use riskquant_core::errors::{ModelError, ModelResult};

use super::poisson::poisson_count;
use crate::pert::Pert;

/// The eight construction parameters of a [`DerivedFrequencyModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFrequencyParams {
    pub min_tef: f64,
    pub max_tef: f64,
    pub most_likely_tef: f64,
    pub min_vuln: f64,
    pub max_vuln: f64,
    pub most_likely_vuln: f64,
    pub kurtosis_tef: f64,
    pub kurtosis_vuln: f64,
}

impl From<&ScenarioConfig> for DerivedFrequencyParams {
    fn from(scenario: &ScenarioConfig) -> Self {
        Self {
            min_tef: scenario.min_tef,
            max_tef: scenario.max_tef,
            most_likely_tef: scenario.most_likely_tef,
            min_vuln: scenario.min_vuln,
            max_vuln: scenario.max_vuln,
            most_likely_vuln: scenario.most_likely_vuln,
            kurtosis_tef: scenario.effective_kurtosis_tef(),
            kurtosis_vuln: scenario.effective_kurtosis_vuln(),
        }
    }
}

/// Loss-event frequency derived from threat event frequency and vulnerability.
///
/// Immutable once built. Owns one PERT per factor.
#[derive(Debug, Clone)]
pub struct DerivedFrequencyModel {
    params: DerivedFrequencyParams,
    distribution_tef: Pert,
    distribution_vuln: Pert,
}

impl DerivedFrequencyModel {
    /// Validate the parameters and build both distributions.
    ///
    /// Checks run in this order and the first failure is returned:
    /// TEF range, vulnerability range, TEF peak containment, vulnerability
    /// peak containment, then finiteness and positive kurtosis.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        min_tef: f64,
        max_tef: f64,
        most_likely_tef: f64,
        min_vuln: f64,
        max_vuln: f64,
        most_likely_vuln: f64,
        kurtosis_tef: f64,
        kurtosis_vuln: f64,
    ) -> ModelResult<Self> {
        Self::from_params(&DerivedFrequencyParams {
            min_tef,
            max_tef,
            most_likely_tef,
            min_vuln,
            max_vuln,
            most_likely_vuln,
            kurtosis_tef,
            kurtosis_vuln,
        })
    }

    /// Same as [`DerivedFrequencyModel::new`] from a parameter record.
    pub fn from_params(params: &DerivedFrequencyParams) -> ModelResult<Self> {
        if let Err(e) = validate(params) {
            tracing::debug!(
                field = e.field().unwrap_or_default(),
                error = %e,
                "rejected derived frequency parameters"
            );
            return Err(e);
        }

        let distribution_tef = Pert::new(
            params.min_tef,
            params.most_likely_tef,
            params.max_tef,
            params.kurtosis_tef,
        )
        .map_err(|e| qualify(e, "tef"))?;
        let distribution_vuln = Pert::new(
            params.min_vuln,
            params.most_likely_vuln,
            params.max_vuln,
            params.kurtosis_vuln,
        )
        .map_err(|e| qualify(e, "vuln"))?;

        let model = Self {
            params: *params,
            distribution_tef,
            distribution_vuln,
        };
        tracing::debug!(
            expected_rate = model.expected_rate(),
            tef_mean = model.distribution_tef.mean(),
            vuln_mean = model.distribution_vuln.mean(),
            "built derived frequency model"
        );
        Ok(model)
    }

    /// Build from a configured scenario, filling in default kurtosis.
    pub fn from_scenario(scenario: &ScenarioConfig) -> ModelResult<Self> {
        Self::from_params(&DerivedFrequencyParams::from(scenario))
    }

    /// Draw `n` loss-event counts.
    ///
    /// Samples `n` TEF values and `n` vulnerability values, multiplies them
    /// pairwise, and draws one Poisson count per product, preserving order.
    /// `n == 0` returns an empty vector. Every call consumes fresh randomness
    /// from `rng`.
    pub fn draw<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> ModelResult<Vec<u64>> {
        let tef = self.distribution_tef.sample_n(n, rng);
        let vuln = self.distribution_vuln.sample_n(n, rng);

        let counts = tef
            .iter()
            .zip(&vuln)
            .map(|(t, v)| poisson_count(t * v, rng))
            .collect::<ModelResult<Vec<_>>>()?;

        tracing::trace!(draw_count = n, "drew loss-event counts");
        Ok(counts)
    }

    /// Draw a single loss-event count.
    pub fn draw_one<R: Rng + ?Sized>(&self, rng: &mut R) -> ModelResult<u64> {
        Ok(self.draw(1, rng)?.first().copied().unwrap_or(0))
    }

    /// Central value reported for this model: the mode of the TEF
    /// distribution, i.e. `most_likely_tef`.
    ///
    /// This mirrors the plain PERT frequency model, whose `mean` reports
    /// its distribution's mode. It ignores vulnerability entirely; use
    /// [`DerivedFrequencyModel::expected_rate`] for the expected number
    /// of loss events.
    pub fn mean(&self) -> f64 {
        self.distribution_tef.mode()
    }

    /// E[TEF] * E[Vuln], the mean of the Poisson mixture.
    pub fn expected_rate(&self) -> f64 {
        self.distribution_tef.mean() * self.distribution_vuln.mean()
    }

    pub fn params(&self) -> &DerivedFrequencyParams {
        &self.params
    }

    /// Threat event frequency distribution.
    pub fn tef(&self) -> &Pert {
        &self.distribution_tef
    }

    /// Vulnerability distribution.
    pub fn vuln(&self) -> &Pert {
        &self.distribution_vuln
    }
}

fn validate(p: &DerivedFrequencyParams) -> ModelResult<()> {
    if p.min_tef >= p.max_tef {
        return Err(ModelError::invalid(
            "min_tef",
            format!("min_tef ({}) must be less than max_tef ({})", p.min_tef, p.max_tef),
        ));
    }
    if p.min_vuln >= p.max_vuln {
        return Err(ModelError::invalid(
            "min_vuln",
            format!("min_vuln ({}) must be less than max_vuln ({})", p.min_vuln, p.max_vuln),
        ));
    }
    if !(p.min_tef <= p.most_likely_tef && p.most_likely_tef <= p.max_tef) {
        return Err(ModelError::invalid(
            "most_likely_tef",
            format!(
                "most_likely_tef ({}) must lie within [{}, {}]",
                p.most_likely_tef, p.min_tef, p.max_tef
            ),
        ));
    }
    if !(p.min_vuln <= p.most_likely_vuln && p.most_likely_vuln <= p.max_vuln) {
        return Err(ModelError::invalid(
            "most_likely_vuln",
            format!(
                "most_likely_vuln ({}) must lie within [{}, {}]",
                p.most_likely_vuln, p.min_vuln, p.max_vuln
            ),
        ));
    }
    Ok(())
}

/// Prefix a `Pert` field name with the factor it belongs to.
fn qualify(err: ModelError, factor: &str) -> ModelError {
    match err {
        ModelError::InvalidParameter { field, message } => ModelError::InvalidParameter {
            field: format!("{factor}.{field}"),
            message,
        },
        other => other,
    }
}
