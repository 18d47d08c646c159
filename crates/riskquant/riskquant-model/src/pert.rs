//! PERT distribution as a scaled Beta via `statrs` crate.
//!
//! Shape: Beta(1 + t*(peak-low)/(high-low), 1 + t*(high-peak)/(high-low)),
//! rescaled onto [low, high]. `t` is the temperature; higher is tighter.

use rand::distributions::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};

use riskquant_core::errors::{ModelError, ModelResult};

/// A bounded PERT distribution defined by min, most-likely, max and temperature.
#[derive(Debug, Clone)]
pub struct Pert {
    params: PertParams,
    alpha: f64,
    beta: f64,
    unit: Beta,
}

/// The four defining values of a [`Pert`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PertParams {
    pub low: f64,
    pub peak: f64,
    pub high: f64,
    pub temperature: f64,
}

impl Pert {
    /// Build a PERT over `[low, high]` peaking at `peak`.
    ///
    /// Fails with `InvalidParameter` when `low >= high`, the peak falls
    /// outside the bounds, any bound is non-finite, or the temperature is
    /// not a positive finite number. `field` names the offending input.
    pub fn new(low: f64, peak: f64, high: f64, temperature: f64) -> ModelResult<Self> {
        if !(low < high) {
            return Err(ModelError::invalid(
                "low",
                format!("low ({low}) must be less than high ({high})"),
            ));
        }
        if !(low <= peak && peak <= high) {
            return Err(ModelError::invalid(
                "peak",
                format!("peak ({peak}) must lie within [{low}, {high}]"),
            ));
        }
        if !low.is_finite() || !high.is_finite() {
            return Err(ModelError::invalid(
                "bounds",
                format!("bounds [{low}, {high}] must be finite"),
            ));
        }
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(ModelError::invalid(
                "temperature",
                format!("temperature ({temperature}) must be positive and finite"),
            ));
        }

        let range = high - low;
        let alpha = 1.0 + temperature * (peak - low) / range;
        let beta = 1.0 + temperature * (high - peak) / range;
        let unit = Beta::new(alpha, beta)
            .map_err(|e| ModelError::invalid("temperature", e.to_string()))?;

        Ok(Self {
            params: PertParams {
                low,
                peak,
                high,
                temperature,
            },
            alpha,
            beta,
            unit,
        })
    }

    pub fn params(&self) -> PertParams {
        self.params
    }

    pub fn low(&self) -> f64 {
        self.params.low
    }

    pub fn high(&self) -> f64 {
        self.params.high
    }

    pub fn temperature(&self) -> f64 {
        self.params.temperature
    }

    /// Alpha and beta of the underlying unit Beta.
    pub fn shape(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }

    /// `(low + t*peak + high) / (t + 2)`.
    pub fn mean(&self) -> f64 {
        let PertParams {
            low,
            peak,
            high,
            temperature,
        } = self.params;
        (low + temperature * peak + high) / (temperature + 2.0)
    }

    /// The most-likely value.
    pub fn mode(&self) -> f64 {
        self.params.peak
    }

    /// `(mean - low) * (high - mean) / (t + 3)`.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        (mean - self.params.low) * (self.params.high - mean) / (self.params.temperature + 3.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// P(X <= x).
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= self.params.low {
            return 0.0;
        }
        if x >= self.params.high {
            return 1.0;
        }
        self.unit.cdf(self.normalize(x))
    }

    /// Quantile function. `p` is clamped into [0, 1].
    pub fn inverse_cdf(&self, p: f64) -> f64 {
        let p = if p.is_nan() { 0.5 } else { p.clamp(0.0, 1.0) };
        let u = self.unit.inverse_cdf(p);
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.5 };
        self.rescale(u)
    }

    /// Draw `n` independent samples.
    pub fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| self.sample(rng)).collect()
    }

    fn normalize(&self, x: f64) -> f64 {
        (x - self.params.low) / (self.params.high - self.params.low)
    }

    fn rescale(&self, u: f64) -> f64 {
        self.params.low + (self.params.high - self.params.low) * u
    }
}

impl Distribution<f64> for Pert {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = self.unit.sample(rng);
        self.rescale(u)
    }
}
