//! Poisson event counts with a per-draw rate.

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use riskquant_core::errors::{ModelError, ModelResult};

/// Largest accepted rate. Samples stay far below `u64::MAX` at this rate
/// (the standard deviation is about 3e9).
pub const MAX_POISSON_RATE: f64 = 9.0e18;

/// Above this rate counts come from N(rate, rate). The skew is below 1e-6
/// there, and the exact sampler loses precision in its log-gamma terms.
pub const NORMAL_APPROXIMATION_RATE: f64 = 1.0e12;

/// Draw one event count from Poisson(`rate`).
///
/// A zero rate yields zero events. Negative, NaN, infinite, or rates above
/// [`MAX_POISSON_RATE`] are rejected with `ModelError::Sampling`.
pub fn poisson_count<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> ModelResult<u64> {
    if rate == 0.0 {
        return Ok(0);
    }
    if !rate.is_finite() {
        return Err(ModelError::Sampling {
            message: format!("Poisson rate {rate} is not finite"),
        });
    }
    if rate > MAX_POISSON_RATE {
        return Err(ModelError::Sampling {
            message: format!("Poisson rate {rate} exceeds maximum {MAX_POISSON_RATE}"),
        });
    }
    let count: f64 = if rate < NORMAL_APPROXIMATION_RATE {
        let dist = Poisson::new(rate).map_err(|e| ModelError::Sampling {
            message: format!("invalid Poisson rate {rate}: {e}"),
        })?;
        dist.sample(rng)
    } else {
        let dist = Normal::new(rate, rate.sqrt()).map_err(|e| ModelError::Sampling {
            message: format!("invalid Poisson rate {rate}: {e}"),
        })?;
        dist.sample(rng).round().max(0.0)
    };
    if !(count >= 0.0 && count < u64::MAX as f64) {
        return Err(ModelError::Sampling {
            message: format!("Poisson sample {count} does not fit an event count"),
        });
    }
    Ok(count as u64)
}
