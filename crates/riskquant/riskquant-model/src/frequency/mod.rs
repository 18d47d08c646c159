//! Loss-event frequency models.

pub mod derived;
pub mod poisson;

pub use derived::{DerivedFrequencyModel, DerivedFrequencyParams};
pub use poisson::poisson_count;
