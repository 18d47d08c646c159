//! FAIR loss-event frequency modeling.
//!
//! A [`DerivedFrequencyModel`] composes a PERT threat event frequency with a
//! PERT vulnerability probability and turns their product into a Poisson
//! count of loss events. [`FrequencySimulator`] runs it repeatedly and
//! summarizes the counts.

pub mod frequency;
pub mod pert;
pub mod simulation;

pub use frequency::{DerivedFrequencyModel, DerivedFrequencyParams};
pub use pert::{Pert, PertParams};
pub use simulation::{FrequencySimulator, FrequencySummary};
