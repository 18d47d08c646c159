//! Configuration system for RiskQuant.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod riskquant_config;
pub mod scenario_config;
pub mod simulation_config;

pub use riskquant_config::{ConfigOverrides, RiskQuantConfig};
pub use scenario_config::ScenarioConfig;
pub use simulation_config::SimulationConfig;
