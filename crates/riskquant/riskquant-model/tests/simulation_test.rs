//! Frequency simulator tests, including scenarios loaded from TOML.

use riskquant_core::config::RiskQuantConfig;
use riskquant_core::errors::ModelError;
use riskquant_model::{DerivedFrequencyModel, FrequencySimulator, FrequencySummary};

const CONFIG: &str = r#"
[simulation]
iterations = 5_000
seed = 42

[[scenarios]]
name = "credential-stuffing"
min_tef = 1.0
max_tef = 10.0
most_likely_tef = 5.0
min_vuln = 0.1
max_vuln = 0.9
most_likely_vuln = 0.5
kurtosis_tef = 2.0
kurtosis_vuln = 2.0

[[scenarios]]
name = "insider-misuse"
min_tef = 0.1
max_tef = 2.0
most_likely_tef = 0.5
min_vuln = 0.05
max_vuln = 0.3
most_likely_vuln = 0.1

[[scenarios]]
name = "misconfigured"
min_tef = 1.0
max_tef = 10.0
most_likely_tef = 20.0
min_vuln = 0.1
max_vuln = 0.9
most_likely_vuln = 0.5
"#;

#[test]
fn configured_scenario_builds_model() {
    let config = RiskQuantConfig::from_toml(CONFIG).unwrap();
    let scenario = config.scenario("insider-misuse").unwrap();
    let model = DerivedFrequencyModel::from_scenario(scenario).unwrap();

    assert_eq!(model.params().kurtosis_tef, 4.0);
    assert_eq!(model.params().kurtosis_vuln, 4.0);
    assert_eq!(model.mean(), 0.5);
}

#[test]
fn misconfigured_scenario_is_rejected() {
    let config = RiskQuantConfig::from_toml(CONFIG).unwrap();
    let scenario = config.scenario("misconfigured").unwrap();
    let err = DerivedFrequencyModel::from_scenario(scenario).unwrap_err();
    assert_eq!(err.field(), Some("most_likely_tef"));
}

#[test]
fn simulation_from_config_is_reproducible() {
    let config = RiskQuantConfig::from_toml(CONFIG).unwrap();
    let model = DerivedFrequencyModel::from_scenario(config.scenario("credential-stuffing").unwrap())
        .unwrap();

    let first = FrequencySimulator::from_config(&config.simulation).run(&model).unwrap();
    let second = FrequencySimulator::from_config(&config.simulation).run(&model).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.iterations, 5_000);
    assert!(first.is_valid(), "percentiles out of order: {first:?}");
}

#[test]
fn summary_mean_tracks_expected_rate() {
    let model = DerivedFrequencyModel::new(1.0, 10.0, 5.0, 0.1, 0.9, 0.5, 2.0, 2.0).unwrap();
    let summary = FrequencySimulator::new(50_000).with_seed(7).run(&model).unwrap();
    let expected = model.expected_rate();
    assert!(
        (summary.mean - expected).abs() / expected < 0.05,
        "mean {} vs expected {}",
        summary.mean,
        expected
    );
    assert!(summary.p10 <= 2 && summary.p90 >= 3, "{summary:?}");
}

#[test]
fn rare_scenario_is_mostly_zero_events() {
    let model = DerivedFrequencyModel::new(0.01, 0.1, 0.02, 0.01, 0.1, 0.02, 4.0, 4.0).unwrap();
    let summary = FrequencySimulator::new(10_000).with_seed(3).run(&model).unwrap();
    assert!(summary.zero_event_probability > 0.95, "{summary:?}");
    assert_eq!(summary.p50, 0);
}

#[test]
fn summary_serializes_to_json() {
    let model = DerivedFrequencyModel::new(1.0, 10.0, 5.0, 0.1, 0.9, 0.5, 2.0, 2.0).unwrap();
    let summary = FrequencySimulator::new(100).with_seed(1).run(&model).unwrap();
    let json = serde_json::to_string(&summary).unwrap();
    let back: FrequencySummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
}

#[test]
fn huge_counts_give_finite_mean() {
    // Every count is near 1e17..1e18; a hundred of them sum past u64::MAX.
    let model = DerivedFrequencyModel::new(1e17, 1e18, 5e17, 0.5, 1.0, 0.9, 4.0, 4.0).unwrap();
    let summary = FrequencySimulator::new(100).with_seed(1).run(&model).unwrap();
    assert!(summary.mean.is_finite());
    assert!(summary.mean > 1e16 && summary.mean < 1e18, "{summary:?}");
    assert!(summary.is_valid());
}

#[test]
fn rates_beyond_poisson_limit_fail_instead_of_saturating() {
    let model = DerivedFrequencyModel::new(1e24, 1e25, 5e24, 0.1, 0.9, 0.5, 4.0, 4.0).unwrap();
    match FrequencySimulator::new(10).with_seed(1).run(&model) {
        Err(ModelError::Sampling { .. }) => {}
        other => panic!("expected Sampling error, got {other:?}"),
    }
}
