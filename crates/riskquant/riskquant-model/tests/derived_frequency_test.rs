//! Derived frequency model tests: validation, draw shape, seeding, and the
//! statistical wiring of PERT -> product -> Poisson.

use rand::rngs::StdRng;
use rand::SeedableRng;

use riskquant_core::errors::{ModelError, RiskQuantErrorCode};
use riskquant_model::DerivedFrequencyModel;

fn reference_model() -> DerivedFrequencyModel {
    DerivedFrequencyModel::new(1.0, 10.0, 5.0, 0.1, 0.9, 0.5, 2.0, 2.0).unwrap()
}

fn assert_invalid(result: Result<DerivedFrequencyModel, ModelError>, field: &str) {
    match result {
        Err(err @ ModelError::InvalidParameter { .. }) => {
            assert_eq!(err.field(), Some(field));
            assert_eq!(err.error_code(), "MODEL_ERROR");
        }
        Err(other) => panic!("Expected InvalidParameter({field}), got: {other:?}"),
        Ok(_) => panic!("Expected InvalidParameter({field}), got a model"),
    }
}

#[test]
fn tef_range_must_be_strictly_increasing() {
    assert_invalid(
        DerivedFrequencyModel::new(10.0, 1.0, 5.0, 0.1, 0.9, 0.5, 2.0, 2.0),
        "min_tef",
    );
    assert_invalid(
        DerivedFrequencyModel::new(5.0, 5.0, 5.0, 0.1, 0.9, 0.5, 2.0, 2.0),
        "min_tef",
    );
}

#[test]
fn vuln_range_must_be_strictly_increasing() {
    assert_invalid(
        DerivedFrequencyModel::new(1.0, 10.0, 5.0, 0.9, 0.1, 0.5, 2.0, 2.0),
        "min_vuln",
    );
    assert_invalid(
        DerivedFrequencyModel::new(1.0, 10.0, 5.0, 0.5, 0.5, 0.5, 2.0, 2.0),
        "min_vuln",
    );
}

#[test]
fn tef_peak_must_lie_within_range() {
    assert_invalid(
        DerivedFrequencyModel::new(1.0, 10.0, 15.0, 0.1, 0.9, 0.5, 2.0, 2.0),
        "most_likely_tef",
    );
    assert_invalid(
        DerivedFrequencyModel::new(1.0, 10.0, 0.5, 0.1, 0.9, 0.5, 2.0, 2.0),
        "most_likely_tef",
    );
}

#[test]
fn vuln_peak_must_lie_within_range() {
    assert_invalid(
        DerivedFrequencyModel::new(1.0, 10.0, 5.0, 0.1, 0.9, 0.95, 2.0, 2.0),
        "most_likely_vuln",
    );
    assert_invalid(
        DerivedFrequencyModel::new(1.0, 10.0, 5.0, 0.1, 0.9, f64::NAN, 2.0, 2.0),
        "most_likely_vuln",
    );
}

#[test]
fn valid_construction_builds_two_distributions() {
    let model = reference_model();
    assert_eq!(model.tef().mode(), 5.0);
    assert_eq!(model.tef().low(), 1.0);
    assert_eq!(model.tef().high(), 10.0);
    assert_eq!(model.vuln().mode(), 0.5);
    assert_eq!(model.vuln().low(), 0.1);
    assert_eq!(model.vuln().high(), 0.9);
    assert_eq!(model.tef().temperature(), 2.0);
    assert_eq!(model.vuln().temperature(), 2.0);
}

#[test]
fn peaks_on_bounds_are_accepted() {
    assert!(DerivedFrequencyModel::new(1.0, 10.0, 1.0, 0.1, 0.9, 0.9, 4.0, 4.0).is_ok());
}

#[test]
fn draw_returns_exactly_n_counts() {
    let model = reference_model();
    let mut rng = StdRng::seed_from_u64(42);
    for n in [1, 10, 1000] {
        let counts = model.draw(n, &mut rng).unwrap();
        assert_eq!(counts.len(), n);
    }
    assert!(model.draw_one(&mut rng).is_ok());
}

#[test]
fn draw_is_reproducible_under_fixed_seed() {
    let first = reference_model()
        .draw(500, &mut StdRng::seed_from_u64(12345))
        .unwrap();
    let second = reference_model()
        .draw(500, &mut StdRng::seed_from_u64(12345))
        .unwrap();
    assert_eq!(first, second);

    let other = reference_model()
        .draw(500, &mut StdRng::seed_from_u64(54321))
        .unwrap();
    assert_ne!(first, other);
}

#[test]
fn consecutive_draws_do_not_reuse_randomness() {
    let model = reference_model();
    let mut rng = StdRng::seed_from_u64(8);
    let a = model.draw(200, &mut rng).unwrap();
    let b = model.draw(200, &mut rng).unwrap();
    assert_ne!(a, b);
}

#[test]
fn empirical_mean_tracks_expected_rate() {
    let model = reference_model();
    let mut rng = StdRng::seed_from_u64(2020);
    let n = 100_000;
    let counts = model.draw(n, &mut rng).unwrap();
    let empirical = counts.iter().sum::<u64>() as f64 / n as f64;
    let expected = model.expected_rate();
    assert!(
        (empirical - expected).abs() / expected < 0.05,
        "empirical mean {empirical:.4} outside 5% of expected {expected:.4}"
    );
}

#[test]
fn mean_reports_tef_mode() {
    let model = reference_model();
    assert_eq!(model.mean(), 5.0);
    assert_eq!(model.mean(), model.tef().mode());
}
