//! Score estimator behaviour through the public API

use pagepulse::analysis::score::{MAX_SCORE, MIN_SCORE};
use pagepulse::analysis::{overall_score, Measurement, ScoreEstimator, ScoreRating};

fn measurement(fcp: f64, lcp: f64, cls: f64, fid: f64, ttfb: f64) -> Measurement {
    Measurement::new(fcp, lcp, fid, cls, ttfb)
}

#[test]
fn test_metrics_at_thresholds_score_100() {
    let estimator = ScoreEstimator::new();
    let at_limits = measurement(1800.0, 2500.0, 0.1, 100.0, 0.0);
    assert_eq!(estimator.estimate(&at_limits).value(), 100);
}

#[test]
fn test_all_severe_deductions() {
    let estimator = ScoreEstimator::new();
    let slow = measurement(3500.0, 4500.0, 0.3, 400.0, 0.0);

    assert_eq!(estimator.total_deduction(&slow), 80);
    assert_eq!(estimator.estimate(&slow).value(), 20);
    assert_eq!(ScoreRating::from_score(estimator.estimate(&slow).value()), ScoreRating::Poor);
}

#[test]
fn test_moderate_deductions_sum_independently() {
    let estimator = ScoreEstimator::new();
    let middling = measurement(2000.0, 3000.0, 0.2, 200.0, 0.0);

    // 10 + 15 + 10 + 8
    assert_eq!(estimator.estimate(&middling).value(), 57);
}

#[test]
fn test_ttfb_does_not_affect_score() {
    let estimator = ScoreEstimator::new();
    let fast_server = measurement(1000.0, 2000.0, 0.05, 50.0, 100.0);
    let slow_server = measurement(1000.0, 2000.0, 0.05, 50.0, 5000.0);

    assert_eq!(
        estimator.estimate(&fast_server),
        estimator.estimate(&slow_server)
    );
}

#[test]
fn test_score_is_always_clamped() {
    let estimator = ScoreEstimator::new();
    let inputs = [
        measurement(0.0, 0.0, 0.0, 0.0, 0.0),
        measurement(-500.0, -1.0, -0.5, -10.0, -1.0),
        measurement(1e12, 1e12, 1e6, 1e12, 1e12),
        measurement(f64::MAX, f64::MAX, f64::MAX, f64::MAX, f64::MAX),
    ];

    for input in inputs {
        let score = estimator.estimate(&input).value();
        assert!((MIN_SCORE..=MAX_SCORE).contains(&score), "{:?} -> {}", input, score);
        assert_eq!(estimator.estimate(&input).value(), score);
    }
}

#[test]
fn test_overall_score_rounds_half_up() {
    assert_eq!(overall_score(90, 80, 70, 60), 75);
    // 301 / 4 = 75.25
    assert_eq!(overall_score(91, 80, 70, 60), 75);
    // 302 / 4 = 75.5
    assert_eq!(overall_score(92, 80, 70, 60), 76);
}

#[test]
fn test_rating_bands() {
    assert_eq!(ScoreRating::from_score(90), ScoreRating::Good);
    assert_eq!(ScoreRating::from_score(89), ScoreRating::NeedsImprovement);
    assert_eq!(ScoreRating::from_score(50), ScoreRating::NeedsImprovement);
    assert_eq!(ScoreRating::from_score(49), ScoreRating::Poor);
}
