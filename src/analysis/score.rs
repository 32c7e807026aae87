//! Heuristic performance score from Core Web Vitals thresholds

use serde::{Deserialize, Serialize};
use std::fmt;

use super::format::round_half_up;
use super::types::Measurement;

/// Lowest score the estimator reports
pub const MIN_SCORE: u8 = 10;
/// Highest score the estimator reports
pub const MAX_SCORE: u8 = 100;

/// Performance score, always within `MIN_SCORE..=MAX_SCORE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Clamps a raw total into the valid score range
    pub fn from_raw(raw: i32) -> Self {
        Self(raw.clamp(MIN_SCORE as i32, MAX_SCORE as i32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Score band used when presenting any 0-100 category score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreRating {
    /// 90 and above
    Good,
    /// 50 to 89
    NeedsImprovement,
    /// Below 50
    Poor,
}

impl ScoreRating {
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            ScoreRating::Good
        } else if score >= 50 {
            ScoreRating::NeedsImprovement
        } else {
            ScoreRating::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreRating::Good => "good",
            ScoreRating::NeedsImprovement => "needs-improvement",
            ScoreRating::Poor => "poor",
        }
    }
}

impl fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-tier deduction for one metric
struct Threshold {
    severe_above: f64,
    severe_penalty: i32,
    moderate_above: f64,
    moderate_penalty: i32,
}

impl Threshold {
    fn deduction(&self, value: f64) -> i32 {
        if value > self.severe_above {
            self.severe_penalty
        } else if value > self.moderate_above {
            self.moderate_penalty
        } else {
            0
        }
    }
}

const FCP: Threshold = Threshold {
    severe_above: 3000.0,
    severe_penalty: 20,
    moderate_above: 1800.0,
    moderate_penalty: 10,
};

const LCP: Threshold = Threshold {
    severe_above: 4000.0,
    severe_penalty: 25,
    moderate_above: 2500.0,
    moderate_penalty: 15,
};

const CLS: Threshold = Threshold {
    severe_above: 0.25,
    severe_penalty: 20,
    moderate_above: 0.1,
    moderate_penalty: 10,
};

const FID: Threshold = Threshold {
    severe_above: 300.0,
    severe_penalty: 15,
    moderate_above: 100.0,
    moderate_penalty: 8,
};

/// Turns a measurement into a single performance score
///
/// Starts from 100 and subtracts an independent deduction for FCP, LCP, CLS
/// and FID. TTFB does not take part in the score even though the insight
/// generator looks at it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEstimator;

impl ScoreEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn estimate(&self, measurement: &Measurement) -> Score {
        Score::from_raw(MAX_SCORE as i32 - self.total_deduction(measurement))
    }

    /// Sum of all per-metric deductions before clamping
    pub fn total_deduction(&self, measurement: &Measurement) -> i32 {
        FCP.deduction(measurement.fcp)
            + LCP.deduction(measurement.lcp)
            + CLS.deduction(measurement.cls)
            + FID.deduction(measurement.fid)
    }
}

/// Rounded mean of the four category scores
pub fn overall_score(performance: u8, accessibility: u8, best_practices: u8, seo: u8) -> u8 {
    let sum = performance as f64 + accessibility as f64 + best_practices as f64 + seo as f64;
    round_half_up(sum / 4.0) as u8
}
