//! Page performance scoring and insight generation
//!
//! The scoring core ([`ScoreEstimator`], [`InsightGenerator`]) is pure and
//! synchronous. [`PerformanceAnalyzer`] wraps it with the remote measurement
//! source, the resource probe and their fallbacks.

pub mod analyzer;
pub mod format;
pub mod insights;
pub mod score;
pub mod synthetic;
pub mod types;

pub use analyzer::{
    AnalysisData, HeadProbe, MeasurementSource, NoProbe, PerformanceAnalyzer, ResourceProbe,
    SyntheticSource,
};
pub use insights::InsightGenerator;
pub use score::{overall_score, Score, ScoreEstimator, ScoreRating};
pub use types::{
    Diagnostic, Impact, Measurement, Opportunity, PerformanceInsights, ResourceBreakdown, WebVitals,
};
