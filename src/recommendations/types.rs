//! Recommendation document returned to clients

use serde::{Deserialize, Serialize};

/// How hard an optimization is to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalIssue {
    pub issue: String,
    pub impact: String,
    pub solution: String,
    pub expected_improvement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub category: String,
    pub recommendation: String,
    pub difficulty: Difficulty,
    pub expected_gain: String,
}

/// Recommendations for one analysed page
///
/// Only `summary` is required when decoding model output; missing lists
/// decode as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    pub summary: String,
    #[serde(default)]
    pub critical_issues: Vec<CriticalIssue>,
    #[serde(default)]
    pub optimizations: Vec<Optimization>,
    #[serde(default)]
    pub priority_actions: Vec<String>,
}
