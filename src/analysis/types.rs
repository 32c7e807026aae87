//! Measurement inputs and insight outputs shared by the scoring core

use serde::{Deserialize, Serialize};

/// Page-loading timeline measurements for one analysis
///
/// Times are milliseconds; `cls` is a unitless layout-shift ratio. Values are
/// taken as-is, nothing here validates ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// First contentful paint (ms)
    pub fcp: f64,
    /// Largest contentful paint (ms)
    pub lcp: f64,
    /// First input delay (ms)
    pub fid: f64,
    /// Cumulative layout shift
    pub cls: f64,
    /// Time to first byte (ms)
    pub ttfb: f64,
}

impl Measurement {
    /// Creates a measurement from the five raw values
    pub fn new(fcp: f64, lcp: f64, fid: f64, cls: f64, ttfb: f64) -> Self {
        Self {
            fcp,
            lcp,
            fid,
            cls,
            ttfb,
        }
    }
}

/// Byte-size breakdown of the resources a page loads
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBreakdown {
    #[serde(rename = "totalSize")]
    pub total_bytes: u64,
    #[serde(rename = "jsSize")]
    pub script_bytes: u64,
    #[serde(rename = "cssSize")]
    pub style_bytes: u64,
    #[serde(rename = "imageSize")]
    pub image_bytes: u64,
    #[serde(rename = "htmlSize")]
    pub markup_bytes: u64,
    pub requests: u32,
    #[serde(rename = "unusedCss")]
    pub unused_style_bytes: u64,
    #[serde(rename = "unusedJs")]
    pub unused_script_bytes: u64,
    /// Share of text resources served compressed, 0.0 to 1.0
    pub compression_ratio: f64,
}

/// Full vitals record for a URL, as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebVitals {
    pub url: String,
    #[serde(flatten)]
    pub measurement: Measurement,
    pub performance_score: u8,
    pub accessibility_score: u8,
    pub best_practices_score: u8,
    pub seo_score: u8,
    /// RFC 3339 collection time
    pub timestamp: String,
}

impl WebVitals {
    /// Overall score across the four categories
    pub fn overall_score(&self) -> u8 {
        super::score::overall_score(
            self.performance_score,
            self.accessibility_score,
            self.best_practices_score,
            self.seo_score,
        )
    }
}

/// Qualitative impact tier of an opportunity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// Suggested optimization with an estimated savings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub description: String,
    /// Formatted savings with unit suffix, e.g. `"234KB"` or `"0.4s"`
    pub savings: String,
    pub impact: Impact,
}

/// Derived descriptive metric, shown for context only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub title: String,
    pub description: String,
    pub value: String,
}

/// Output of the insight generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInsights {
    /// In guard-evaluation order
    pub opportunities: Vec<Opportunity>,
    pub diagnostics: Vec<Diagnostic>,
}
