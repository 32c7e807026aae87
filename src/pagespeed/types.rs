//! Subset of the PageSpeed Insights v5 response we read

use serde::Deserialize;
use std::collections::HashMap;

use crate::analysis::format::round_half_up;
use crate::analysis::types::{Measurement, WebVitals};

/// Top-level `runPagespeed` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    pub lighthouse_result: LighthouseResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LighthouseResult {
    #[serde(default)]
    pub audits: HashMap<String, Audit>,
    #[serde(default)]
    pub categories: HashMap<String, Category>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Category {
    /// 0.0 to 1.0, null when Lighthouse could not score the category
    #[serde(default)]
    pub score: Option<f64>,
}

impl LighthouseResult {
    /// Numeric audit value, 0 when absent
    pub fn audit_value(&self, id: &str) -> f64 {
        self.audits
            .get(id)
            .and_then(|audit| audit.numeric_value)
            .unwrap_or(0.0)
    }

    /// Category score scaled to 0-100, 0 when absent
    pub fn category_score(&self, id: &str) -> u8 {
        let score = self
            .categories
            .get(id)
            .and_then(|category| category.score)
            .unwrap_or(0.0);
        round_half_up(score * 100.0).clamp(0.0, 100.0) as u8
    }

    pub fn measurement(&self) -> Measurement {
        Measurement {
            fcp: self.audit_value("first-contentful-paint"),
            lcp: self.audit_value("largest-contentful-paint"),
            fid: self.audit_value("max-potential-fid"),
            cls: self.audit_value("cumulative-layout-shift"),
            ttfb: self.audit_value("server-response-time"),
        }
    }
}

impl PageSpeedResponse {
    /// Converts the response into a vitals record for `url`
    pub fn into_vitals(self, url: &str) -> WebVitals {
        let result = &self.lighthouse_result;
        WebVitals {
            url: url.to_string(),
            measurement: result.measurement(),
            performance_score: result.category_score("performance"),
            accessibility_score: result.category_score("accessibility"),
            best_practices_score: result.category_score("best-practices"),
            seo_score: result.category_score("seo"),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_audits_and_categories() {
        let body = json!({
            "lighthouseResult": {
                "audits": {
                    "first-contentful-paint": { "numericValue": 1523.4 },
                    "largest-contentful-paint": { "numericValue": 2711.0 },
                    "max-potential-fid": { "numericValue": 96.0 },
                    "cumulative-layout-shift": { "numericValue": 0.042 },
                    "server-response-time": { "numericValue": 412.7 },
                    "speed-index": { "score": 0.9 }
                },
                "categories": {
                    "performance": { "score": 0.87 },
                    "accessibility": { "score": 0.925 },
                    "best-practices": { "score": 1.0 },
                    "seo": { "score": null }
                }
            }
        });

        let response: PageSpeedResponse = serde_json::from_value(body).unwrap();
        let vitals = response.into_vitals("https://example.com");

        assert_eq!(vitals.measurement.fcp, 1523.4);
        assert_eq!(vitals.measurement.lcp, 2711.0);
        assert_eq!(vitals.measurement.fid, 96.0);
        assert_eq!(vitals.measurement.cls, 0.042);
        assert_eq!(vitals.measurement.ttfb, 412.7);
        assert_eq!(vitals.performance_score, 87);
        assert_eq!(vitals.accessibility_score, 93);
        assert_eq!(vitals.best_practices_score, 100);
        assert_eq!(vitals.seo_score, 0);
    }

    #[test]
    fn test_missing_audits_default_to_zero() {
        let body = json!({ "lighthouseResult": {} });
        let response: PageSpeedResponse = serde_json::from_value(body).unwrap();
        let vitals = response.into_vitals("https://example.com");

        assert_eq!(vitals.measurement, Measurement::default());
        assert_eq!(vitals.performance_score, 0);
    }

    #[test]
    fn test_missing_lighthouse_result_is_an_error() {
        let body = json!({ "error": { "code": 500 } });
        assert!(serde_json::from_value::<PageSpeedResponse>(body).is_err());
    }
}
