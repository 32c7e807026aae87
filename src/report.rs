//! Full analysis reports: measurements, insights and recommendations

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::analysis::format::{format_bytes, format_number, format_time, round_to};
use crate::analysis::{
    AnalysisData, HeadProbe, MeasurementSource, NoProbe, PerformanceAnalyzer, ResourceProbe,
    ScoreRating, SyntheticSource,
};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::pagespeed::PageSpeedClient;
use crate::recommendations::{fallback, AiRecommendation, RecommendationService};

/// Message returned when recommendations are requested without a model
pub const AI_NOT_CONFIGURED_MESSAGE: &str = "AI service is not configured";

/// What the analysis endpoints return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub analysis: AnalysisData,
    /// Rounded mean of the four category scores
    pub overall_score: u8,
    pub rating: ScoreRating,
    pub ai_recommendations: AiRecommendation,
}

impl AnalysisReport {
    pub fn new(analysis: AnalysisData, ai_recommendations: AiRecommendation) -> Self {
        let overall_score = analysis.web_vitals.overall_score();
        Self {
            analysis,
            overall_score,
            rating: ScoreRating::from_score(overall_score),
            ai_recommendations,
        }
    }

    /// Plain-text rendering for terminals
    pub fn summary(&self) -> String {
        let vitals = &self.analysis.web_vitals;
        let m = &vitals.measurement;
        let r = &self.analysis.resources;

        let mut lines = vec![
            format!(
                "{}: {}/100 ({})",
                vitals.url, self.overall_score, self.rating
            ),
            format!(
                "Performance {} | Accessibility {} | Best practices {} | SEO {}",
                vitals.performance_score,
                vitals.accessibility_score,
                vitals.best_practices_score,
                vitals.seo_score
            ),
            format!(
                "FCP {} | LCP {} | FID {} | CLS {} | TTFB {}",
                format_time(m.fcp),
                format_time(m.lcp),
                format_time(m.fid),
                format_number(round_to(m.cls, 3)),
                format_time(m.ttfb)
            ),
            format!(
                "Page size {} in {} requests (scripts {}, styles {}, images {})",
                format_bytes(r.total_bytes),
                r.requests,
                format_bytes(r.script_bytes),
                format_bytes(r.style_bytes),
                format_bytes(r.image_bytes)
            ),
        ];

        if !self.analysis.insights.opportunities.is_empty() {
            lines.push(String::new());
            lines.push("Opportunities:".to_string());
            for o in &self.analysis.insights.opportunities {
                lines.push(format!("  - {} (saves {})", o.title, o.savings));
            }
        }

        lines.push(String::new());
        lines.push(self.ai_recommendations.summary.clone());
        for (i, action) in self.ai_recommendations.priority_actions.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, action));
        }

        lines.join("\n")
    }
}

/// Builds demo and real reports
#[derive(Clone)]
pub struct ReportService {
    analyzer: Arc<PerformanceAnalyzer>,
    recommendations: Option<RecommendationService>,
}

impl ReportService {
    pub fn new(
        analyzer: Arc<PerformanceAnalyzer>,
        recommendations: Option<RecommendationService>,
    ) -> Self {
        Self {
            analyzer,
            recommendations,
        }
    }

    /// Wires PageSpeed, the page probe and the LLM from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let (source, probe): (Arc<dyn MeasurementSource>, Arc<dyn ResourceProbe>) =
            if config.server.offline {
                (Arc::new(SyntheticSource), Arc::new(NoProbe))
            } else {
                (
                    Arc::new(PageSpeedClient::new(config.pagespeed.clone())?),
                    Arc::new(HeadProbe::new(config.server.probe_timeout())?),
                )
            };

        let analyzer = PerformanceAnalyzer::new(source, probe)
            .with_deadline(config.server.analysis_timeout());

        let recommendations = if config.llm.is_configured() {
            Some(RecommendationService::from_config(config.llm.clone())?)
        } else {
            None
        };

        info!(
            "Report service ready: measurements={} recommendations={}",
            analyzer.source_name(),
            recommendations
                .as_ref()
                .map(RecommendationService::provider_name)
                .unwrap_or("disabled")
        );

        Ok(Self::new(Arc::new(analyzer), recommendations))
    }

    pub fn recommendations_enabled(&self) -> bool {
        self.recommendations.is_some()
    }

    /// Synthetic report with the fixed demo recommendations
    pub fn demo_report(&self, url: &str) -> AnalysisReport {
        AnalysisReport::new(self.analyzer.demo_analysis(url), fallback::demo())
    }

    /// Best-effort real report; fails only when no model is configured
    pub async fn analyze_report(&self, url: &str) -> Result<AnalysisReport> {
        let service = self
            .recommendations
            .as_ref()
            .ok_or_else(|| Error::ServiceUnavailable(AI_NOT_CONFIGURED_MESSAGE.to_string()))?;

        let analysis = self.analyzer.analyze_website(url).await;
        let ai_recommendations = service.generate(&analysis).await;

        Ok(AnalysisReport::new(analysis, ai_recommendations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> ReportService {
        ReportService::new(
            Arc::new(PerformanceAnalyzer::new(Arc::new(SyntheticSource), Arc::new(NoProbe))),
            None,
        )
    }

    #[test]
    fn test_demo_report_shape() {
        let report = offline().demo_report("https://example.com");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["webVitals"]["url"], "https://example.com");
        assert!(json["resources"]["totalSize"].is_u64());
        assert!(json["insights"]["opportunities"].is_array());
        assert_eq!(
            json["aiRecommendations"]["priorityActions"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn test_report_carries_overall_score_and_rating() {
        let mut analysis =
            PerformanceAnalyzer::new(Arc::new(SyntheticSource), Arc::new(NoProbe))
                .fallback_analysis("https://example.com");
        analysis.web_vitals.performance_score = 40;
        analysis.web_vitals.accessibility_score = 60;
        analysis.web_vitals.best_practices_score = 70;
        analysis.web_vitals.seo_score = 51;

        let report = AnalysisReport::new(analysis, fallback::canned());
        assert_eq!(report.overall_score, 55);
        assert_eq!(report.rating, ScoreRating::NeedsImprovement);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overallScore"], 55);
        assert_eq!(json["rating"], "needs-improvement");
    }

    #[test]
    fn test_summary_uses_display_formatting() {
        let analysis = PerformanceAnalyzer::new(Arc::new(SyntheticSource), Arc::new(NoProbe))
            .fallback_analysis("https://example.com");
        let report = AnalysisReport::new(analysis, fallback::canned());
        let summary = report.summary();

        assert!(summary.starts_with("https://example.com: "));
        // fixed fallback breakdown: 1,200,000 bytes over 45 requests
        assert!(summary.contains("Page size 1.14 MB in 45 requests"));
        assert!(summary.contains("scripts 341.8 KB"));
        assert!(summary.contains("Opportunities:"));
        assert!(summary.contains("  1. "));
    }

    #[tokio::test]
    async fn test_analyze_without_model_is_unavailable() {
        let err = offline()
            .analyze_report("https://example.com")
            .await
            .unwrap_err();
        assert_eq!(err.public_message(), AI_NOT_CONFIGURED_MESSAGE);
    }

    #[test]
    fn test_from_config_offline_without_key() {
        let mut config = AppConfig::default();
        config.server.offline = true;
        let service = ReportService::from_config(&config).unwrap();
        assert!(!service.recommendations_enabled());
    }
}
