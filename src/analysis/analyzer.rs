//! Analysis orchestration: measurement source, resource probe, insights
//!
//! Each remote step has exactly one fallback. A failed measurement becomes a
//! synthetic estimate, a failed probe becomes a synthetic breakdown, and an
//! analysis that overruns its deadline becomes the fixed fallback analysis.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::insights::InsightGenerator;
use super::synthetic;
use super::types::{PerformanceInsights, ResourceBreakdown, WebVitals};
use crate::error::{Error, Result};

/// User agent sent when probing the analysed page
pub const PROBE_USER_AGENT: &str = "Mozilla/5.0 (compatible; PerformanceBot/1.0)";

/// Supplies a vitals record for a URL
#[async_trait]
pub trait MeasurementSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn measure(&self, url: &str) -> Result<WebVitals>;
}

/// Supplies a resource breakdown for a URL
#[async_trait]
pub trait ResourceProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ResourceBreakdown>;
}

/// Measurement source backed by the synthetic generator
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

#[async_trait]
impl MeasurementSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn measure(&self, url: &str) -> Result<WebVitals> {
        Ok(synthetic::estimated_vitals(&mut rand::thread_rng(), url))
    }
}

/// Probes the page with a HEAD request and estimates the rest
pub struct HeadProbe {
    client: reqwest::Client,
}

impl HeadProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(PROBE_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceProbe for HeadProbe {
    async fn probe(&self, url: &str) -> Result<ResourceBreakdown> {
        let response = self.client.head(url).send().await?;

        let content_length = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Ok(synthetic::probed_resources(&mut rand::thread_rng(), content_length))
    }
}

/// Measurements plus derived insights for one URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub web_vitals: WebVitals,
    pub resources: ResourceBreakdown,
    pub insights: PerformanceInsights,
}

/// Runs one analysis per call; holds no per-request state
pub struct PerformanceAnalyzer {
    source: Arc<dyn MeasurementSource>,
    probe: Arc<dyn ResourceProbe>,
    insights: InsightGenerator,
    deadline: Duration,
}

impl PerformanceAnalyzer {
    /// Default overall deadline for one analysis
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(90);

    pub fn new(source: Arc<dyn MeasurementSource>, probe: Arc<dyn ResourceProbe>) -> Self {
        Self {
            source,
            probe,
            insights: InsightGenerator::new(),
            deadline: Self::DEFAULT_DEADLINE,
        }
    }

    /// Sets the overall analysis deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Best-effort analysis; never fails
    pub async fn analyze_website(&self, url: &str) -> AnalysisData {
        match tokio::time::timeout(self.deadline, self.collect(url)).await {
            Ok(data) => data,
            Err(_) => {
                warn!(
                    "Analysis of {} exceeded {:?}, using fallback analysis",
                    url, self.deadline
                );
                self.fallback_analysis(url)
            }
        }
    }

    async fn collect(&self, url: &str) -> AnalysisData {
        let (vitals, resources) = tokio::join!(self.source.measure(url), self.probe.probe(url));

        let web_vitals = vitals.unwrap_or_else(|e| {
            warn!(
                "{} measurement failed for {}: {}; using estimated metrics",
                self.source.name(),
                url,
                e
            );
            synthetic::estimated_vitals(&mut rand::thread_rng(), url)
        });

        let resources = resources.unwrap_or_else(|e| {
            warn!("Resource probe failed for {}: {}; using estimated resources", url, e);
            synthetic::unprobed_resources(&mut rand::thread_rng())
        });

        let insights = self
            .insights
            .generate(&web_vitals.measurement, &resources);

        info!(
            "Analysed {}: performance={} opportunities={}",
            url,
            web_vitals.performance_score,
            insights.opportunities.len()
        );

        AnalysisData {
            web_vitals,
            resources,
            insights,
        }
    }

    /// Estimated metrics over the fixed fallback breakdown
    pub fn fallback_analysis(&self, url: &str) -> AnalysisData {
        let web_vitals = synthetic::estimated_vitals(&mut rand::thread_rng(), url);
        let resources = synthetic::fallback_resources();
        let insights = self
            .insights
            .generate(&web_vitals.measurement, &resources);

        AnalysisData {
            web_vitals,
            resources,
            insights,
        }
    }

    /// Fast synthetic analysis with demo ranges, no network
    pub fn demo_analysis(&self, url: &str) -> AnalysisData {
        let mut rng = rand::thread_rng();
        let web_vitals = synthetic::demo_vitals(&mut rng, url);
        let resources = synthetic::demo_resources(&mut rng);
        let insights = self
            .insights
            .generate(&web_vitals.measurement, &resources);

        AnalysisData {
            web_vitals,
            resources,
            insights,
        }
    }
}

/// Probe that always fails; lets callers run fully offline
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

#[async_trait]
impl ResourceProbe for NoProbe {
    async fn probe(&self, _url: &str) -> Result<ResourceBreakdown> {
        Err(Error::ServiceUnavailable("resource probing disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::Measurement;

    struct FixedSource(WebVitals);

    #[async_trait]
    impl MeasurementSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn measure(&self, _url: &str) -> Result<WebVitals> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MeasurementSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn measure(&self, _url: &str) -> Result<WebVitals> {
            Err(Error::Internal("boom".to_string()))
        }
    }

    struct FixedProbe(ResourceBreakdown);

    #[async_trait]
    impl ResourceProbe for FixedProbe {
        async fn probe(&self, _url: &str) -> Result<ResourceBreakdown> {
            Ok(self.0)
        }
    }

    struct SlowSource;

    #[async_trait]
    impl MeasurementSource for SlowSource {
        fn name(&self) -> &str {
            "slow"
        }

        async fn measure(&self, url: &str) -> Result<WebVitals> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            SyntheticSource.measure(url).await
        }
    }

    fn vitals(ttfb: f64) -> WebVitals {
        WebVitals {
            url: "https://example.com".to_string(),
            measurement: Measurement::new(1000.0, 2000.0, 50.0, 0.05, ttfb),
            performance_score: 100,
            accessibility_score: 90,
            best_practices_score: 90,
            seo_score: 90,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_analysis_uses_source_and_probe() {
        let resources = synthetic::fallback_resources();
        let analyzer = PerformanceAnalyzer::new(
            Arc::new(FixedSource(vitals(900.0))),
            Arc::new(FixedProbe(resources)),
        );

        let data = analyzer.analyze_website("https://example.com").await;
        assert_eq!(data.web_vitals, vitals(900.0));
        assert_eq!(data.resources, resources);

        let titles: Vec<&str> = data
            .insights
            .opportunities
            .iter()
            .map(|o| o.title.as_str())
            .collect();
        assert_eq!(
            titles,
            ["Optimize images", "Remove unused JavaScript", "Improve server response time"]
        );
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_estimates() {
        let analyzer = PerformanceAnalyzer::new(Arc::new(FailingSource), Arc::new(NoProbe));
        let data = analyzer.analyze_website("https://example.com").await;

        assert_eq!(data.web_vitals.url, "https://example.com");
        assert!((1200.0..=2200.0).contains(&data.web_vitals.measurement.fcp));
        assert!((800_000..=3_000_000).contains(&data.resources.total_bytes));
        assert_eq!(data.insights.diagnostics.len(), 3);
    }

    #[tokio::test]
    async fn test_deadline_yields_fallback_analysis() {
        let analyzer = PerformanceAnalyzer::new(Arc::new(SlowSource), Arc::new(NoProbe))
            .with_deadline(Duration::from_millis(50));

        let data = analyzer.analyze_website("https://example.com").await;
        assert_eq!(data.resources, synthetic::fallback_resources());
        assert_eq!(data.insights.opportunities[0].savings, "234KB");
    }

    /// Serves `router` on an ephemeral local port, returning its base URL
    async fn serve_locally(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_head_request_reads_content_length() {
        use axum::http::header;

        let router = axum::Router::new().route(
            "/",
            axum::routing::head(|| async { [(header::CONTENT_LENGTH, "7000000")] }),
        );
        let url = serve_locally(router).await;

        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();
        let resources = probe.probe(&url).await.unwrap();
        assert!(resources.total_bytes >= 7_000_000);
        assert!(resources.markup_bytes >= 7_000_000);
    }

    #[tokio::test]
    async fn test_head_request_without_length_estimates_sizes() {
        use axum::http::StatusCode;

        let router = axum::Router::new().route(
            "/",
            axum::routing::head(|| async { StatusCode::NO_CONTENT }),
        );
        let url = serve_locally(router).await;

        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();
        let resources = probe.probe(&url).await.unwrap();
        assert!((500_000..=2_500_000).contains(&resources.total_bytes));
        assert!((20_000..=100_000).contains(&resources.markup_bytes));
    }

    #[tokio::test]
    async fn test_head_request_unreachable_is_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = HeadProbe::new(Duration::from_secs(5)).unwrap();
        assert!(probe.probe(&format!("http://{}/", addr)).await.is_err());
    }

    #[test]
    fn test_demo_analysis_is_consistent() {
        let analyzer = PerformanceAnalyzer::new(Arc::new(SyntheticSource), Arc::new(NoProbe));
        let data = analyzer.demo_analysis("https://example.com");

        assert!(data.web_vitals.measurement.ttfb < 800.0);
        assert!(data
            .insights
            .opportunities
            .iter()
            .all(|o| o.title != "Improve server response time"));
        assert_eq!(data.insights.diagnostics.len(), 3);
    }

    #[test]
    fn test_analysis_data_wire_names() {
        let analyzer = PerformanceAnalyzer::new(Arc::new(SyntheticSource), Arc::new(NoProbe));
        let json = serde_json::to_value(analyzer.demo_analysis("https://example.com")).unwrap();
        assert!(json.get("webVitals").is_some());
        assert!(json.get("resources").is_some());
        assert!(json["insights"]["diagnostics"].is_array());
    }
}
