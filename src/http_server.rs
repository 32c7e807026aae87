//! HTTP API server
//!
//! `POST /api/demo` and `POST /api/analyze` take `{"url": "..."}` and return
//! an [`AnalysisReport`]; failures are `{"error": "..."}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::ServerSettings;
use crate::error::{Error, Result};
use crate::report::{AnalysisReport, ReportService};
use crate::validation::AnalyzeRequest;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    reports: ReportService,
    demo_delay: Duration,
}

impl AppState {
    pub fn new(reports: ReportService, demo_delay: Duration) -> Self {
        Self {
            reports,
            demo_delay,
        }
    }
}

/// Builds the application router
pub fn router(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/api/demo", post(handle_demo))
        .route("/api/analyze", post(handle_analyze))
        .route("/health", get(handle_health))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

pub struct HttpServer {
    settings: ServerSettings,
    reports: ReportService,
}

impl HttpServer {
    pub fn new(settings: ServerSettings, reports: ReportService) -> Self {
        Self { settings, reports }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.settings.socket_addr()?;
        let state = AppState::new(self.reports, self.settings.demo_delay());
        let app = router(state, self.settings.cors_permissive);

        info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Extracts the target URL; any unreadable body counts as a bad URL
fn target_url(body: std::result::Result<Json<AnalyzeRequest>, JsonRejection>) -> Result<String> {
    let Json(request) = body.map_err(|e| Error::InvalidUrl(e.body_text()))?;
    request.target()
}

async fn handle_demo(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>> {
    let url = target_url(body)?;
    let span = info_span!("demo", request_id = %Uuid::new_v4(), url = %url);

    async move {
        info!("Demo analysis requested");
        tokio::time::sleep(state.demo_delay).await;
        Ok::<_, Error>(Json(state.reports.demo_report(&url)))
    }
    .instrument(span)
    .await
}

async fn handle_analyze(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>> {
    let url = target_url(body)?;
    let span = info_span!("analyze", request_id = %Uuid::new_v4(), url = %url);

    async move {
        info!("Analysis requested");
        let report = state.reports.analyze_report(&url).await?;
        info!(
            "Analysis complete: performance={}",
            report.analysis.web_vitals.performance_score
        );
        Ok::<_, Error>(Json(report))
    }
    .instrument(span)
    .await
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
