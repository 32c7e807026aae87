//! # pagepulse
//!
//! Web page performance analysis with heuristic scoring and AI-generated,
//! plain-language recommendations.
//!
//! The scoring core lives in [`analysis`]: [`analysis::ScoreEstimator`] turns
//! Core Web Vitals into a 10..=100 performance score and
//! [`analysis::InsightGenerator`] turns measurements and a resource breakdown
//! into opportunities and diagnostics. Everything around it (PageSpeed
//! measurements, page probing, the LLM, the HTTP API) falls back to local
//! estimates rather than failing a request.

pub mod analysis;
pub mod config;
pub mod error;
pub mod http_server;
pub mod llm;
pub mod logging;
pub mod pagespeed;
pub mod recommendations;
pub mod report;
pub mod validation;

pub use analysis::{InsightGenerator, PerformanceAnalyzer, ScoreEstimator};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use http_server::{router, AppState, HttpServer};
pub use report::{AnalysisReport, ReportService};
