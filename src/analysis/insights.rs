//! Optimization opportunities and diagnostics derived from a measurement

use super::format::{format_kilobytes, format_seconds};
use super::types::{
    Diagnostic, Impact, Measurement, Opportunity, PerformanceInsights, ResourceBreakdown,
};

/// Image payload above which image optimization is suggested
pub const IMAGE_BYTES_THRESHOLD: u64 = 500_000;
/// Unused script payload above which dead-code removal is suggested
pub const UNUSED_SCRIPT_THRESHOLD: u64 = 100_000;
/// Compression ratio below which text compression is suggested
pub const COMPRESSION_RATIO_THRESHOLD: f64 = 0.7;
/// TTFB (ms) above which server tuning is suggested
pub const TTFB_THRESHOLD_MS: f64 = 800.0;

/// Share of image bytes assumed recoverable by re-encoding
const IMAGE_SAVINGS_FACTOR: f64 = 0.4;
/// Share of script and style bytes assumed recoverable by compression
const COMPRESSION_SAVINGS_FACTOR: f64 = 0.3;
/// Server response time considered achievable (ms)
const TARGET_TTFB_MS: f64 = 500.0;
/// Fixed allowance added to FCP + FID to approximate time to interactive (ms)
const TTI_ALLOWANCE_MS: f64 = 1000.0;

/// Builds opportunities and diagnostics from raw measurements
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        measurement: &Measurement,
        resources: &ResourceBreakdown,
    ) -> PerformanceInsights {
        PerformanceInsights {
            opportunities: self.opportunities(measurement, resources),
            diagnostics: self.diagnostics(measurement),
        }
    }

    /// Opportunities in fixed rule order; each rule contributes at most one entry
    pub fn opportunities(
        &self,
        measurement: &Measurement,
        resources: &ResourceBreakdown,
    ) -> Vec<Opportunity> {
        let mut opportunities = Vec::with_capacity(4);

        if resources.image_bytes > IMAGE_BYTES_THRESHOLD {
            opportunities.push(Opportunity {
                title: "Optimize images".to_string(),
                description: "Compress images and use modern formats like WebP".to_string(),
                savings: format_kilobytes(resources.image_bytes as f64 * IMAGE_SAVINGS_FACTOR),
                impact: Impact::High,
            });
        }

        if resources.unused_script_bytes > UNUSED_SCRIPT_THRESHOLD {
            opportunities.push(Opportunity {
                title: "Remove unused JavaScript".to_string(),
                description: "Eliminate dead code and unused libraries".to_string(),
                savings: format_kilobytes(resources.unused_script_bytes as f64),
                impact: Impact::Medium,
            });
        }

        if resources.compression_ratio < COMPRESSION_RATIO_THRESHOLD {
            let text_bytes = resources.script_bytes as f64 + resources.style_bytes as f64;
            opportunities.push(Opportunity {
                title: "Enable text compression".to_string(),
                description: "Use gzip or brotli compression for text resources".to_string(),
                savings: format_kilobytes(text_bytes * COMPRESSION_SAVINGS_FACTOR),
                impact: Impact::Medium,
            });
        }

        if measurement.ttfb > TTFB_THRESHOLD_MS {
            opportunities.push(Opportunity {
                title: "Improve server response time".to_string(),
                description: "Optimize server configuration and database queries".to_string(),
                savings: format_seconds(measurement.ttfb - TARGET_TTFB_MS, 2),
                impact: Impact::High,
            });
        }

        opportunities
    }

    /// Always three entries: Time to Interactive, Speed Index, Total Blocking Time
    pub fn diagnostics(&self, measurement: &Measurement) -> Vec<Diagnostic> {
        let tti = estimated_tti(measurement);
        let speed_index = (measurement.fcp + measurement.lcp) / 2.0;
        let blocking = (tti - measurement.fcp).max(0.0);

        vec![
            Diagnostic {
                title: "Time to Interactive".to_string(),
                description: "Time until the page becomes fully interactive".to_string(),
                value: format_seconds(tti, 1),
            },
            Diagnostic {
                title: "Speed Index".to_string(),
                description: "How quickly content is visually displayed".to_string(),
                value: format_seconds(speed_index, 1),
            },
            Diagnostic {
                title: "Total Blocking Time".to_string(),
                description: "Time between FCP and TTI where main thread was blocked".to_string(),
                value: format_seconds(blocking, 1),
            },
        ]
    }
}

/// Heuristic time-to-interactive proxy (ms), not a measured value
pub fn estimated_tti(measurement: &Measurement) -> f64 {
    measurement.fcp + measurement.fid + TTI_ALLOWANCE_MS
}
