//! Synthetic measurements used when no real data is available
//!
//! Every generator takes the random source explicitly so callers can seed it.

use rand::Rng;

use super::score::ScoreEstimator;
use super::types::{Measurement, ResourceBreakdown, WebVitals};

/// `base + U[0,1) * span`
fn spread<R: Rng + ?Sized>(rng: &mut R, base: f64, span: f64) -> f64 {
    base + rng.gen::<f64>() * span
}

fn spread_bytes<R: Rng + ?Sized>(rng: &mut R, base: f64, span: f64) -> u64 {
    spread(rng, base, span).floor() as u64
}

fn spread_score<R: Rng + ?Sized>(rng: &mut R, base: f64, span: f64) -> u8 {
    spread(rng, base, span).floor() as u8
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Plausible metrics for an average site, used when the measurement service fails
pub fn estimated_measurement<R: Rng + ?Sized>(rng: &mut R) -> Measurement {
    Measurement {
        fcp: spread(rng, 1200.0, 1000.0),
        lcp: spread(rng, 2000.0, 2000.0),
        fid: spread(rng, 50.0, 150.0),
        cls: spread(rng, 0.0, 0.3),
        ttfb: spread(rng, 300.0, 700.0),
    }
}

/// Full vitals record around [`estimated_measurement`], scored by [`ScoreEstimator`]
pub fn estimated_vitals<R: Rng + ?Sized>(rng: &mut R, url: &str) -> WebVitals {
    let measurement = estimated_measurement(rng);
    let performance_score = ScoreEstimator::new().estimate(&measurement).value();

    WebVitals {
        url: url.to_string(),
        measurement,
        performance_score,
        accessibility_score: spread_score(rng, 70.0, 25.0),
        best_practices_score: spread_score(rng, 75.0, 20.0),
        seo_score: spread_score(rng, 65.0, 30.0),
        timestamp: timestamp(),
    }
}

/// Breakdown estimated around a successful HEAD probe
///
/// `content_length` of the document raises the total and markup floors.
pub fn probed_resources<R: Rng + ?Sized>(rng: &mut R, content_length: u64) -> ResourceBreakdown {
    let total = spread_bytes(rng, 500_000.0, 2_000_000.0);
    let script_bytes = spread_bytes(rng, 150_000.0, 800_000.0);
    let style_bytes = spread_bytes(rng, 50_000.0, 200_000.0);
    let image_bytes = spread_bytes(rng, 200_000.0, 1_200_000.0);
    let markup = spread_bytes(rng, 20_000.0, 80_000.0);

    ResourceBreakdown {
        total_bytes: total.max(content_length),
        script_bytes,
        style_bytes,
        image_bytes,
        markup_bytes: markup.max(content_length),
        requests: spread(rng, 25.0, 75.0).floor() as u32,
        unused_style_bytes: spread_bytes(rng, 0.0, 150_000.0),
        unused_script_bytes: spread_bytes(rng, 0.0, 300_000.0),
        compression_ratio: spread(rng, 0.6, 0.3),
    }
}

/// Breakdown used when the page could not be probed at all
pub fn unprobed_resources<R: Rng + ?Sized>(rng: &mut R) -> ResourceBreakdown {
    ResourceBreakdown {
        total_bytes: spread_bytes(rng, 800_000.0, 2_200_000.0),
        script_bytes: spread_bytes(rng, 200_000.0, 800_000.0),
        style_bytes: spread_bytes(rng, 50_000.0, 200_000.0),
        image_bytes: spread_bytes(rng, 300_000.0, 1_000_000.0),
        markup_bytes: spread_bytes(rng, 30_000.0, 70_000.0),
        requests: spread(rng, 30.0, 70.0).floor() as u32,
        unused_style_bytes: spread_bytes(rng, 0.0, 100_000.0),
        unused_script_bytes: spread_bytes(rng, 0.0, 200_000.0),
        compression_ratio: spread(rng, 0.65, 0.25),
    }
}

/// Fixed breakdown for the fully synthetic fallback analysis
pub fn fallback_resources() -> ResourceBreakdown {
    ResourceBreakdown {
        total_bytes: 1_200_000,
        script_bytes: 350_000,
        style_bytes: 120_000,
        image_bytes: 600_000,
        markup_bytes: 50_000,
        requests: 45,
        unused_style_bytes: 80_000,
        unused_script_bytes: 150_000,
        compression_ratio: 0.7,
    }
}

/// Narrower, friendlier ranges for the demo endpoint
pub fn demo_measurement<R: Rng + ?Sized>(rng: &mut R) -> Measurement {
    Measurement {
        fcp: spread(rng, 1200.0, 800.0),
        lcp: spread(rng, 1800.0, 1200.0),
        fid: spread(rng, 50.0, 100.0),
        cls: spread(rng, 0.0, 0.2),
        ttfb: spread(rng, 300.0, 500.0),
    }
}

pub fn demo_vitals<R: Rng + ?Sized>(rng: &mut R, url: &str) -> WebVitals {
    let measurement = demo_measurement(rng);
    let performance_score = ScoreEstimator::new().estimate(&measurement).value();

    WebVitals {
        url: url.to_string(),
        measurement,
        performance_score,
        accessibility_score: spread_score(rng, 70.0, 25.0),
        best_practices_score: spread_score(rng, 75.0, 20.0),
        seo_score: spread_score(rng, 65.0, 30.0),
        timestamp: timestamp(),
    }
}

pub fn demo_resources<R: Rng + ?Sized>(rng: &mut R) -> ResourceBreakdown {
    ResourceBreakdown {
        total_bytes: spread_bytes(rng, 800_000.0, 2_200_000.0),
        script_bytes: spread_bytes(rng, 200_000.0, 800_000.0),
        style_bytes: spread_bytes(rng, 50_000.0, 200_000.0),
        image_bytes: spread_bytes(rng, 300_000.0, 1_000_000.0),
        markup_bytes: spread_bytes(rng, 20_000.0, 80_000.0),
        requests: spread(rng, 20.0, 80.0).floor() as u32,
        unused_style_bytes: spread_bytes(rng, 0.0, 100_000.0),
        unused_script_bytes: spread_bytes(rng, 0.0, 200_000.0),
        compression_ratio: spread(rng, 0.6, 0.3),
    }
}
