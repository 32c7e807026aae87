//! Recommendation sets used when the model cannot be consulted

use super::types::{AiRecommendation, CriticalIssue, Difficulty, Optimization};
use crate::analysis::insights::IMAGE_BYTES_THRESHOLD;
use crate::analysis::{ResourceBreakdown, WebVitals};

/// Performance score below which a critical issue is reported
pub const POOR_PERFORMANCE_SCORE: u8 = 50;
/// LCP (ms) above which loading speed is flagged
pub const SLOW_LCP_MS: f64 = 2500.0;

fn issue(issue: &str, impact: &str, solution: &str, expected_improvement: &str) -> CriticalIssue {
    CriticalIssue {
        issue: issue.to_string(),
        impact: impact.to_string(),
        solution: solution.to_string(),
        expected_improvement: expected_improvement.to_string(),
    }
}

fn optimization(
    category: &str,
    recommendation: &str,
    difficulty: Difficulty,
    expected_gain: &str,
) -> Optimization {
    Optimization {
        category: category.to_string(),
        recommendation: recommendation.to_string(),
        difficulty,
        expected_gain: expected_gain.to_string(),
    }
}

fn actions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Generic set returned when model output cannot be decoded
pub fn canned() -> AiRecommendation {
    AiRecommendation {
        summary: "AI analysis completed. The website has some performance optimization opportunities."
            .to_string(),
        critical_issues: vec![issue(
            "Performance needs improvement",
            "Users may experience slower loading times",
            "Optimize images and reduce file sizes",
            "20-30% faster loading",
        )],
        optimizations: vec![optimization(
            "Images",
            "Compress and optimize images",
            Difficulty::Easy,
            "15-25% faster loading",
        )],
        priority_actions: actions(&[
            "Optimize images",
            "Minimize CSS and JavaScript files",
            "Enable compression",
        ]),
    }
}

/// Set derived from the measurements, used when the model call fails
pub fn heuristic(vitals: &WebVitals, resources: &ResourceBreakdown) -> AiRecommendation {
    let mut critical_issues = Vec::new();
    let mut optimizations = Vec::new();

    if vitals.performance_score < POOR_PERFORMANCE_SCORE {
        critical_issues.push(issue(
            "Poor website performance",
            "Users will experience slow loading and may leave your site",
            "Optimize images, reduce file sizes, and improve server response time",
            "30-50% performance improvement possible",
        ));
    }

    if vitals.measurement.lcp > SLOW_LCP_MS {
        optimizations.push(optimization(
            "Loading Speed",
            "Optimize your largest images and content to load faster",
            Difficulty::Medium,
            "20-40% faster content display",
        ));
    }

    if resources.image_bytes > IMAGE_BYTES_THRESHOLD {
        optimizations.push(optimization(
            "Images",
            "Compress images and use modern formats like WebP",
            Difficulty::Easy,
            "25-50% reduction in image load time",
        ));
    }

    AiRecommendation {
        summary: format!(
            "Your website scored {}/100 for performance. There are opportunities to make it faster and more user-friendly.",
            vitals.performance_score
        ),
        critical_issues,
        optimizations,
        priority_actions: actions(&[
            "Compress and optimize images",
            "Minimize JavaScript and CSS files",
            "Improve server response time",
            "Enable browser caching",
        ]),
    }
}

/// Fixed set attached to demo reports
pub fn demo() -> AiRecommendation {
    AiRecommendation {
        summary: "Your website has good performance potential but could benefit from image optimization and code minification. The loading speed is reasonable but can be improved by 30-40% with the right optimizations."
            .to_string(),
        critical_issues: vec![issue(
            "Large unoptimized images",
            "Users experience slow loading times, especially on mobile devices with slower connections",
            "Compress images using modern formats like WebP, and implement responsive images for different screen sizes",
            "25-35% faster loading time",
        )],
        optimizations: vec![
            optimization(
                "Images",
                "Convert images to WebP format and compress them by 70-80% without losing visual quality",
                Difficulty::Easy,
                "30% reduction in page load time",
            ),
            optimization(
                "JavaScript",
                "Remove unused JavaScript code and enable code splitting to load only what's needed",
                Difficulty::Medium,
                "15-20% improvement in interactivity",
            ),
            optimization(
                "Caching",
                "Set up browser caching for static resources to reduce repeat loading times",
                Difficulty::Easy,
                "50% faster loading for returning visitors",
            ),
        ],
        priority_actions: actions(&[
            "Optimize and compress all images on your website",
            "Enable browser caching for static files",
            "Minify CSS and JavaScript files",
            "Use a Content Delivery Network (CDN) for faster global access",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::synthetic::fallback_resources;
    use crate::analysis::Measurement;

    fn vitals(performance_score: u8, lcp: f64) -> WebVitals {
        WebVitals {
            url: "https://example.com".to_string(),
            measurement: Measurement::new(1500.0, lcp, 80.0, 0.05, 400.0),
            performance_score,
            accessibility_score: 80,
            best_practices_score: 80,
            seo_score: 80,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_heuristic_for_slow_heavy_page() {
        let recommendation = heuristic(&vitals(42, 3200.0), &fallback_resources());

        assert_eq!(
            recommendation.summary,
            "Your website scored 42/100 for performance. There are opportunities to make it faster and more user-friendly."
        );
        assert_eq!(recommendation.critical_issues.len(), 1);
        let categories: Vec<&str> = recommendation
            .optimizations
            .iter()
            .map(|o| o.category.as_str())
            .collect();
        assert_eq!(categories, ["Loading Speed", "Images"]);
        assert_eq!(recommendation.priority_actions.len(), 4);
    }

    #[test]
    fn test_heuristic_for_healthy_page() {
        let mut resources = fallback_resources();
        resources.image_bytes = IMAGE_BYTES_THRESHOLD;

        let recommendation = heuristic(&vitals(50, 2500.0), &resources);
        assert!(recommendation.critical_issues.is_empty());
        assert!(recommendation.optimizations.is_empty());
        assert_eq!(recommendation.priority_actions.len(), 4);
    }

    #[test]
    fn test_canned_and_demo_sets() {
        assert_eq!(canned().priority_actions.len(), 3);
        let demo = demo();
        assert_eq!(demo.optimizations.len(), 3);
        assert_eq!(demo.optimizations[1].difficulty, Difficulty::Medium);
        assert_eq!(demo.priority_actions.len(), 4);
    }
}
