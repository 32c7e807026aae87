//! Prompt sent to the model for one analysis

use crate::analysis::format::round_half_up;
use crate::analysis::{PerformanceInsights, ResourceBreakdown, WebVitals};

const RESPONSE_FORMAT: &str = r#"Please provide recommendations in this EXACT JSON format:
{
  "summary": "A brief, easy-to-understand summary of the website's performance status",
  "criticalIssues": [
    {
      "issue": "Name of the critical issue",
      "impact": "How this affects user experience in simple terms",
      "solution": "What needs to be done in non-technical language",
      "expectedImprovement": "Expected performance improvement as percentage"
    }
  ],
  "optimizations": [
    {
      "category": "Images/Speed/Mobile/etc.",
      "recommendation": "Specific actionable recommendation in simple terms",
      "difficulty": "Easy/Medium/Hard",
      "expectedGain": "Expected improvement with percentage"
    }
  ],
  "priorityActions": [
    "Top 3-5 most important actions to take first"
  ]
}

Focus on:
1. Making recommendations understandable for non-technical users
2. Providing specific percentage improvements where possible
3. Prioritizing actions by impact and ease of implementation
4. Explaining WHY each optimization matters for user experience
"#;

/// Role given to the model ahead of the analysis data
pub const SYSTEM_PROMPT: &str = "You are a web performance expert. Analyze the following website performance data and provide human-friendly recommendations that a non-technical person can understand.";

fn kilobytes(bytes: u64) -> f64 {
    round_half_up(bytes as f64 / 1024.0)
}

pub fn build_prompt(
    vitals: &WebVitals,
    resources: &ResourceBreakdown,
    insights: &PerformanceInsights,
) -> String {
    let m = &vitals.measurement;
    let mut prompt = format!(
        "WEBSITE: {url}

PERFORMANCE SCORES:
- Performance: {perf}/100
- Accessibility: {a11y}/100
- Best Practices: {bp}/100
- SEO: {seo}/100

WEB VITALS (Loading Speed Metrics):
- First Contentful Paint (FCP): {fcp}ms (How fast content appears)
- Largest Contentful Paint (LCP): {lcp}ms (How fast main content loads)
- First Input Delay (FID): {fid}ms (How responsive the site is)
- Cumulative Layout Shift (CLS): {cls:.3} (How stable the layout is)
- Time to First Byte (TTFB): {ttfb}ms (How fast server responds)

RESOURCE ANALYSIS:
- Total page size: {total}KB
- JavaScript size: {js}KB
- CSS size: {css}KB
- Images size: {img}KB
- Number of requests: {requests}

IDENTIFIED OPPORTUNITIES:
",
        url = vitals.url,
        perf = vitals.performance_score,
        a11y = vitals.accessibility_score,
        bp = vitals.best_practices_score,
        seo = vitals.seo_score,
        fcp = round_half_up(m.fcp),
        lcp = round_half_up(m.lcp),
        fid = round_half_up(m.fid),
        cls = m.cls,
        ttfb = round_half_up(m.ttfb),
        total = kilobytes(resources.total_bytes),
        js = kilobytes(resources.script_bytes),
        css = kilobytes(resources.style_bytes),
        img = kilobytes(resources.image_bytes),
        requests = resources.requests,
    );

    let lines: Vec<String> = insights
        .opportunities
        .iter()
        .map(|o| {
            format!(
                "- {}: {} (Potential savings: {})",
                o.title, o.description, o.savings
            )
        })
        .collect();
    prompt.push_str(&lines.join("\n"));
    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_FORMAT);

    prompt
}
