//! Model-backed recommendation generation with fallbacks

use tracing::{info, warn};

use super::decode::{decode_recommendation, Decoded};
use super::fallback;
use super::prompt::{build_prompt, SYSTEM_PROMPT};
use super::types::AiRecommendation;
use crate::analysis::AnalysisData;
use crate::llm::{LlmClient, LlmConfig, LlmResult};

/// Turns an analysis into recommendations via the configured model
#[derive(Clone)]
pub struct RecommendationService {
    client: LlmClient,
}

impl RecommendationService {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: LlmConfig) -> LlmResult<Self> {
        Ok(Self::new(LlmClient::new(config)?))
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Never fails: a failed call yields the heuristic set, undecodable
    /// output yields the canned set
    pub async fn generate(&self, data: &AnalysisData) -> AiRecommendation {
        let prompt = build_prompt(&data.web_vitals, &data.resources, &data.insights);

        match self.client.complete_with_system(SYSTEM_PROMPT, prompt).await {
            Ok(text) => match decode_recommendation(&text) {
                Decoded::Parsed(recommendation) => {
                    info!(
                        "Generated recommendations for {} via {}",
                        data.web_vitals.url,
                        self.client.provider_name()
                    );
                    recommendation
                }
                Decoded::Fallback(recommendation) => {
                    warn!(
                        "Unusable model output for {}, using canned recommendations",
                        data.web_vitals.url
                    );
                    recommendation
                }
            },
            Err(e) => {
                warn!(
                    "Recommendation request failed for {}: {}; using heuristic recommendations",
                    data.web_vitals.url, e
                );
                fallback::heuristic(&data.web_vitals, &data.resources)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{NoProbe, PerformanceAnalyzer, SyntheticSource};
    use crate::llm::providers::LlmProvider;
    use crate::llm::{LlmError, LlmRequest, LlmResponse, TokenUsage};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct ScriptedProvider(Option<&'static str>);

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn complete(&self, _request: &LlmRequest) -> LlmResult<LlmResponse> {
            match self.0 {
                Some(text) => Ok(LlmResponse {
                    content: text.to_string(),
                    model: "scripted".to_string(),
                    usage: TokenUsage::default(),
                    finish_reason: None,
                }),
                None => Err(LlmError::NetworkError("unreachable".to_string())),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn service(reply: Option<&'static str>) -> RecommendationService {
        RecommendationService::new(LlmClient::with_provider(
            LlmConfig::default(),
            Arc::new(ScriptedProvider(reply)),
        ))
    }

    fn analysis() -> AnalysisData {
        PerformanceAnalyzer::new(Arc::new(SyntheticSource), Arc::new(NoProbe))
            .fallback_analysis("https://example.com")
    }

    #[tokio::test]
    async fn test_parsed_reply_is_returned() {
        let service = service(Some(
            r#"Sure! {"summary": "Looks good", "priorityActions": ["Ship it"]}"#,
        ));
        let recommendation = service.generate(&analysis()).await;
        assert_eq!(recommendation.summary, "Looks good");
        assert_eq!(recommendation.priority_actions, ["Ship it"]);
    }

    #[tokio::test]
    async fn test_unparseable_reply_uses_canned_set() {
        let recommendation = service(Some("I cannot help with that"))
            .generate(&analysis())
            .await;
        assert_eq!(recommendation, fallback::canned());
    }

    #[tokio::test]
    async fn test_failed_call_uses_heuristic_set() {
        let data = analysis();
        let recommendation = service(None).generate(&data).await;
        assert_eq!(
            recommendation,
            fallback::heuristic(&data.web_vitals, &data.resources)
        );
        assert!(recommendation.summary.starts_with("Your website scored"));
    }
}
