//! OpenAI互換プロバイダー実装
//!
//! `/chat/completions` に Bearer 認証で送信します。OpenAI 本体とローカルLLMサーバーの両方に使えます。

use crate::llm::{
    config::{LlmConfig, LlmProvider as ProviderType},
    error::{LlmError, LlmResult},
    providers::{check_status, http_client, LlmProvider as LlmProviderTrait},
    types::{LlmRequest, LlmResponse, Message, TokenUsage},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// OpenAI API の既定エンドポイント
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// OpenAIプロバイダー
pub struct OpenAIProvider {
    client: reqwest::Client,
    config: LlmConfig,
    endpoint: String,
}

impl OpenAIProvider {
    /// 新しいOpenAIプロバイダーを作成
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        if config.provider == ProviderType::OpenAI && config.get_api_key().is_none() {
            return Err(LlmError::ConfigError("API key is required".to_string()));
        }

        let endpoint = match (&config.endpoint, config.provider) {
            (Some(endpoint), _) => endpoint.trim_end_matches('/').to_string(),
            (None, ProviderType::Custom) => {
                return Err(LlmError::ConfigError(
                    "Endpoint is required for custom providers".to_string(),
                ))
            }
            (None, _) => DEFAULT_OPENAI_ENDPOINT.to_string(),
        };

        Ok(Self {
            client: http_client(&config)?,
            config,
            endpoint,
        })
    }

    fn build_body<'a>(&'a self, request: &'a LlmRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: request
                .model
                .as_deref()
                .unwrap_or(&self.config.default_model),
            messages: &request.messages,
            temperature: request
                .temperature
                .unwrap_or(self.config.default_temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.default_max_tokens),
        }
    }
}

#[async_trait]
impl LlmProviderTrait for OpenAIProvider {
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let body = self.build_body(request);
        debug!("Sending chat completion request: model={}", body.model);

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .json(&body);

        if let Some(api_key) = self.config.get_api_key() {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, self.config.timeout_secs))?;

        let response: ChatCompletionResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| LlmError::from_transport(e, self.config.timeout_secs))?;

        response.into_llm_response()
    }

    fn name(&self) -> &str {
        match self.config.provider {
            ProviderType::OpenAI => "OpenAI",
            _ => "OpenAI-compatible",
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

impl ChatCompletionResponse {
    fn into_llm_response(self) -> LlmResult<LlmResponse> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse("No choices in response".to_string()))?;

        let usage = self
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            model: self.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        assert!(OpenAIProvider::new(LlmConfig::openai("test-key", "gpt-4o-mini")).is_ok());

        let mut keyless = LlmConfig::openai("test-key", "gpt-4o-mini");
        keyless.api_key = None;
        assert!(OpenAIProvider::new(keyless).is_err());
    }

    #[test]
    fn test_custom_endpoint_is_used() {
        let provider =
            OpenAIProvider::new(LlmConfig::custom("http://localhost:8080/v1/", "llama-3")).unwrap();
        assert_eq!(provider.endpoint, "http://localhost:8080/v1");
        assert_eq!(provider.name(), "OpenAI-compatible");
    }

    #[test]
    fn test_body_uses_config_defaults() {
        let provider = OpenAIProvider::new(LlmConfig::openai("k", "gpt-4o-mini")).unwrap();
        let request = LlmRequest::new(vec![Message::system("sys"), Message::user("Hello!")]);

        let body = serde_json::to_value(provider.build_body(&request)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["max_tokens"], 2048);
    }

    #[test]
    fn test_response_conversion() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "hi"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let response = response.into_llm_response().unwrap();

        assert_eq!(response.content, "hi");
        assert_eq!(response.usage.total_tokens, 6);
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    }
}
