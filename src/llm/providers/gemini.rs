//! Google Gemini プロバイダー実装
//!
//! `models/{model}:generateContent` を呼び出します。APIキーはクエリパラメータで渡します。

use crate::llm::{
    config::LlmConfig,
    error::{LlmError, LlmResult},
    providers::{check_status, http_client, LlmProvider},
    types::{LlmRequest, LlmResponse, Role, TokenUsage},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gemini API の既定エンドポイント
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Geminiプロバイダー
pub struct GeminiProvider {
    client: reqwest::Client,
    config: LlmConfig,
    endpoint: String,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダーを作成
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        if config.get_api_key().is_none() {
            return Err(LlmError::ConfigError(
                "Gemini API key is required".to_string(),
            ));
        }

        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: http_client(&config)?,
            config,
            endpoint,
        })
    }

    fn request_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint,
            model,
            urlencoding::encode(self.config.get_api_key().unwrap_or_default())
        )
    }

    /// 汎用リクエストを Gemini の形式へ変換
    fn build_body(&self, request: &LlmRequest) -> GenerateContentRequest {
        let contents = request
            .messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| Content {
                role: Some(match m.role {
                    Role::Assistant => "model".to_string(),
                    _ => "user".to_string(),
                }),
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            })
            .collect();

        let system_instruction = request.system_text().map(|text| Content {
            role: None,
            parts: vec![Part { text }],
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: request
                    .temperature
                    .unwrap_or(self.config.default_temperature),
                max_output_tokens: request
                    .max_tokens
                    .unwrap_or(self.config.default_max_tokens),
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.default_model.clone());
        let body = self.build_body(request);

        debug!("Sending Gemini request: model={}", model);

        let response = self
            .client
            .post(self.request_url(&model))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, self.config.timeout_secs))?;

        let response: GenerateContentResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| LlmError::from_transport(e, self.config.timeout_secs))?;

        response.into_llm_response(model)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}

impl GenerateContentResponse {
    fn into_llm_response(self, requested_model: String) -> LlmResult<LlmResponse> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse("no candidates returned".to_string()))?;

        // 複数パートは連結して1つのテキストとして扱う
        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse(format!(
                "candidate has no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        let usage = self.usage_metadata.unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: self.model_version.unwrap_or(requested_model),
            usage: TokenUsage::new(usage.prompt_token_count, usage.candidates_token_count),
            finish_reason: candidate.finish_reason,
        })
    }
}
