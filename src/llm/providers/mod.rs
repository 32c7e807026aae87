//! LLMプロバイダー実装

pub mod gemini;
pub mod openai;

use crate::llm::{
    config::LlmConfig,
    error::{LlmError, LlmResult},
    types::{LlmRequest, LlmResponse},
};
use async_trait::async_trait;

/// LLMプロバイダートレイト
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// 通常の完了リクエスト
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse>;

    /// プロバイダー名を取得
    fn name(&self) -> &str;
}

/// プロバイダーファクトリー
pub fn create_provider(config: &LlmConfig) -> LlmResult<Box<dyn LlmProvider>> {
    use crate::llm::config::LlmProvider as ProviderType;

    match config.provider {
        ProviderType::Gemini => Ok(Box::new(gemini::GeminiProvider::new(config.clone())?)),
        ProviderType::OpenAI | ProviderType::Custom => {
            Ok(Box::new(openai::OpenAIProvider::new(config.clone())?))
        }
    }
}

/// 共通のHTTPクライアントを構築
pub(crate) fn http_client(config: &LlmConfig) -> LlmResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| LlmError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// 非成功ステータスのレスポンスをエラーへ変換
pub(crate) async fn check_status(response: reqwest::Response) -> LlmResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::from_status(status.as_u16(), body))
}
