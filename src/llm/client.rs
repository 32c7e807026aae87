//! LLMクライアント

use crate::llm::{
    config::LlmConfig,
    error::{LlmError, LlmResult},
    providers::{create_provider, LlmProvider},
    types::{LlmRequest, LlmResponse, Message},
};
use std::sync::Arc;
use tracing::debug;

/// LLMクライアント
#[derive(Clone)]
pub struct LlmClient {
    provider: Arc<dyn LlmProvider>,
    config: LlmConfig,
}

impl LlmClient {
    /// 新しいクライアントを作成
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        config.validate()?;
        let provider = create_provider(&config)?;

        Ok(Self {
            provider: Arc::from(provider),
            config,
        })
    }

    /// 任意のプロバイダーでクライアントを作成（テストや独自実装向け）
    pub fn with_provider(config: LlmConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider, config }
    }

    /// プロバイダー名を取得
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// 完了リクエストを送信（設定のタイムアウトで打ち切る）
    pub async fn complete(&self, request: LlmRequest) -> LlmResult<LlmResponse> {
        let pending = self.provider.complete(&request);
        let response = tokio::time::timeout(self.config.timeout(), pending)
            .await
            .map_err(|_| LlmError::Timeout(self.config.timeout_secs))??;
        debug!(
            "{} completion: model={} tokens={}",
            self.provider.name(),
            response.model,
            response.usage.total_tokens
        );
        Ok(response)
    }

    /// システムプロンプト付きの完了
    pub async fn complete_with_system(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> LlmResult<String> {
        let messages = vec![Message::system(system_prompt), Message::user(user_prompt)];
        let response = self.complete(LlmRequest::new(messages)).await?;
        Ok(response.content)
    }
}
