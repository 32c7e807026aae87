//! LLM統合の設定

use crate::llm::error::{LlmError, LlmResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// LLMプロバイダー
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini (generateContent API)
    #[default]
    Gemini,
    /// OpenAI (Chat Completions API)
    OpenAI,
    /// OpenAI互換のカスタムエンドポイント
    Custom,
}

/// LLM設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// プロバイダー
    #[serde(default)]
    pub provider: LlmProvider,
    /// APIキー（セキュア、シリアライズしない）
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
    /// APIエンドポイント（未指定ならプロバイダー既定値）
    #[serde(default)]
    pub endpoint: Option<String>,
    /// デフォルトモデル
    #[serde(default = "default_model")]
    pub default_model: String,
    /// リクエストタイムアウト（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// デフォルト温度
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
    /// デフォルト最大トークン数
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: usize,
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> usize {
    2048
}

fn secret(value: impl Into<String>) -> SecretString {
    SecretString::new(value.into().into_boxed_str())
}

impl LlmConfig {
    /// Gemini設定を作成
    pub fn gemini(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: Some(secret(api_key)),
            default_model: model.into(),
            ..Self::default()
        }
    }

    /// OpenAI設定を作成
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            api_key: Some(secret(api_key)),
            default_model: model.into(),
            ..Self::default()
        }
    }

    /// OpenAI互換エンドポイント設定を作成（ローカルLLMなど）
    pub fn custom(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: LlmProvider::Custom,
            endpoint: Some(endpoint.into()),
            default_model: model.into(),
            ..Self::default()
        }
    }

    /// APIキーを設定
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(secret(api_key));
        self
    }

    /// タイムアウトを取得
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// APIキーを取得（露出）
    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }

    /// 認証情報が揃っているか（AI推奨の有効判定に使用）
    pub fn is_configured(&self) -> bool {
        match self.provider {
            LlmProvider::Gemini | LlmProvider::OpenAI => {
                self.get_api_key().is_some_and(|key| !key.is_empty())
            }
            LlmProvider::Custom => self.endpoint.is_some(),
        }
    }

    /// 設定を検証
    pub fn validate(&self) -> LlmResult<()> {
        match self.provider {
            LlmProvider::Gemini | LlmProvider::OpenAI => {
                if !self.is_configured() {
                    return Err(LlmError::ConfigError(format!(
                        "API key is required for provider {:?}",
                        self.provider
                    )));
                }
            }
            LlmProvider::Custom => {
                if self.endpoint.is_none() {
                    return Err(LlmError::ConfigError(
                        "Endpoint is required for custom providers".to_string(),
                    ));
                }
            }
        }

        if self.default_model.trim().is_empty() {
            return Err(LlmError::ConfigError("Model name must not be empty".to_string()));
        }

        // 温度の範囲チェック
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(LlmError::ConfigError(
                "Temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        // max_tokensの妥当性チェック
        if self.default_max_tokens == 0 || self.default_max_tokens > 100_000 {
            return Err(LlmError::ConfigError(
                "max_tokens must be between 1 and 100000".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: None,
            endpoint: None,
            default_model: default_model(),
            timeout_secs: default_timeout(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
        }
    }
}
