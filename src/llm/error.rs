//! LLM統合のエラー型定義

use thiserror::Error;

/// LLM統合システムのエラー型
#[derive(Error, Debug)]
pub enum LlmError {
    /// API呼び出しエラー
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// 認証エラー
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// レート制限エラー
    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    /// 無効なリクエスト
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 応答に生成テキストが含まれない
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// ネットワークエラー
    #[error("Network error: {0}")]
    NetworkError(String),

    /// タイムアウト
    #[error("Request timeout after {0}s")]
    Timeout(u64),

    /// JSONパースエラー
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LlmError {
    /// HTTPステータスからエラーを分類
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => LlmError::AuthError(body),
            429 => LlmError::RateLimitError(body),
            400 => LlmError::InvalidRequest(body),
            _ => LlmError::ApiError {
                status,
                message: body,
            },
        }
    }

    /// reqwestエラーを分類
    pub fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(timeout_secs)
        } else {
            LlmError::NetworkError(err.to_string())
        }
    }
}

/// LLM統合システムの結果型
pub type LlmResult<T> = Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            LlmError::from_status(401, String::new()),
            LlmError::AuthError(_)
        ));
        assert!(matches!(
            LlmError::from_status(429, String::new()),
            LlmError::RateLimitError(_)
        ));
        assert!(matches!(
            LlmError::from_status(503, "down".to_string()),
            LlmError::ApiError { status: 503, .. }
        ));
    }
}
