//! LLM統合システム
//!
//! Gemini と OpenAI互換エンドポイントへの完了リクエストを提供します。
//! AI推奨の生成はこのモジュールの上に構築されます。

pub mod client;
pub mod config;
pub mod error;
pub mod providers;
pub mod types;

pub use client::LlmClient;
pub use config::{LlmConfig, LlmProvider};
pub use error::{LlmError, LlmResult};
pub use types::{LlmRequest, LlmResponse, Message, Role, TokenUsage};
