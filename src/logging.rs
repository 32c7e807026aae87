use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// ログファイル名のプレフィックス
const LOG_FILE_NAME: &str = "pagepulse.log";

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// ログレベル (trace, debug, info, warn, error) またはフィルタ式
    #[serde(default = "default_level")]
    pub level: String,
    /// JSON形式で出力
    #[serde(default)]
    pub json: bool,
    /// ファイル出力有効
    #[serde(default)]
    pub file_enabled: bool,
    /// ログディレクトリ
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// ファイルローテーション設定
    #[serde(default)]
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// 日次ローテーション
    #[default]
    Daily,
    /// 時間毎ローテーション
    Hourly,
    /// ローテーションなし
    Never,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            file_enabled: false,
            log_dir: default_log_dir(),
            rotation: LogRotation::default(),
        }
    }
}

impl LogConfig {
    /// ログレベルを上書き
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// フィルタ式を検証
    pub fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        EnvFilter::try_new(&self.level)
            .with_context(|| format!("Invalid log level: {}", self.level))?;
        Ok(())
    }

    /// RUST_LOG が設定されていればそれを優先
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// ログディレクトリを確保
fn ensure_log_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    Ok(())
}

/// ログシステムを初期化
///
/// ファイル出力時は返されるガードを保持している間だけ書き込まれる。
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = config.env_filter();

    let guard = if config.file_enabled {
        ensure_log_dir(&config.log_dir)?;

        let file_appender = match config.rotation {
            LogRotation::Daily => rolling::daily(&config.log_dir, LOG_FILE_NAME),
            LogRotation::Hourly => rolling::hourly(&config.log_dir, LOG_FILE_NAME),
            LogRotation::Never => rolling::never(&config.log_dir, LOG_FILE_NAME),
        };
        let (file_writer, guard) = non_blocking(file_appender);
        let writer = std::io::stderr.and(file_writer);

        let result = if config.json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .try_init()
        };
        result.map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;

        Some(guard)
    } else {
        let result = if config.json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .try_init()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .try_init()
        };
        result.map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;

        None
    };

    tracing::debug!(
        "Logging initialised: level={} json={} file={}",
        config.level,
        config.json,
        if config.file_enabled {
            config.log_dir.display().to_string()
        } else {
            "disabled".to_string()
        }
    );

    Ok(guard)
}
