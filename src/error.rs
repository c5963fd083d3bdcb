use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// 回答選択肢が違反
    #[error("answer value {0} is outside 1..=4")]
    InvalidAnswerValue(u8),
    /// 設問が存在しない
    #[error("question {0} is not in the active catalog")]
    UnknownItem(u32),
    /// 区分名が未定義
    #[error("section {0} has no display name")]
    UnknownSection(u32),
    /// 未対応の言語
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),
    /// 回答欠落
    #[error("{answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
    #[error("inconsistent questionnaire content: {0}")]
    ContentMismatch(String),
    #[error("malformed questionnaire content: {0}")]
    Content(#[source] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// コマンドライン実行時のエラー
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Questionnaire(#[from] Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
