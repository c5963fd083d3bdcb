use std::env;

use thiserror::Error;

use crate::locale::Locale;
use crate::report::ExportFormat;

/// 実行時設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub locale: Locale,
    pub export_format: ExportFormat,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WSQ_LANG must be one of en, id (got '{0}')")]
    InvalidLocale(String),
    #[error("WSQ_EXPORT_FORMAT must be one of text, json, csv (got '{0}')")]
    InvalidExportFormat(String),
}

impl AppConfig {
    /// `.env` と環境変数から読み込む
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lang = lookup("WSQ_LANG").unwrap_or_else(|| "id".to_string());
        let locale = lang
            .parse::<Locale>()
            .map_err(|_| ConfigError::InvalidLocale(lang.clone()))?;

        let format = lookup("WSQ_EXPORT_FORMAT").unwrap_or_else(|| "text".to_string());
        let export_format = format
            .parse::<ExportFormat>()
            .map_err(|_| ConfigError::InvalidExportFormat(format.clone()))?;

        let log_level = lookup("WSQ_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            locale,
            export_format,
            telemetry: TelemetryConfig { log_level },
        })
    }
}
