use crate::domain::model::SourceKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Source {source_kind} returned HTTP {status}")]
    SourceStatusError { source_kind: SourceKind, status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("UI channel closed")]
    ChannelClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl KioskError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            KioskError::ApiError(_) | KioskError::SourceStatusError { .. } => {
                ErrorCategory::Network
            }
            KioskError::ConfigError { .. }
            | KioskError::InvalidConfigValueError { .. }
            | KioskError::MissingConfigError { .. } => ErrorCategory::Configuration,
            KioskError::SerializationError(_) => ErrorCategory::Data,
            KioskError::IoError(_) | KioskError::ChannelClosed => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 來源失敗會以空清單替代，畫面照常刷新
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the catalog backend is reachable",
            ErrorCategory::Data => "Check that the backend returns a JSON array of records",
            ErrorCategory::Configuration => "Fix the kiosk configuration file and restart",
            ErrorCategory::System => "Restart the kiosk process",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            KioskError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            KioskError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            KioskError::SourceStatusError { source_kind, status } => {
                format!("Could not load {} (HTTP {})", source_kind, status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KioskError>;
