use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("HTTP transport failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Intake endpoint URL is not configured")]
    EndpointNotConfigured,

    #[error("Notification error: {message}")]
    NotificationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            IntakeError::TransportError(_) => ErrorSeverity::Medium,
            IntakeError::NotificationError { .. } => ErrorSeverity::Low,
            IntakeError::CsvError(_)
            | IntakeError::IoError(_)
            | IntakeError::SerializationError(_) => ErrorSeverity::High,
            IntakeError::TomlError(_)
            | IntakeError::ConfigError { .. }
            | IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. }
            | IntakeError::EndpointNotConfigured => ErrorSeverity::Critical,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼；任何錯誤都不會回傳 0
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Critical => 3,
            ErrorSeverity::Low | ErrorSeverity::Medium | ErrorSeverity::High => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::TransportError(_) => {
                "Could not reach the intake endpoint.".to_string()
            }
            IntakeError::EndpointNotConfigured => {
                "The intake endpoint URL has not been configured.".to_string()
            }
            IntakeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value `{}` is invalid: {}", field, reason)
            }
            IntakeError::MissingConfigError { field } => {
                format!("Configuration value `{}` is missing.", field)
            }
            IntakeError::TomlError(_) | IntakeError::ConfigError { .. } => {
                "The configuration file could not be read.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IntakeError::TransportError(_) => {
                "Check your internet connection and try again."
            }
            IntakeError::EndpointNotConfigured => {
                "Deploy the intake endpoint, then set client.endpoint_url in intake.toml or INTAKE_ENDPOINT_URL."
            }
            IntakeError::TomlError(_)
            | IntakeError::ConfigError { .. }
            | IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. } => {
                "Fix intake.toml and run the command again."
            }
            IntakeError::CsvError(_) | IntakeError::IoError(_) => {
                "Check that the data directory exists and is writable."
            }
            IntakeError::SerializationError(_) => "Check the JSON payload shape.",
            IntakeError::NotificationError { .. } => {
                "Check the outbox directory; the row was already stored."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
