use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChronosError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API responded with status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("No signal received.")]
    EmptyResponseError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ChronosError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChronosError::ApiError(_) | ChronosError::ApiStatusError { .. } => {
                ErrorCategory::Network
            }
            ChronosError::EmptyResponseError | ChronosError::SerializationError(_) => {
                ErrorCategory::Data
            }
            ChronosError::TomlError(_)
            | ChronosError::ConfigError { .. }
            | ChronosError::MissingConfigError { .. }
            | ChronosError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ChronosError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 傳輸失敗只會換成 sentinel，不影響時鐘
            ChronosError::EmptyResponseError => ErrorSeverity::Low,
            ChronosError::ApiError(_)
            | ChronosError::ApiStatusError { .. }
            | ChronosError::SerializationError(_) => ErrorSeverity::Medium,
            ChronosError::TomlError(_)
            | ChronosError::ConfigError { .. }
            | ChronosError::MissingConfigError { .. }
            | ChronosError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ChronosError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ChronosError::ApiError(_) => {
                "Check your network connection and the transmission endpoint".to_string()
            }
            ChronosError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that API_KEY holds a valid credential".to_string()
            }
            ChronosError::ApiStatusError { .. } => {
                "The model service rejected the request, try again later".to_string()
            }
            ChronosError::EmptyResponseError => "Tune in again for a new signal".to_string(),
            ChronosError::SerializationError(_) => {
                "The model returned malformed JSON, tune in again".to_string()
            }
            ChronosError::TomlError(_) => "Fix the syntax of the TOML config file".to_string(),
            ChronosError::ConfigError { .. } => "Review the configuration file".to_string(),
            ChronosError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            ChronosError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            ChronosError::IoError(_) => {
                "Check file permissions and that the terminal is interactive".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Transmission link failure: {}", self),
            ErrorCategory::Data => format!("Garbled transmission: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System failure: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChronosError>;
