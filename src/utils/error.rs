use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Invalid referral code: {value}")]
    InvalidReferralCode { value: String },

    #[error("Could not generate an unused referral code after {attempts} attempts")]
    ReferralCodeExhausted { attempts: usize },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Input,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScribeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScribeError::ConfigError { .. }
            | ScribeError::InvalidConfigValueError { .. }
            | ScribeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ScribeError::IoError(_)
            | ScribeError::SerializationError(_)
            | ScribeError::StorageError { .. } => ErrorCategory::Storage,
            ScribeError::InvalidReferralCode { .. } => ErrorCategory::Input,
            ScribeError::ReferralCodeExhausted { .. } | ScribeError::ServerError { .. } => {
                ErrorCategory::Runtime
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScribeError::InvalidReferralCode { .. } => ErrorSeverity::Low,
            ScribeError::ReferralCodeExhausted { .. } | ScribeError::StorageError { .. } => {
                ErrorSeverity::Medium
            }
            ScribeError::ConfigError { .. }
            | ScribeError::InvalidConfigValueError { .. }
            | ScribeError::ConfigValidationError { .. }
            | ScribeError::SerializationError(_) => ErrorSeverity::High,
            ScribeError::IoError(_) | ScribeError::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScribeError::InvalidReferralCode { value } => {
                format!("'{}' is not a valid referral code", value)
            }
            ScribeError::ReferralCodeExhausted { .. } => {
                "No unused referral code could be generated".to_string()
            }
            ScribeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            ScribeError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' could not be loaded: {}", field, message)
            }
            ScribeError::ConfigError { message } => format!("Configuration problem: {}", message),
            ScribeError::StorageError { message } => format!("Storage problem: {}", message),
            ScribeError::IoError(e) => format!("File system problem: {}", e),
            ScribeError::SerializationError(e) => format!("Malformed data: {}", e),
            ScribeError::ServerError { message } => format!("Server problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check NEXT_PUBLIC_SITE_URL, SCRIBE_BIND and the --config file"
            }
            ErrorCategory::Storage => "Check that the storage path exists and is writable",
            ErrorCategory::Input => "Referral codes look like SUPP followed by 4 of A-Z or 0-9",
            ErrorCategory::Runtime => "Retry the operation; if it keeps failing, check the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScribeError>;
