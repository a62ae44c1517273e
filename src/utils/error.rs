use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyBuddyError {
    #[error("Upstream request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("LLM provider error ({status}): {message}")]
    LlmError { status: u16, message: String },

    #[error("Backend error ({status}): {message}")]
    BackendError { status: u16, message: String },

    #[error("Study plan parsing error: {message}")]
    ParseError { message: String },
}

impl StudyBuddyError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::ValidationError {
            message: format!("{} is required", field),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// HTTP status a handler answers with when this error escapes it.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message suitable for the `error` field of a JSON response.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::BackendError { message, .. } => message.clone(),
            Self::LlmError { message, .. } => {
                format!("Failed to generate response: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudyBuddyError>;
