use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when the backend rejects the stored access token.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to continue";

/// A single failed form field, reported back to the KYC page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for the entire fundscope-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ───────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    // ── HTTP status ─────────────────────────────────────────────────
    #[error("Unauthorized — access token missing or expired")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    // ── Response envelope ───────────────────────────────────────────
    #[error("API error ({endpoint}): {message}")]
    Api { endpoint: String, message: String },

    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("KYC validation failed: {}", join_field_errors(.0))]
    KycValidation(Vec<FieldError>),

    #[error("Holdings data not available for fund {0}")]
    HoldingsUnavailable(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Compare selection is full (max {0} funds)")]
    SelectionFull(usize),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted file")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// `true` for the 401 case that must clear the stored token.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, CoreError::Unauthorized)
    }

    /// Text suitable for an inline message or toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Unauthorized => LOGIN_REQUIRED_MESSAGE.to_string(),
            CoreError::NotFound(_) => "The requested item could not be found.".to_string(),
            CoreError::Server { .. } | CoreError::Http { .. } => {
                "Something went wrong on our side. Please try again later.".to_string()
            }
            CoreError::Network(_) | CoreError::Timeout => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            CoreError::Api { message, .. } => message.clone(),
            CoreError::MalformedEnvelope(_) => {
                "Received an unexpected response from the server.".to_string()
            }
            CoreError::ValidationError(msg) => msg.clone(),
            CoreError::KycValidation(errors) => join_field_errors(errors),
            CoreError::HoldingsUnavailable(_) => {
                "Holdings data is not available for one of the selected funds.".to_string()
            }
            other => other.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return CoreError::Timeout;
        }
        if e.is_decode() {
            return CoreError::Deserialization(e.to_string());
        }
        // Search terms travel in the query string and stay out of messages.
        let url = e.url().map(redacted_url);
        let e = e.without_url();
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(&format!(": {cause}"));
            source = cause.source();
        }
        if let Some(url) = url {
            message.push_str(&format!(" (url: {url})"));
        }
        CoreError::Network(message)
    }
}

fn redacted_url(url: &reqwest::Url) -> String {
    let mut bare = url.clone();
    bare.set_fragment(None);
    match bare.query() {
        Some(_) => {
            bare.set_query(None);
            format!("{bare}?<query redacted>")
        }
        None => bare.to_string(),
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
