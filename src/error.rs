//! SDK error type
//!
//! Every fallible call in the crate returns [`Result`]. Transport failures,
//! non-2xx responses, bad configuration and pager misuse all land in the
//! same enum so callers can match on what went wrong.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("invalid value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    /// A required request option was empty
    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("invalid YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pager built from options that already carry a cursor
    #[error("the 'start' field should not be set when creating a pager")]
    StartAlreadySet,

    /// `get_next`/`get_all` called on an exhausted pager
    #[error("no more results available")]
    NoMoreResults,

    #[error("authentication failed: {message}")]
    Auth { message: String },

    #[error("token request failed: {message}")]
    TokenRequest { message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `body` is the server's error message when one
    /// could be extracted, otherwise the raw body
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("could not decode response: {message}")]
    Decode { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("file not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Status code of the failed response, if the error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether sending the same request again might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
