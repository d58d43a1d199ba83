//! Error types for gavocab

use thiserror::Error;

/// Result type alias for gavocab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Errors reported by the Google Analytics API or its OAuth endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication with Google Analytics failed")]
    Unauthorized,

    #[error("Access denied. The service account cannot read this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Request timed out: {0}")]
    RequestTimedOut(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Unexpected response status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Analytics client is not ready: {0}")]
    NotReady(String),

    #[error("Token was already revoked")]
    TokenAlreadyRevoked,
}

impl ApiError {
    /// True for failures where the remote service answered with an HTTP error status.
    pub fn is_http_status(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized
                | ApiError::Forbidden
                | ApiError::NotFound(_)
                | ApiError::InvalidRequest(_)
                | ApiError::ServerError(_)
                | ApiError::Remote { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::RequestTimedOut(err.to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to Google".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Problems with the service-account credential blob
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("No service account credentials configured")]
    Missing,

    #[error("Could not parse service account credentials: {0}")]
    Malformed(String),

    #[error("Credentials of type '{0}' are not a service account key")]
    UnsupportedType(String),

    #[error("Service account private key is unusable: {0}")]
    InvalidKey(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `gavocab init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Response cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache IO error: {0}")]
    Io(String),

    #[error("Cache database error: {0}")]
    Database(#[from] rusqlite::Error),
}
