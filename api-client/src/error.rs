use thiserror::Error;

/// Errors surfaced by the collection API client and, through it, the record
/// store. Favorites persistence has its own degraded handling and never
/// reaches this taxonomy.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller-correctable payload problem (HTTP 400).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The record does not exist on the server (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller may not perform this mutation (HTTP 401/403).
    #[error("not authorized: {0}")]
    Authorization(String),

    /// Transport failure or an unexpected server response.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
