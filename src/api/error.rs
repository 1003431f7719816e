use thiserror::Error;

/// Errors from the PingDirectory configuration API.
///
/// SECURITY: Error messages must NEVER contain the provider password.
#[derive(Debug, Error)]
pub enum ConfigApiError {
    /// Credentials rejected (401) or not permitted (403)
    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// The object does not exist
    #[error("configuration object not found: {path}")]
    NotFound { path: String },

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level error (connection failed, timeout, TLS, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("invalid response from {path}: {message}")]
    InvalidResponse { path: String, message: String },
}

impl ConfigApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
