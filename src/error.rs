//! Error types for gate operations

/// Gate-specific error type
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;

/// HTTP status for errors
///
/// Every `GateError` is a fault on the server side: a denied request is never
/// an error, it is a [`crate::auth::AuthorizationError`] response.
#[cfg(feature = "axum")]
impl GateError {
    pub fn status_code(&self) -> http::StatusCode {
        http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for GateError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "Permission gate failed");
        // Internal details stay in the log
        (self.status_code(), "Internal server error").into_response()
    }
}
