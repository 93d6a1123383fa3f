/// Authorization outcome for a request that did not hold a required permission
///
/// A denial is an expected result, not a fault: the gate hands it back as the
/// response instead of propagating it as an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// None of the allowed permissions (or equivalent scopes) was present
    #[error("You do not have one of the required permissions {}.", .0.join(","))]
    MissingPermission(Vec<String>),
}

impl AuthorizationError {
    /// Permissions the endpoint would have accepted
    pub fn required_permissions(&self) -> &[String] {
        match self {
            AuthorizationError::MissingPermission(required) => required,
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AuthorizationError {
    fn into_response(self) -> axum::response::Response {
        (http::StatusCode::UNAUTHORIZED, self.to_string()).into_response()
    }
}
