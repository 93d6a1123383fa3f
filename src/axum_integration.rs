//! Axum integration for the permission gate
//!
//! This module connects the gate to whatever the authentication layer left in
//! the request extensions:
//! - [`request_context`] builds the evaluator's per-request view
//! - `PrincipalExtractor` hands the caller's claims to a handler
//!
//! A `ClaimsPrincipal` extension takes precedence over `JwtClaims`.
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{routing::get, Router};
//! use claims_gate::axum_integration::PrincipalExtractor;
//! use claims_gate::auth::RequirePermissions;
//!
//! async fn handler(principal: PrincipalExtractor) -> String {
//!     format!("{} claims", principal.claims.len())
//! }
//!
//! let app = Router::new()
//!     .route("/orders", get(handler))
//!     .route_layer(RequirePermissions::any_of(["orders.read"]));
//! ```

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Extensions, StatusCode},
};
use std::ops::Deref;

use crate::auth::RequestContext;
use crate::types::{ClaimsPrincipal, JwtClaims};

/// Build the evaluator's view of a request from its extensions
///
/// With neither a `ClaimsPrincipal` nor `JwtClaims` present the context is
/// unauthenticated, which the evaluator treats as holding no claims.
pub fn request_context(extensions: &Extensions) -> RequestContext<'_> {
    if let Some(principal) = extensions.get::<ClaimsPrincipal>() {
        RequestContext::new(principal)
    } else if let Some(claims) = extensions.get::<JwtClaims>() {
        RequestContext::new(claims)
    } else {
        RequestContext::anonymous()
    }
}

/// Axum extractor for the authenticated principal
///
/// Rejects with 401 when the authentication layer did not attach a principal.
#[derive(Debug, Clone)]
pub struct PrincipalExtractor(pub ClaimsPrincipal);

impl Deref for PrincipalExtractor {
    type Target = ClaimsPrincipal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ClaimsPrincipal> for PrincipalExtractor {
    fn from(principal: ClaimsPrincipal) -> Self {
        Self(principal)
    }
}

impl PrincipalExtractor {
    pub fn into_inner(self) -> ClaimsPrincipal {
        self.0
    }
}

impl<S> FromRequestParts<S> for PrincipalExtractor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<ClaimsPrincipal>() {
            return Ok(Self(principal.clone()));
        }

        parts
            .extensions
            .get::<JwtClaims>()
            .map(|claims| Self(claims.to_principal()))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
