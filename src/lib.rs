//! # claims-gate
//!
//! Request-level authorization for HTTP APIs. An endpoint declares the
//! permissions it accepts; the gate checks the permission (and optionally
//! scope) claims of the already-authenticated caller and lets the request
//! through when any one of them matches.
//!
//! Token validation and claim population are left to the authentication layer
//! in front of the gate, which inserts a `ClaimsPrincipal` or `JwtClaims` into
//! the request extensions.
//!
//! ## Features
//!
//! - `axum` (default): tower middleware layer and axum extractors

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

#[cfg(feature = "axum")]
pub mod axum_integration;

pub use error::{GateError, Result};

// Re-export commonly used types at crate root
pub use crate::auth::{AuthorizationError, ClaimSource, Decision, PermissionEvaluator, PermissionsGate, RequestContext};
pub use crate::config::{GateConfig, PermissionsConfig};
pub use crate::types::{Claim, ClaimsPrincipal, JwtClaims};

#[cfg(feature = "axum")]
pub use crate::auth::RequirePermissions;
