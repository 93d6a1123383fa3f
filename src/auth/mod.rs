//! Claims-based permission checks and the gate built on them
//!
//! This module decides whether an authenticated principal holds at least one
//! of the permissions an endpoint declares, optionally accepting an equivalent
//! OAuth scope, and rejects the request with 401 when it does not.
//!
//! # Features
//!
//! - `ClaimSource` and the claim-splitting helpers
//! - `PermissionEvaluator` for the bare yes/no decision
//! - `PermissionsGate` turning that decision into `Decision::Allowed` or a rejection
//! - `RequirePermissions` middleware layer (with the `axum` feature)
//!
//! # Example
//!
//! ```ignore
//! use axum::{routing::post, Router};
//! use claims_gate::auth::RequirePermissions;
//! use claims_gate::config::PermissionsConfig;
//!
//! let app = Router::new()
//!     .route("/orders", post(create_order))
//!     .route_layer(RequirePermissions::new(
//!         PermissionsConfig::new(["orders.write"]).with_allow_scopes(false),
//!     ));
//! ```

pub mod claims;
pub mod error;
pub mod evaluator;
pub mod gate;
#[cfg(feature = "axum")]
pub mod middleware;

pub use claims::{candidate_tokens, split_claim_value, ClaimSource};
pub use error::AuthorizationError;
pub use evaluator::{PermissionEvaluator, RequestContext};
pub use gate::{Decision, PermissionsGate};
#[cfg(feature = "axum")]
pub use middleware::{RequirePermissions, RequirePermissionsMiddleware};
