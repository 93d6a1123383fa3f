use std::fmt;
use std::sync::Arc;

use super::claims::{candidate_tokens, ClaimSource};
use crate::config::PermissionsConfig;
use crate::error::{GateError, Result};

/// Per-request view handed to the evaluator
///
/// The principal is absent for unauthenticated requests; the evaluator treats
/// that the same as a principal holding no claims.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    principal: Option<&'a dyn ClaimSource>,
}

impl<'a> RequestContext<'a> {
    pub fn new(principal: &'a dyn ClaimSource) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Context of a request that reached the gate without a principal
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn principal(&self) -> Option<&'a dyn ClaimSource> {
        self.principal
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

impl fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// Decides whether a principal holds one of an endpoint's allowed permissions
///
/// Cloning is cheap and every clone shares the same immutable configuration,
/// so one evaluator can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator {
    config: Arc<PermissionsConfig>,
}

impl PermissionEvaluator {
    pub fn new(config: PermissionsConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PermissionsConfig {
        &self.config
    }

    pub fn allowed_permissions(&self) -> &[String] {
        &self.config.allowed_permissions
    }

    /// Check the request's principal against the allowed permissions
    ///
    /// Fails with [`GateError::InvalidArgument`] only when `context` is
    /// missing. A missing principal, missing claims or an empty allow-list are
    /// all a plain `false`.
    pub fn has_permission(&self, context: Option<&RequestContext<'_>>) -> Result<bool> {
        let context = context.ok_or_else(|| {
            GateError::InvalidArgument("request context is required".to_string())
        })?;

        Ok(match context.principal() {
            Some(principal) => self.principal_has_permission(principal),
            None => false,
        })
    }

    /// Permission check on a principal directly
    pub fn principal_has_permission<S: ClaimSource + ?Sized>(&self, principal: &S) -> bool {
        let config = &self.config;
        if config.allowed_permissions.is_empty() {
            return false;
        }

        if self.matches(principal, &config.permission_claim_type, config.permission_claim_separator) {
            return true;
        }

        config.allow_scopes
            && self.matches(principal, &config.scope_claim_type, config.effective_scope_separator())
    }

    fn matches<S: ClaimSource + ?Sized>(&self, principal: &S, claim_type: &str, separator: char) -> bool {
        let tokens = candidate_tokens(principal, claim_type, separator);
        self.config
            .allowed_permissions
            .iter()
            .any(|permission| tokens.contains(permission.as_str()))
    }
}

impl From<PermissionsConfig> for PermissionEvaluator {
    fn from(config: PermissionsConfig) -> Self {
        Self::new(config)
    }
}
