use super::error::AuthorizationError;
use super::evaluator::{PermissionEvaluator, RequestContext};
use crate::config::PermissionsConfig;
use crate::error::Result;

/// Outcome of running one request through the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The endpoint may run
    Allowed,
    /// The endpoint must not run; the error is the response to send
    Rejected(AuthorizationError),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Gate in front of one endpoint declaration
#[derive(Debug, Clone)]
pub struct PermissionsGate {
    evaluator: PermissionEvaluator,
}

impl PermissionsGate {
    pub fn new(config: PermissionsConfig) -> Self {
        if config.allowed_permissions.is_empty() {
            tracing::warn!("Permissions gate built with an empty allow-list; every request will be rejected");
        }

        Self {
            evaluator: PermissionEvaluator::new(config),
        }
    }

    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Run the permission check and turn it into a decision
    pub fn authorize(&self, context: Option<&RequestContext<'_>>) -> Result<Decision> {
        let required = self.evaluator.allowed_permissions();

        if self.evaluator.has_permission(context)? {
            tracing::debug!(required_permissions = ?required, "Permission granted");
            return Ok(Decision::Allowed);
        }

        tracing::warn!(
            required_permissions = ?required,
            authenticated = context.is_some_and(|c| c.is_authenticated()),
            "Permission denied"
        );
        Ok(Decision::Rejected(AuthorizationError::MissingPermission(
            required.to_vec(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use crate::types::ClaimsPrincipal;

    #[test]
    fn test_allowed_with_matching_permission() {
        let gate = PermissionsGate::new(PermissionsConfig::new(["orders.write"]));
        let principal = ClaimsPrincipal::anonymous().with_claim("permissions", "orders.read,orders.write");

        let decision = gate.authorize(Some(&RequestContext::new(&principal))).unwrap();
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_rejected_names_required_permissions() {
        let gate = PermissionsGate::new(
            PermissionsConfig::new(["perm-a", "perm-b"]).with_allow_scopes(false),
        );
        let principal = ClaimsPrincipal::anonymous().with_claim("permissions", "perm-c");

        let decision = gate.authorize(Some(&RequestContext::new(&principal))).unwrap();
        match decision {
            Decision::Rejected(err) => {
                assert_eq!(
                    err.to_string(),
                    "You do not have one of the required permissions perm-a,perm-b."
                );
            }
            Decision::Allowed => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_unauthenticated_request_is_rejected() {
        let gate = PermissionsGate::new(PermissionsConfig::new(["read"]));
        let decision = gate.authorize(Some(&RequestContext::anonymous())).unwrap();
        assert!(!decision.is_allowed());
    }

    #[test]
    fn test_missing_context_propagates() {
        let gate = PermissionsGate::new(PermissionsConfig::new(["read"]));
        assert!(matches!(gate.authorize(None), Err(GateError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_allow_list_rejects() {
        let gate = PermissionsGate::new(PermissionsConfig::new(Vec::<String>::new()));
        let principal = ClaimsPrincipal::anonymous().with_claim("permissions", "anything");

        let decision = gate.authorize(Some(&RequestContext::new(&principal))).unwrap();
        assert_eq!(decision, Decision::Rejected(AuthorizationError::MissingPermission(Vec::new())));
    }
}
