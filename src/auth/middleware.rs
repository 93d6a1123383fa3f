use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tower::Layer;
use tower::Service;

use super::gate::{Decision, PermissionsGate};
use crate::axum_integration::request_context;
use crate::config::PermissionsConfig;

/// Middleware layer that requires one of the configured permissions
///
/// Attach it to a single route or to a whole router. The permission check runs
/// before the wrapped handler; a denied request gets a 401 and the handler is
/// never called.
#[derive(Clone)]
pub struct RequirePermissions {
    gate: Arc<PermissionsGate>,
}

impl RequirePermissions {
    /// Create a new RequirePermissions middleware from a full endpoint configuration
    pub fn new(config: PermissionsConfig) -> Self {
        Self {
            gate: Arc::new(PermissionsGate::new(config)),
        }
    }

    /// Require at least one of `permissions`, every other setting at its default
    pub fn any_of<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self::new(PermissionsConfig::new(permissions))
    }

    pub fn gate(&self) -> &PermissionsGate {
        &self.gate
    }
}

impl<S> Layer<S> for RequirePermissions {
    type Service = RequirePermissionsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequirePermissionsMiddleware {
            inner,
            gate: self.gate.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RequirePermissionsMiddleware<S> {
    inner: S,
    gate: Arc<PermissionsGate>,
}

impl<S> Service<Request> for RequirePermissionsMiddleware<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // Evaluated up front: the context borrows the request extensions
        let decision = {
            let context = request_context(request.extensions());
            self.gate.authorize(Some(&context))
        };

        // Take the service that was driven to readiness, leave a clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match decision {
                Ok(Decision::Allowed) => inner.call(request).await,
                Ok(Decision::Rejected(rejection)) => Ok(rejection.into_response()),
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}
