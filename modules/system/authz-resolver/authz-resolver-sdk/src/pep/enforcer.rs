//! Policy Enforcement Point (`PEP`) object.
//!
//! [`PolicyEnforcer`] encapsulates the full PEP flow:
//! build decision request → call the decision source (bounded by a timeout)
//! → compile the response → build the authorized specification.
//!
//! Constructed once during service initialisation with the `AuthZ` client.
//! The resource type is supplied per call via a [`ResourceType`] descriptor,
//! so a single enforcer can serve all resource types in a service.

use std::sync::Arc;
use std::time::Duration;

use modkit_security::{
    AuthorizationDecision, IdFilter, ResourceId, SecurityContext, Specification, TenantId,
};
use tracing::{debug, error, instrument};

use crate::api::AuthZResolverGatewayClient;
use crate::error::AuthZResolverError;
use crate::models::DecisionRequest;
use crate::pep::builder::build_authorized_specification;
use crate::pep::compiler::{DecisionCompileError, compile_decision};
use crate::pep::request_builder::build_decision_request;

/// Upper bound on a single decision call unless overridden.
pub const DEFAULT_DECISION_TIMEOUT: Duration = Duration::from_secs(2);

/// Error from the PEP enforcement flow.
///
/// Every variant means "no decision": callers must reject the request and
/// never fall back to an unrestricted predicate.
#[derive(Debug, thiserror::Error)]
pub enum EnforcerError {
    /// The decision call failed.
    #[error("authorization evaluation failed: {0}")]
    EvaluationFailed(#[from] AuthZResolverError),

    /// The decision call did not finish in time.
    #[error("authorization evaluation timed out after {0:?}")]
    TimedOut(Duration),

    /// The response could not be compiled.
    #[error("decision compilation failed: {0}")]
    CompileFailed(#[from] DecisionCompileError),
}

/// Static descriptor for a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceType {
    /// Dotted resource type name (e.g. `"iot.zone"`).
    pub name: &'static str,
}

/// Policy Enforcement Point.
///
/// Cloneable and cheap to pass around (`Arc` inside).
///
/// # Example
///
/// ```ignore
/// use authz_resolver_sdk::pep::{PolicyEnforcer, ResourceType};
///
/// const ZONE: ResourceType = ResourceType { name: "iot.zone" };
///
/// let enforcer = PolicyEnforcer::new(authz.clone());
/// let decision = enforcer.decision::<ZoneId>(&ctx, &ZONE, "list", &tenant).await?;
/// ```
#[derive(Clone)]
pub struct PolicyEnforcer {
    authz: Arc<dyn AuthZResolverGatewayClient>,
    timeout: Duration,
}

impl PolicyEnforcer {
    /// Create a new enforcer with [`DEFAULT_DECISION_TIMEOUT`].
    #[must_use]
    pub fn new(authz: Arc<dyn AuthZResolverGatewayClient>) -> Self {
        Self {
            authz,
            timeout: DEFAULT_DECISION_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn build_request(
        &self,
        ctx: &SecurityContext,
        resource: &ResourceType,
        action: &str,
        tenant: &TenantId,
    ) -> DecisionRequest {
        build_decision_request(ctx, resource.name, action, tenant)
    }

    /// Obtain and compile the decision for one `(tenant, resource, action)`.
    ///
    /// # Errors
    ///
    /// - [`EnforcerError::EvaluationFailed`] if the decision call fails
    /// - [`EnforcerError::TimedOut`] if it exceeds the configured timeout
    /// - [`EnforcerError::CompileFailed`] if the response is unusable
    #[instrument(skip(self, ctx), fields(resource = resource.name, tenant = %tenant))]
    pub async fn decision<Id: ResourceId>(
        &self,
        ctx: &SecurityContext,
        resource: &ResourceType,
        action: &str,
        tenant: &TenantId,
    ) -> Result<AuthorizationDecision<Id>, EnforcerError> {
        let request = self.build_request(ctx, resource, action, tenant);

        let call = self.authz.evaluate(request.clone());
        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!(error = %e, "authorization decision call failed");
                return Err(e.into());
            }
            Err(_) => {
                error!(timeout = ?self.timeout, "authorization decision call timed out");
                return Err(EnforcerError::TimedOut(self.timeout));
            }
        };

        let decision = compile_decision::<Id>(&request, response).map_err(|e| {
            error!(error = %e, "authorization decision rejected");
            e
        })?;
        debug!(
            selector = ?decision.selector(),
            allowed = decision.allowed_ids().len(),
            denied = decision.denied_ids().len(),
            "authorization decision compiled"
        );
        Ok(decision)
    }

    /// Full PEP flow: the decision encoded as an id predicate in catalog `L`.
    ///
    /// # Errors
    ///
    /// Same as [`decision`](Self::decision).
    pub async fn authorized_specification<Id, L>(
        &self,
        ctx: &SecurityContext,
        resource: &ResourceType,
        action: &str,
        tenant: &TenantId,
    ) -> Result<Specification<L>, EnforcerError>
    where
        Id: ResourceId,
        L: From<IdFilter<Id>>,
    {
        let decision = self.decision::<Id>(ctx, resource, action, tenant).await?;
        Ok(build_authorized_specification(decision))
    }
}

impl std::fmt::Debug for PolicyEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEnforcer")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
