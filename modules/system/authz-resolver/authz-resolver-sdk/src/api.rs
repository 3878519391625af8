//! Public API trait for the `AuthZ` resolver gateway.

use async_trait::async_trait;

use crate::error::AuthZResolverError;
use crate::models::{DecisionRequest, DecisionResponse};

/// Authorization decision source.
///
/// Consumed by modules acting as PEPs, usually through
/// [`PolicyEnforcer`](crate::pep::PolicyEnforcer):
///
/// ```ignore
/// let response = authz.evaluate(request).await?;
/// ```
#[async_trait]
pub trait AuthZResolverGatewayClient: Send + Sync {
    /// Evaluate a decision request.
    ///
    /// Returns the allow/deny identifier sets for the requested tenant,
    /// resource type and action.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the decision point cannot be reached
    /// - `Internal` for unexpected errors
    async fn evaluate(&self, request: DecisionRequest)
    -> Result<DecisionResponse, AuthZResolverError>;
}
