//! Error types for the `AuthZ` resolver module.

/// Errors returned by an [`AuthZResolverGatewayClient`](crate::AuthZResolverGatewayClient).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthZResolverError {
    /// The decision point is not reachable or not ready.
    #[error("authorization service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Unexpected failure inside the decision point.
    #[error("internal authorization error: {0}")]
    Internal(String),
}
