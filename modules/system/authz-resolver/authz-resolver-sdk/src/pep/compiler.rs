//! PEP decision compiler.
//!
//! Turns a raw [`DecisionResponse`] into a typed [`AuthorizationDecision`].
//! A response that does not echo its request, or that names an identifier
//! the resource's id type cannot parse, is rejected as a whole.

use modkit_security::{AuthorizationDecision, InvalidPredicateArgument, ResourceId, TenantId};

use crate::models::{DecisionRequest, DecisionResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionCompileError {
    /// The response answers a different tenant, resource type or action.
    #[error("decision `{field}` mismatch: requested `{expected}`, got `{actual}`")]
    ScopeMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// A raw identifier in the response did not parse.
    #[error("malformed identifier in decision: {0}")]
    MalformedIdentifier(#[from] InvalidPredicateArgument),
}

/// Compile a decision response for `request` into a typed decision.
///
/// # Errors
///
/// - `ScopeMismatch` if the response does not echo the request
/// - `MalformedIdentifier` if the tenant or any allowed/denied id fails to parse
pub fn compile_decision<Id: ResourceId>(
    request: &DecisionRequest,
    response: DecisionResponse,
) -> Result<AuthorizationDecision<Id>, DecisionCompileError> {
    ensure_echo("tenant_id", &request.context.tenant_id, &response.tenant_id)?;
    ensure_echo(
        "resource_type",
        &request.resource.resource_type,
        &response.resource_type,
    )?;
    ensure_echo("action", &request.action.name, &response.action)?;

    let tenant = TenantId::parse_raw(&response.tenant_id)?;
    let allowed = parse_all::<Id>(&response.allowed_ids)?;
    let denied = parse_all::<Id>(&response.denied_ids)?;

    Ok(AuthorizationDecision::new(
        tenant,
        response.resource_type,
        response.action,
        response.selector,
        allowed,
        denied,
    ))
}

fn ensure_echo(
    field: &'static str,
    expected: &str,
    actual: &str,
) -> Result<(), DecisionCompileError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DecisionCompileError::ScopeMismatch {
            field,
            expected: expected.to_owned(),
            actual: actual.to_owned(),
        })
    }
}

fn parse_all<Id: ResourceId>(raw: &[String]) -> Result<Vec<Id>, InvalidPredicateArgument> {
    raw.iter().map(|r| Id::parse_raw(r)).collect()
}
