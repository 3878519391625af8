//! PEP request builder.

use std::collections::HashMap;

use modkit_security::{ResourceId, SecurityContext, TenantId};

use crate::models::{Action, Context, DecisionRequest, Resource, Subject};

/// Build a decision request from the security context and action metadata.
///
/// The subject's home tenant, when known, is passed as the `tenant_id`
/// subject property; the tenant being operated on goes into the context.
#[must_use]
pub fn build_decision_request(
    ctx: &SecurityContext,
    resource_type: &str,
    action_name: &str,
    tenant: &TenantId,
) -> DecisionRequest {
    let mut subject_properties = HashMap::new();
    if let Some(tid) = ctx.subject_tenant_id() {
        subject_properties.insert(
            "tenant_id".to_owned(),
            serde_json::Value::String(tid.as_str().to_owned()),
        );
    }

    DecisionRequest {
        subject: Subject {
            id: ctx.subject_id(),
            subject_type: ctx.subject_type().map(ToOwned::to_owned),
            properties: subject_properties,
        },
        action: Action {
            name: action_name.to_owned(),
        },
        resource: Resource {
            resource_type: resource_type.to_owned(),
        },
        context: Context {
            tenant_id: tenant.as_str().to_owned(),
            token_scopes: ctx.token_scopes().to_vec(),
            properties: HashMap::new(),
        },
    }
}
