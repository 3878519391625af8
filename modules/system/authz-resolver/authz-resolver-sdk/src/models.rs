//! Wire models for the `AuthZ` resolver module.
//!
//! Requests follow the `AuthZEN` shape (subject, action, resource, context).
//! Responses carry raw identifier strings; the PEP compiles them into a typed
//! [`AuthorizationDecision`](modkit_security::AuthorizationDecision).

use std::collections::HashMap;

use modkit_security::Selector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authorization decision request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// The subject (who is making the request).
    pub subject: Subject,
    /// The action being performed.
    pub action: Action,
    /// The resource type being accessed.
    pub resource: Resource,
    /// Tenant and token context.
    pub context: Context,
}

/// The authenticated subject making the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject identifier.
    pub id: Uuid,
    /// Subject type (e.g., "user", "service").
    pub subject_type: Option<String>,
    /// Additional subject properties for policy evaluation.
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action name (e.g., "list", "read").
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource type identifier (e.g., "`iot.zone`").
    pub resource_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Tenant being operated on.
    pub tenant_id: String,
    /// Token scopes from the `AuthN` result.
    #[serde(default)]
    pub token_scopes: Vec<String>,
    /// Additional context properties for policy evaluation.
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

/// Authorization decision response.
///
/// `tenant_id`, `resource_type` and `action` echo the request so the PEP can
/// reject a response meant for another query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub tenant_id: String,
    pub resource_type: String,
    pub action: String,
    pub selector: Selector,
    /// Ignored under [`Selector::Unrestricted`].
    #[serde(default)]
    pub allowed_ids: Vec<String>,
    /// Always enforced.
    #[serde(default)]
    pub denied_ids: Vec<String>,
}

impl DecisionResponse {
    /// Response echoing `request` with the given identifier sets.
    #[must_use]
    pub fn for_request(
        request: &DecisionRequest,
        selector: Selector,
        allowed_ids: Vec<String>,
        denied_ids: Vec<String>,
    ) -> Self {
        Self {
            tenant_id: request.context.tenant_id.clone(),
            resource_type: request.resource.resource_type.clone(),
            action: request.action.name.clone(),
            selector,
            allowed_ids,
            denied_ids,
        }
    }
}
