//! Authorization decision model.
//!
//! An [`AuthorizationDecision`] is the per-request result of the external
//! policy decision point: for one tenant, resource type and action it says
//! which record identifiers pass the allow check and which are explicitly
//! denied. It is built fresh per request and consumed once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::identifier::{ResourceId, TenantId};

/// Well-known authorization property names.
///
/// Shared between the decision compiler and the storage condition builder
/// (`ScopableEntity::resolve_property()`), so property names have a single
/// source of truth.
pub mod properties {
    /// Tenant-ownership property. Typically maps to the `tenant_id` column.
    pub const OWNER_TENANT_ID: &str = "owner_tenant_id";

    /// Resource identity property. Typically maps to the primary key column.
    pub const RESOURCE_ID: &str = "id";
}

/// Whether the allow-set of a decision is enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Selector {
    /// Every identifier passes the allow check; `allowed_ids` is ignored.
    Unrestricted,
    /// Only identifiers in `allowed_ids` pass the allow check.
    Enumerated,
}

/// Identifier-membership condition shared by every leaf catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdFilter<Id> {
    /// `id IN (ids)`. An empty set matches nothing.
    In(BTreeSet<Id>),
    /// `id NOT IN (ids)`. An empty set matches everything.
    NotIn(BTreeSet<Id>),
}

impl<Id: Ord> IdFilter<Id> {
    /// Whether `id` passes this filter.
    #[must_use]
    pub fn admits(&self, id: &Id) -> bool {
        match self {
            Self::In(ids) => ids.contains(id),
            Self::NotIn(ids) => !ids.contains(id),
        }
    }

    /// The identifiers named by the filter.
    #[must_use]
    pub fn ids(&self) -> &BTreeSet<Id> {
        match self {
            Self::In(ids) | Self::NotIn(ids) => ids,
        }
    }
}

/// External policy decision for one `(tenant, resource type, action)`.
///
/// # Semantics
///
/// ```text
/// authorized(id) = (selector == Unrestricted || id ∈ allowed_ids) && id ∉ denied_ids
/// ```
///
/// An explicit deny always wins, even under an unrestricted grant. An
/// enumerated decision with an empty allow-set authorizes nothing and is not
/// an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationDecision<Id> {
    tenant_id: TenantId,
    resource_type: String,
    action: String,
    selector: Selector,
    allowed_ids: BTreeSet<Id>,
    denied_ids: BTreeSet<Id>,
}

impl<Id: ResourceId> AuthorizationDecision<Id> {
    /// Build a decision. Duplicate identifiers collapse.
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        resource_type: impl Into<String>,
        action: impl Into<String>,
        selector: Selector,
        allowed_ids: impl IntoIterator<Item = Id>,
        denied_ids: impl IntoIterator<Item = Id>,
    ) -> Self {
        Self {
            tenant_id,
            resource_type: resource_type.into(),
            action: action.into(),
            selector,
            allowed_ids: allowed_ids.into_iter().collect(),
            denied_ids: denied_ids.into_iter().collect(),
        }
    }

    /// Unrestricted grant with the given explicit denials.
    #[must_use]
    pub fn unrestricted(
        tenant_id: TenantId,
        resource_type: impl Into<String>,
        action: impl Into<String>,
        denied_ids: impl IntoIterator<Item = Id>,
    ) -> Self {
        Self::new(
            tenant_id,
            resource_type,
            action,
            Selector::Unrestricted,
            [],
            denied_ids,
        )
    }

    /// Enumerated grant.
    #[must_use]
    pub fn enumerated(
        tenant_id: TenantId,
        resource_type: impl Into<String>,
        action: impl Into<String>,
        allowed_ids: impl IntoIterator<Item = Id>,
        denied_ids: impl IntoIterator<Item = Id>,
    ) -> Self {
        Self::new(
            tenant_id,
            resource_type,
            action,
            Selector::Enumerated,
            allowed_ids,
            denied_ids,
        )
    }

    /// Reference evaluation of the decision for one identifier.
    #[must_use]
    pub fn permits(&self, id: &Id) -> bool {
        let allowed = match self.selector {
            Selector::Unrestricted => true,
            Selector::Enumerated => self.allowed_ids.contains(id),
        };
        allowed && !self.denied_ids.contains(id)
    }

    /// The identifiers that pass both checks, or `None` when unrestricted.
    #[must_use]
    pub fn effective_allowed(&self) -> Option<BTreeSet<Id>> {
        match self.selector {
            Selector::Unrestricted => None,
            Selector::Enumerated => Some(
                self.allowed_ids
                    .difference(&self.denied_ids)
                    .cloned()
                    .collect(),
            ),
        }
    }

    #[inline]
    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    #[inline]
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    #[inline]
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[inline]
    #[must_use]
    pub fn selector(&self) -> Selector {
        self.selector
    }

    #[inline]
    #[must_use]
    pub fn allowed_ids(&self) -> &BTreeSet<Id> {
        &self.allowed_ids
    }

    #[inline]
    #[must_use]
    pub fn denied_ids(&self) -> &BTreeSet<Id> {
        &self.denied_ids
    }

    /// Consume the decision, yielding `(selector, allowed_ids, denied_ids)`.
    #[must_use]
    pub fn into_parts(self) -> (Selector, BTreeSet<Id>, BTreeSet<Id>) {
        (self.selector, self.allowed_ids, self.denied_ids)
    }
}
