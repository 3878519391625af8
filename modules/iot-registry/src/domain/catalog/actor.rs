use modkit_security::{IdFilter, InvalidPredicateArgument, LeafPredicate, ResourceId, TenantId};

use crate::domain::ids::ActorId;
use crate::domain::models::{Actor, ActorKind, ActorState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorLeaf {
    BelongsToTenant(TenantId),
    OfKind(ActorKind),
    HasState(ActorState),
    Id(IdFilter<ActorId>),
}

impl ActorLeaf {
    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `tenant` is not a valid tenant id.
    pub fn belongs_to_tenant(tenant: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::BelongsToTenant(TenantId::parse_raw(tenant)?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] for an unknown kind.
    pub fn of_kind(kind: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::OfKind(kind.parse()?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] for an unknown state.
    pub fn has_state(state: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::HasState(state.parse()?))
    }
}

impl From<IdFilter<ActorId>> for ActorLeaf {
    fn from(filter: IdFilter<ActorId>) -> Self {
        Self::Id(filter)
    }
}

impl LeafPredicate for ActorLeaf {
    type Candidate = Actor;

    fn is_satisfied_by(&self, actor: &Actor) -> bool {
        match self {
            Self::BelongsToTenant(tenant) => actor.tenant_id == *tenant,
            Self::OfKind(kind) => actor.kind == *kind,
            Self::HasState(state) => actor.state == *state,
            Self::Id(filter) => filter.admits(&actor.id),
        }
    }
}
