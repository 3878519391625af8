use modkit_security::{IdFilter, InvalidPredicateArgument, LeafPredicate, ResourceId, TenantId};

use crate::domain::ids::{ActorId, AutomationId, ZoneId};
use crate::domain::models::{Automation, AutomationState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationLeaf {
    BelongsToTenant(TenantId),
    HasState(AutomationState),
    CreatedBy(ActorId),
    TargetsZone(ZoneId),
    Id(IdFilter<AutomationId>),
}

impl AutomationLeaf {
    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `tenant` is not a valid tenant id.
    pub fn belongs_to_tenant(tenant: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::BelongsToTenant(TenantId::parse_raw(tenant)?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] for an unknown state.
    pub fn has_state(state: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::HasState(state.parse()?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `actor` is not a valid actor id.
    pub fn created_by(actor: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::CreatedBy(ActorId::parse_raw(actor)?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `zone` is not a valid zone id.
    pub fn targets_zone(zone: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::TargetsZone(ZoneId::parse_raw(zone)?))
    }
}

impl From<IdFilter<AutomationId>> for AutomationLeaf {
    fn from(filter: IdFilter<AutomationId>) -> Self {
        Self::Id(filter)
    }
}

impl LeafPredicate for AutomationLeaf {
    type Candidate = Automation;

    fn is_satisfied_by(&self, automation: &Automation) -> bool {
        match self {
            Self::BelongsToTenant(tenant) => automation.tenant_id == *tenant,
            Self::HasState(state) => automation.state == *state,
            Self::CreatedBy(actor) => automation.created_by == *actor,
            Self::TargetsZone(zone) => automation.zone_id == *zone,
            Self::Id(filter) => filter.admits(&automation.id),
        }
    }
}
