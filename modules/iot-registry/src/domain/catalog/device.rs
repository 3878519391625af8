use modkit_security::{IdFilter, InvalidPredicateArgument, LeafPredicate, ResourceId, TenantId};

use crate::domain::ids::{ActorId, DeviceId, ZoneId};
use crate::domain::models::{Device, DeviceState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceLeaf {
    BelongsToTenant(TenantId),
    HasState(DeviceState),
    RegisteredBy(ActorId),
    InZone(ZoneId),
    Id(IdFilter<DeviceId>),
}

impl DeviceLeaf {
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
    pub fn registered_by(actor: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::RegisteredBy(ActorId::parse_raw(actor)?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `zone` is not a valid zone id.
    pub fn in_zone(zone: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::InZone(ZoneId::parse_raw(zone)?))
    }
}

impl From<IdFilter<DeviceId>> for DeviceLeaf {
    fn from(filter: IdFilter<DeviceId>) -> Self {
        Self::Id(filter)
    }
}

impl LeafPredicate for DeviceLeaf {
    type Candidate = Device;

    fn is_satisfied_by(&self, device: &Device) -> bool {
        match self {
            Self::BelongsToTenant(tenant) => device.tenant_id == *tenant,
            Self::HasState(state) => device.state == *state,
            Self::RegisteredBy(actor) => device.registered_by == *actor,
            Self::InZone(zone) => device.zone_id.as_ref() == Some(zone),
            Self::Id(filter) => filter.admits(&device.id),
        }
    }
}
