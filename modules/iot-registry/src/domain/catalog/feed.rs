use modkit_security::{IdFilter, InvalidPredicateArgument, LeafPredicate, ResourceId, TenantId};

use crate::domain::ids::{DeviceId, FeedId};
use crate::domain::models::{Feed, FeedState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLeaf {
    BelongsToTenant(TenantId),
    OfDevice(DeviceId),
    HasState(FeedState),
    Id(IdFilter<FeedId>),
}

impl FeedLeaf {
    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `tenant` is not a valid tenant id.
    pub fn belongs_to_tenant(tenant: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::BelongsToTenant(TenantId::parse_raw(tenant)?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `device` is not a valid device id.
    pub fn of_device(device: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::OfDevice(DeviceId::parse_raw(device)?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] for an unknown state.
    pub fn has_state(state: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::HasState(state.parse()?))
    }
}

impl From<IdFilter<FeedId>> for FeedLeaf {
    fn from(filter: IdFilter<FeedId>) -> Self {
        Self::Id(filter)
    }
}

impl LeafPredicate for FeedLeaf {
    type Candidate = Feed;

    fn is_satisfied_by(&self, feed: &Feed) -> bool {
        match self {
            Self::BelongsToTenant(tenant) => feed.tenant_id == *tenant,
            Self::OfDevice(device) => feed.device_id == *device,
            Self::HasState(state) => feed.state == *state,
            Self::Id(filter) => filter.admits(&feed.id),
        }
    }
}
