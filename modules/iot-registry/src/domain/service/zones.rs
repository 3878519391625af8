use authz_resolver_sdk::pep::ResourceType;
use modkit_security::{SecurityContext, Specification, TenantId};
use tracing::{debug, instrument};

use super::{CatalogResource, ScopedReader, actions, conjoin, resources};
use crate::domain::catalog::ZoneLeaf;
use crate::domain::error::DomainError;
use crate::domain::ids::{PremisesId, ZoneId};
use crate::domain::models::{Zone, ZoneType};
use crate::infra::cache::ZoneKeys;

pub struct ZoneResource;

impl CatalogResource for ZoneResource {
    type Id = ZoneId;
    type Record = Zone;
    type Leaf = ZoneLeaf;
    type Keys = ZoneKeys;

    const RESOURCE: ResourceType = resources::ZONE;

    fn tenant_leaf(tenant: TenantId) -> ZoneLeaf {
        ZoneLeaf::BelongsToTenant(tenant)
    }
}

/// Optional zone filters; set fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneQuery {
    pub zone_type: Option<ZoneType>,
    pub premises: Option<PremisesId>,
}

impl ZoneQuery {
    #[must_use]
    pub fn to_specification(&self) -> Option<Specification<ZoneLeaf>> {
        let mut leaves = Vec::new();
        if let Some(zone_type) = &self.zone_type {
            leaves.push(ZoneLeaf::HasType(zone_type.clone()));
        }
        if let Some(premises) = &self.premises {
            leaves.push(ZoneLeaf::WithinPremises(premises.clone()));
        }
        conjoin(leaves)
    }
}

pub struct ZonesService {
    reader: ScopedReader<ZoneResource>,
}

impl ZonesService {
    #[must_use]
    pub fn new(reader: ScopedReader<ZoneResource>) -> Self {
        Self { reader }
    }

    /// # Errors
    ///
    /// As [`ScopedReader::read`].
    #[instrument(skip(self, ctx, query), fields(tenant = %tenant))]
    pub async fn list_zones(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        query: &ZoneQuery,
    ) -> Result<Vec<Zone>, DomainError> {
        debug!("Listing zones");

        let zones = self
            .reader
            .read(ctx, tenant, actions::LIST, query.to_specification())
            .await?;

        debug!("Successfully listed {} zones", zones.len());
        Ok(zones)
    }

    /// # Errors
    ///
    /// [`DomainError::NotFound`] unless the record exists in `tenant` and is
    /// readable; otherwise as [`ScopedReader::read`].
    #[instrument(skip(self, ctx), fields(tenant = %tenant, zone_id = %id))]
    pub async fn get_zone(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        id: &ZoneId,
    ) -> Result<Zone, DomainError> {
        debug!("Getting zone by id");
        self.reader.read_one(ctx, tenant, id).await
    }
}
