use authz_resolver_sdk::pep::ResourceType;
use modkit_security::{SecurityContext, Specification, TenantId};
use tracing::{debug, instrument};

use super::{CatalogResource, ScopedReader, actions, conjoin, resources};
use crate::domain::catalog::DeviceLeaf;
use crate::domain::error::DomainError;
use crate::domain::ids::{ActorId, DeviceId, ZoneId};
use crate::domain::models::{Device, DeviceState};
use crate::infra::cache::DeviceKeys;

pub struct DeviceResource;

impl CatalogResource for DeviceResource {
    type Id = DeviceId;
    type Record = Device;
    type Leaf = DeviceLeaf;
    type Keys = DeviceKeys;

    const RESOURCE: ResourceType = resources::DEVICE;

    fn tenant_leaf(tenant: TenantId) -> DeviceLeaf {
        DeviceLeaf::BelongsToTenant(tenant)
    }
}

/// Optional device filters; set fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceQuery {
    pub state: Option<DeviceState>,
    pub registered_by: Option<ActorId>,
    pub zone: Option<ZoneId>,
}

impl DeviceQuery {
    #[must_use]
    pub fn to_specification(&self) -> Option<Specification<DeviceLeaf>> {
        let mut leaves = Vec::new();
        if let Some(state) = self.state {
            leaves.push(DeviceLeaf::HasState(state));
        }
        if let Some(actor) = &self.registered_by {
            leaves.push(DeviceLeaf::RegisteredBy(actor.clone()));
        }
        if let Some(zone) = &self.zone {
            leaves.push(DeviceLeaf::InZone(zone.clone()));
        }
        conjoin(leaves)
    }
}

pub struct DevicesService {
    reader: ScopedReader<DeviceResource>,
}

impl DevicesService {
    #[must_use]
    pub fn new(reader: ScopedReader<DeviceResource>) -> Self {
        Self { reader }
    }

    /// # Errors
    ///
    /// As [`ScopedReader::read`].
    #[instrument(skip(self, ctx, query), fields(tenant = %tenant))]
    pub async fn list_devices(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        query: &DeviceQuery,
    ) -> Result<Vec<Device>, DomainError> {
        debug!("Listing devices");

        let devices = self
            .reader
            .read(ctx, tenant, actions::LIST, query.to_specification())
            .await?;

        debug!("Successfully listed {} devices", devices.len());
        Ok(devices)
    }

    /// # Errors
    ///
    /// [`DomainError::NotFound`] unless the record exists in `tenant` and is
    /// readable; otherwise as [`ScopedReader::read`].
    #[instrument(skip(self, ctx), fields(tenant = %tenant, device_id = %id))]
    pub async fn get_device(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        id: &DeviceId,
    ) -> Result<Device, DomainError> {
        debug!("Getting device by id");
        self.reader.read_one(ctx, tenant, id).await
    }
}
