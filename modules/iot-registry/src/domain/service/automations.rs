use authz_resolver_sdk::pep::ResourceType;
use modkit_security::{SecurityContext, Specification, TenantId};
use tracing::{debug, instrument};

use super::{CatalogResource, ScopedReader, actions, conjoin, resources};
use crate::domain::catalog::AutomationLeaf;
use crate::domain::error::DomainError;
use crate::domain::ids::{ActorId, AutomationId, ZoneId};
use crate::domain::models::{Automation, AutomationState};
use crate::infra::cache::AutomationKeys;

pub struct AutomationResource;

impl CatalogResource for AutomationResource {
    type Id = AutomationId;
    type Record = Automation;
    type Leaf = AutomationLeaf;
    type Keys = AutomationKeys;

    const RESOURCE: ResourceType = resources::AUTOMATION;

    fn tenant_leaf(tenant: TenantId) -> AutomationLeaf {
        AutomationLeaf::BelongsToTenant(tenant)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomationQuery {
    pub state: Option<AutomationState>,
    pub created_by: Option<ActorId>,
    pub zone: Option<ZoneId>,
}

impl AutomationQuery {
    #[must_use]
    pub fn to_specification(&self) -> Option<Specification<AutomationLeaf>> {
        let mut leaves = Vec::new();
        if let Some(state) = self.state {
            leaves.push(AutomationLeaf::HasState(state));
        }
        if let Some(actor) = &self.created_by {
            leaves.push(AutomationLeaf::CreatedBy(actor.clone()));
        }
        if let Some(zone) = &self.zone {
            leaves.push(AutomationLeaf::TargetsZone(zone.clone()));
        }
        conjoin(leaves)
    }
}

pub struct AutomationsService {
    reader: ScopedReader<AutomationResource>,
}

impl AutomationsService {
    #[must_use]
    pub fn new(reader: ScopedReader<AutomationResource>) -> Self {
        Self { reader }
    }

    /// # Errors
    ///
    /// As [`ScopedReader::read`].
    #[instrument(skip(self, ctx, query), fields(tenant = %tenant))]
    pub async fn list_automations(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        query: &AutomationQuery,
    ) -> Result<Vec<Automation>, DomainError> {
        debug!("Listing automations");

        let automations = self
            .reader
            .read(ctx, tenant, actions::LIST, query.to_specification())
            .await?;

        debug!("Successfully listed {} automations", automations.len());
        Ok(automations)
    }

    /// # Errors
    ///
    /// [`DomainError::NotFound`] unless the record exists in `tenant` and is
    /// readable; otherwise as [`ScopedReader::read`].
    #[instrument(skip(self, ctx), fields(tenant = %tenant, automation_id = %id))]
    pub async fn get_automation(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        id: &AutomationId,
    ) -> Result<Automation, DomainError> {
        debug!("Getting automation by id");
        self.reader.read_one(ctx, tenant, id).await
    }
}
