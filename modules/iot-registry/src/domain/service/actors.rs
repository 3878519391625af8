use authz_resolver_sdk::pep::ResourceType;
use modkit_security::{SecurityContext, Specification, TenantId};
use tracing::{debug, instrument};

use super::{CatalogResource, ScopedReader, actions, conjoin, resources};
use crate::domain::catalog::ActorLeaf;
use crate::domain::error::DomainError;
use crate::domain::ids::ActorId;
use crate::domain::models::{Actor, ActorKind, ActorState};
use crate::infra::cache::ActorKeys;

pub struct ActorResource;

impl CatalogResource for ActorResource {
    type Id = ActorId;
    type Record = Actor;
    type Leaf = ActorLeaf;
    type Keys = ActorKeys;

    const RESOURCE: ResourceType = resources::ACTOR;

    fn tenant_leaf(tenant: TenantId) -> ActorLeaf {
        ActorLeaf::BelongsToTenant(tenant)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorQuery {
    pub kind: Option<ActorKind>,
    pub state: Option<ActorState>,
}

impl ActorQuery {
    #[must_use]
    pub fn to_specification(&self) -> Option<Specification<ActorLeaf>> {
        let mut leaves = Vec::new();
        if let Some(kind) = self.kind {
            leaves.push(ActorLeaf::OfKind(kind));
        }
        if let Some(state) = self.state {
            leaves.push(ActorLeaf::HasState(state));
        }
        conjoin(leaves)
    }
}

pub struct ActorsService {
    reader: ScopedReader<ActorResource>,
}

impl ActorsService {
    #[must_use]
    pub fn new(reader: ScopedReader<ActorResource>) -> Self {
        Self { reader }
    }

    /// # Errors
    ///
    /// As [`ScopedReader::read`].
    #[instrument(skip(self, ctx, query), fields(tenant = %tenant))]
    pub async fn list_actors(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        query: &ActorQuery,
    ) -> Result<Vec<Actor>, DomainError> {
        debug!("Listing actors");

        let actors = self
            .reader
            .read(ctx, tenant, actions::LIST, query.to_specification())
            .await?;

        debug!("Successfully listed {} actors", actors.len());
        Ok(actors)
    }

    /// # Errors
    ///
    /// [`DomainError::NotFound`] unless the record exists in `tenant` and is
    /// readable; otherwise as [`ScopedReader::read`].
    #[instrument(skip(self, ctx), fields(tenant = %tenant, actor_id = %id))]
    pub async fn get_actor(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        id: &ActorId,
    ) -> Result<Actor, DomainError> {
        debug!("Getting actor by id");
        self.reader.read_one(ctx, tenant, id).await
    }
}
