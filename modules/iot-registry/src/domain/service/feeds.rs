use authz_resolver_sdk::pep::ResourceType;
use modkit_security::{SecurityContext, Specification, TenantId};
use tracing::{debug, instrument};

use super::{CatalogResource, ScopedReader, actions, conjoin, resources};
use crate::domain::catalog::FeedLeaf;
use crate::domain::error::DomainError;
use crate::domain::ids::{DeviceId, FeedId};
use crate::domain::models::{Feed, FeedState};
use crate::infra::cache::FeedKeys;

pub struct FeedResource;

impl CatalogResource for FeedResource {
    type Id = FeedId;
    type Record = Feed;
    type Leaf = FeedLeaf;
    type Keys = FeedKeys;

    const RESOURCE: ResourceType = resources::FEED;

    fn tenant_leaf(tenant: TenantId) -> FeedLeaf {
        FeedLeaf::BelongsToTenant(tenant)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub device: Option<DeviceId>,
    pub state: Option<FeedState>,
}

impl FeedQuery {
    #[must_use]
    pub fn to_specification(&self) -> Option<Specification<FeedLeaf>> {
        let mut leaves = Vec::new();
        if let Some(device) = &self.device {
            leaves.push(FeedLeaf::OfDevice(device.clone()));
        }
        if let Some(state) = self.state {
            leaves.push(FeedLeaf::HasState(state));
        }
        conjoin(leaves)
    }
}

pub struct FeedsService {
    reader: ScopedReader<FeedResource>,
}

impl FeedsService {
    #[must_use]
    pub fn new(reader: ScopedReader<FeedResource>) -> Self {
        Self { reader }
    }

    /// # Errors
    ///
    /// As [`ScopedReader::read`].
    #[instrument(skip(self, ctx, query), fields(tenant = %tenant))]
    pub async fn list_feeds(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        query: &FeedQuery,
    ) -> Result<Vec<Feed>, DomainError> {
        debug!("Listing feeds");

        let feeds = self
            .reader
            .read(ctx, tenant, actions::LIST, query.to_specification())
            .await?;

        debug!("Successfully listed {} feeds", feeds.len());
        Ok(feeds)
    }

    /// Feeds the caller may `read`, rather than `list`.
    ///
    /// Used when the caller needs feed contents, which some policies grant
    /// for a narrower set of feeds than listing.
    ///
    /// # Errors
    ///
    /// As [`ScopedReader::read`].
    #[instrument(skip(self, ctx, query), fields(tenant = %tenant))]
    pub async fn readable_feeds(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        query: &FeedQuery,
    ) -> Result<Vec<Feed>, DomainError> {
        self.reader
            .read(ctx, tenant, actions::READ, query.to_specification())
            .await
    }

    /// # Errors
    ///
    /// [`DomainError::NotFound`] unless the record exists in `tenant` and is
    /// readable; otherwise as [`ScopedReader::read`].
    #[instrument(skip(self, ctx), fields(tenant = %tenant, feed_id = %id))]
    pub async fn get_feed(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        id: &FeedId,
    ) -> Result<Feed, DomainError> {
        debug!("Getting feed by id");
        self.reader.read_one(ctx, tenant, id).await
    }
}
