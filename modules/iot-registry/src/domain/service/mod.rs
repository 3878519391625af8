//! Domain service layer.
//!
//! ## Architecture
//!
//! One service per resource type, each a thin wrapper around a
//! [`ScopedReader`] bound to that resource's [`CatalogResource`]:
//! - `devices`, `zones`, `feeds`, `automations`, `actors`
//!
//! ## Security
//!
//! Every read follows the same PEP flow:
//! 1. obtain an authorization decision for `(tenant, resource type, action)`
//! 2. encode it as an id predicate (`P_auth`)
//! 3. build the domain predicate: tenant scoping plus caller filters (`P_domain`)
//! 4. `P = P_auth AND P_domain`
//! 5. look `key(P)` up in the query cache
//! 6. on a miss, translate `P` and execute it against storage
//! 7. store the result under `key(P)` with a bounded TTL
//!
//! A missing decision aborts at step 1: nothing is keyed, read or executed.
//!
//! ## Collaborators
//!
//! The decision source, the cache and the repositories are passed in
//! explicitly; the predicate, translation and key steps are pure.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use authz_resolver_sdk::AuthZResolverGatewayClient;
use authz_resolver_sdk::pep::{PolicyEnforcer, ResourceType};
use modkit_db::cache::{CacheKeyGenerator, QueryCache};
use modkit_security::{
    IdFilter, LeafPredicate, ResourceId, SecurityContext, Specification, TenantId,
};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::humantime_serde;
use crate::domain::catalog::only;
use crate::domain::error::DomainError;
use crate::domain::repos::ResourceRepository;
use crate::infra::storage::{
    ActorRepository, AutomationRepository, DeviceRepository, FeedRepository, ZoneRepository,
};

mod actors;
mod automations;
mod devices;
mod feeds;
mod zones;

pub use actors::{ActorQuery, ActorResource, ActorsService};
pub use automations::{AutomationQuery, AutomationResource, AutomationsService};
pub use devices::{DeviceQuery, DeviceResource, DevicesService};
pub use feeds::{FeedQuery, FeedResource, FeedsService};
pub use zones::{ZoneQuery, ZoneResource, ZonesService};

pub mod resources {
    use authz_resolver_sdk::pep::ResourceType;

    pub const DEVICE: ResourceType = ResourceType { name: "iot.device" };
    pub const ZONE: ResourceType = ResourceType { name: "iot.zone" };
    pub const FEED: ResourceType = ResourceType { name: "iot.feed" };
    pub const AUTOMATION: ResourceType = ResourceType {
        name: "iot.automation",
    };
    pub const ACTOR: ResourceType = ResourceType { name: "iot.actor" };
}

pub mod actions {
    pub const LIST: &str = "list";
    pub const READ: &str = "read";
}

/// Configuration for the domain service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Upper bound on one authorization decision call.
    #[serde(with = "humantime_serde")]
    pub decision_timeout: Duration,
    /// Lifetime of a cached query result.
    #[serde(with = "humantime_serde")]
    pub cache_ttl: Duration,
    #[serde(with = "humantime_serde")]
    pub cache_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub storage_timeout: Duration,
    /// Prepended to every cache key, so registries sharing a cache stay apart.
    pub cache_key_prefix: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            decision_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(30),
            cache_timeout: Duration::from_millis(250),
            storage_timeout: Duration::from_secs(5),
            cache_key_prefix: "iot-registry:".to_owned(),
        }
    }
}

/// Binds a resource type to its id, record, leaf catalog and key generator.
pub trait CatalogResource: Send + Sync + 'static {
    type Id: ResourceId;
    type Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Leaf: LeafPredicate<Candidate = Self::Record>
        + From<IdFilter<Self::Id>>
        + Clone
        + fmt::Debug
        + Send
        + Sync
        + 'static;
    type Keys: CacheKeyGenerator<Leaf = Self::Leaf>;

    const RESOURCE: ResourceType;

    fn tenant_leaf(tenant: TenantId) -> Self::Leaf;
}

/// Authorization-scoped, cached reads of one resource type.
pub struct ScopedReader<R: CatalogResource> {
    repo: Arc<dyn ResourceRepository<R>>,
    cache: Arc<dyn QueryCache>,
    enforcer: PolicyEnforcer,
    config: ServiceConfig,
}

impl<R: CatalogResource> ScopedReader<R> {
    #[must_use]
    pub fn new(
        repo: Arc<dyn ResourceRepository<R>>,
        cache: Arc<dyn QueryCache>,
        enforcer: PolicyEnforcer,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            cache,
            enforcer,
            config,
        }
    }

    /// Records of `tenant` that the caller may `action` and that match
    /// `filters`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::AuthorizationUnavailable`] if no decision was obtained
    /// - cache and storage failures or timeouts
    #[instrument(skip(self, ctx, filters), fields(resource = R::RESOURCE.name, tenant = %tenant))]
    pub async fn read(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        action: &str,
        filters: Option<Specification<R::Leaf>>,
    ) -> Result<Vec<R::Record>, DomainError> {
        let authorized = self
            .enforcer
            .authorized_specification::<R::Id, R::Leaf>(ctx, &R::RESOURCE, action, tenant)
            .await?;

        let mut scoped = Specification::leaf(R::tenant_leaf(tenant.clone()));
        if let Some(filters) = filters {
            scoped = scoped.and(filters);
        }
        let spec = authorized.and(scoped);

        let key = self.cache_key(&spec);
        if let Some(records) = self.cached(&key).await? {
            debug!(cache_key = %key, count = records.len(), "cache hit");
            return Ok(records);
        }
        debug!(cache_key = %key, "cache miss");

        let records = tokio::time::timeout(self.config.storage_timeout, self.repo.find(&spec))
            .await
            .map_err(|_| DomainError::StorageTimeout(self.config.storage_timeout))??;

        self.store(&key, &records).await?;
        Ok(records)
    }

    /// One record by id, under the `read` action.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] if the record does not exist, belongs to
    /// another tenant or is not authorized; otherwise as [`read`](Self::read).
    pub async fn read_one(
        &self,
        ctx: &SecurityContext,
        tenant: &TenantId,
        id: &R::Id,
    ) -> Result<R::Record, DomainError> {
        let by_id = Specification::leaf(R::Leaf::from(only(id.clone())));
        self.read(ctx, tenant, actions::READ, Some(by_id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found(R::RESOURCE.name, id.as_str()))
    }

    /// Full cache key for `spec`, including the configured prefix.
    #[must_use]
    pub fn cache_key(&self, spec: &Specification<R::Leaf>) -> String {
        format!("{}{}", self.config.cache_key_prefix, R::Keys::key(spec))
    }

    async fn cached(&self, key: &str) -> Result<Option<Vec<R::Record>>, DomainError> {
        let timeout = self.config.cache_timeout;
        let Some(bytes) = tokio::time::timeout(timeout, self.cache.get(key))
            .await
            .map_err(|_| DomainError::CacheTimeout(timeout))??
        else {
            return Ok(None);
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(Some(records)),
            Err(e) => {
                warn!(cache_key = %key, error = %e, "discarding undecodable cached value");
                Ok(None)
            }
        }
    }

    async fn store(&self, key: &str, records: &[R::Record]) -> Result<(), DomainError> {
        let bytes = match serde_json::to_vec(records) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "query result not cacheable");
                return Ok(());
            }
        };

        let timeout = self.config.cache_timeout;
        tokio::time::timeout(timeout, self.cache.set(key, bytes, self.config.cache_ttl))
            .await
            .map_err(|_| DomainError::CacheTimeout(timeout))??;
        Ok(())
    }
}

/// Conjunction of `leaves`, or `None` when there are none.
fn conjoin<L>(leaves: Vec<L>) -> Option<Specification<L>> {
    // `all_of` only rejects an empty input.
    Specification::all_of(leaves.into_iter().map(Specification::leaf)).ok()
}

// DI Container - aggregates all domain services
pub struct AppServices {
    pub devices: DevicesService,
    pub zones: ZonesService,
    pub feeds: FeedsService,
    pub automations: AutomationsService,
    pub actors: ActorsService,
}

impl AppServices {
    #[must_use]
    pub fn new(
        db: &DatabaseConnection,
        authz: Arc<dyn AuthZResolverGatewayClient>,
        cache: &Arc<dyn QueryCache>,
        config: &ServiceConfig,
    ) -> Self {
        let enforcer = PolicyEnforcer::new(authz).with_timeout(config.decision_timeout);

        Self {
            devices: DevicesService::new(reader::<DeviceResource>(
                Arc::new(DeviceRepository::new(db.clone())),
                cache,
                &enforcer,
                config,
            )),
            zones: ZonesService::new(reader::<ZoneResource>(
                Arc::new(ZoneRepository::new(db.clone())),
                cache,
                &enforcer,
                config,
            )),
            feeds: FeedsService::new(reader::<FeedResource>(
                Arc::new(FeedRepository::new(db.clone())),
                cache,
                &enforcer,
                config,
            )),
            automations: AutomationsService::new(reader::<AutomationResource>(
                Arc::new(AutomationRepository::new(db.clone())),
                cache,
                &enforcer,
                config,
            )),
            actors: ActorsService::new(reader::<ActorResource>(
                Arc::new(ActorRepository::new(db.clone())),
                cache,
                &enforcer,
                config,
            )),
        }
    }
}

fn reader<R: CatalogResource>(
    repo: Arc<dyn ResourceRepository<R>>,
    cache: &Arc<dyn QueryCache>,
    enforcer: &PolicyEnforcer,
    config: &ServiceConfig,
) -> ScopedReader<R> {
    ScopedReader::new(repo, Arc::clone(cache), enforcer.clone(), config.clone())
}
