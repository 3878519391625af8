//! Shared fixtures for the registry integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use authz_resolver_sdk::{
    AuthZResolverError, AuthZResolverGatewayClient, DecisionRequest, DecisionResponse,
};
use iot_registry::DomainError;
use iot_registry::domain::ids::{
    ActorId, AutomationId, DeviceId, FeedId, PremisesId, TenantId, ZoneId,
};
use iot_registry::domain::models::{
    Actor, ActorKind, ActorState, Automation, AutomationState, Device, DeviceState, Feed,
    FeedState, Zone,
};
use iot_registry::domain::repos::ResourceRepository;
use iot_registry::domain::service::CatalogResource;
use iot_registry::infra::storage::create_schema;
use iot_registry::infra::storage::entity::{actor, automation, device, feed, zone};
use modkit_db::cache::{CacheError, InMemoryQueryCache, QueryCache};
use modkit_db::{ConnectOpts, connect_db};
use modkit_security::{ResourceId, SecurityContext, Selector, Specification};
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use static_authz_plugin::{AuthzMode, Service, StaticAuthzPluginConfig, StaticRule};
use uuid::Uuid;

pub fn tenant(raw: &str) -> TenantId {
    TenantId::parse_raw(raw).unwrap()
}

pub fn ctx(tenant_id: &str) -> SecurityContext {
    SecurityContext::builder()
        .subject_id(Uuid::new_v4())
        .subject_tenant_id(tenant(tenant_id))
        .subject_type("user")
        .build()
}

/// Empty in-memory registry database.
pub async fn database() -> DatabaseConnection {
    let opts = ConnectOpts {
        max_conns: Some(1),
        min_conns: Some(1),
        ..ConnectOpts::default()
    };
    let db = connect_db("sqlite::memory:", opts).await.unwrap();
    create_schema(&db).await.unwrap();
    db
}

pub fn zone(id: &str, tenant_id: &str, zone_type: &str) -> Zone {
    Zone {
        id: ZoneId::parse_raw(id).unwrap(),
        tenant_id: tenant(tenant_id),
        name: format!("zone {id}"),
        zone_type: zone_type.parse().unwrap(),
        premises_id: PremisesId::parse_raw("hq").unwrap(),
    }
}

pub fn feed(id: &str, tenant_id: &str) -> Feed {
    Feed {
        id: FeedId::parse_raw(id).unwrap(),
        tenant_id: tenant(tenant_id),
        device_id: DeviceId::parse_raw("dev-01").unwrap(),
        key: format!("{id}.temperature"),
        state: FeedState::Active,
    }
}

pub fn device(id: &str, tenant_id: &str, state: DeviceState) -> Device {
    Device {
        id: DeviceId::parse_raw(id).unwrap(),
        tenant_id: tenant(tenant_id),
        name: format!("device {id}"),
        state,
        registered_by: ActorId::parse_raw("actor-1").unwrap(),
        zone_id: None,
    }
}

pub fn automation(id: &str, tenant_id: &str, created_by: &str, zone_id: &str) -> Automation {
    Automation {
        id: AutomationId::parse_raw(id).unwrap(),
        tenant_id: tenant(tenant_id),
        name: format!("automation {id}"),
        state: AutomationState::Enabled,
        created_by: ActorId::parse_raw(created_by).unwrap(),
        zone_id: ZoneId::parse_raw(zone_id).unwrap(),
    }
}

pub fn actor(id: &str, tenant_id: &str, kind: ActorKind) -> Actor {
    Actor {
        id: ActorId::parse_raw(id).unwrap(),
        tenant_id: tenant(tenant_id),
        display_name: format!("actor {id}"),
        kind,
        state: ActorState::Active,
    }
}

pub async fn insert_zones(db: &DatabaseConnection, zones: &[Zone]) {
    for z in zones {
        zone::ActiveModel::from(z).insert(db).await.unwrap();
    }
}

pub async fn insert_feeds(db: &DatabaseConnection, feeds: &[Feed]) {
    for f in feeds {
        feed::ActiveModel::from(f).insert(db).await.unwrap();
    }
}

pub async fn insert_devices(db: &DatabaseConnection, devices: &[Device]) {
    for d in devices {
        device::ActiveModel::from(d).insert(db).await.unwrap();
    }
}

pub async fn insert_automations(db: &DatabaseConnection, automations: &[Automation]) {
    for a in automations {
        automation::ActiveModel::from(a).insert(db).await.unwrap();
    }
}

pub async fn insert_actors(db: &DatabaseConnection, actors: &[Actor]) {
    for a in actors {
        actor::ActiveModel::from(a).insert(db).await.unwrap();
    }
}

/// `zone-01` .. `zone-{n}`, zero-padded to two digits.
pub fn zone_ids(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("zone-{i:02}")).collect()
}

pub fn rule(
    tenant_id: &str,
    resource_type: &str,
    selector: Selector,
    allowed: &[&str],
    denied: &[&str],
) -> StaticRule {
    StaticRule {
        tenant_id: tenant_id.to_owned(),
        resource_type: resource_type.to_owned(),
        actions: Vec::new(),
        selector,
        allowed_ids: allowed.iter().map(|s| (*s).to_owned()).collect(),
        denied_ids: denied.iter().map(|s| (*s).to_owned()).collect(),
    }
}

pub fn static_authz(rules: Vec<StaticRule>) -> Arc<dyn AuthZResolverGatewayClient> {
    Arc::new(Service::new(StaticAuthzPluginConfig {
        mode: AuthzMode::Rules,
        rules,
    }))
}

pub struct FailingAuthz;

#[async_trait]
impl AuthZResolverGatewayClient for FailingAuthz {
    async fn evaluate(
        &self,
        _request: DecisionRequest,
    ) -> Result<DecisionResponse, AuthZResolverError> {
        Err(AuthZResolverError::ServiceUnavailable(
            "policy engine down".to_owned(),
        ))
    }
}

pub struct SlowAuthz;

#[async_trait]
impl AuthZResolverGatewayClient for SlowAuthz {
    async fn evaluate(
        &self,
        request: DecisionRequest,
    ) -> Result<DecisionResponse, AuthZResolverError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(DecisionResponse::for_request(
            &request,
            Selector::Unrestricted,
            vec![],
            vec![],
        ))
    }
}

/// Wraps a repository and counts `find` calls.
pub struct CountingRepository<R: CatalogResource> {
    inner: Arc<dyn ResourceRepository<R>>,
    calls: AtomicUsize,
}

impl<R: CatalogResource> CountingRepository<R> {
    pub fn new(inner: Arc<dyn ResourceRepository<R>>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: CatalogResource> ResourceRepository<R> for CountingRepository<R> {
    async fn find(&self, spec: &Specification<R::Leaf>) -> Result<Vec<R::Record>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find(spec).await
    }
}

/// Repository that must never be reached.
pub struct UnreachableRepository {
    calls: AtomicUsize,
}

impl UnreachableRepository {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R: CatalogResource> ResourceRepository<R> for UnreachableRepository {
    async fn find(&self, _spec: &Specification<R::Leaf>) -> Result<Vec<R::Record>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

/// In-memory cache recording every key it is asked about.
#[derive(Default)]
pub struct RecordingCache {
    inner: InMemoryQueryCache,
    gets: Mutex<Vec<String>>,
    sets: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    pub fn sets(&self) -> Vec<String> {
        self.sets.lock().unwrap().clone()
    }

    /// Overwrite an entry without recording it.
    pub async fn poison(&self, key: &str, value: &[u8]) {
        self.inner
            .set(key, value.to_vec(), Duration::from_secs(60))
            .await
            .unwrap();
    }
}

#[async_trait]
impl QueryCache for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.gets.lock().unwrap().push(key.to_owned());
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.sets.lock().unwrap().push(key.to_owned());
        self.inner.set(key, value, ttl).await
    }
}

/// Cache whose backend is unreachable.
pub struct DownCache;

#[async_trait]
impl QueryCache for DownCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_owned()))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_owned()))
    }
}
