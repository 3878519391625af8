#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use authz_resolver_sdk::pep::PolicyEnforcer;
use iot_registry::domain::catalog::ZoneLeaf;
use iot_registry::domain::repos::ResourceRepository;
use iot_registry::domain::service::{ScopedReader, ServiceConfig, ZoneResource, actions};
use iot_registry::infra::storage::ZoneRepository;
use iot_registry::DomainError;
use modkit_db::cache::CacheError;
use modkit_security::{Selector, Specification};

use common::{
    CountingRepository, DownCache, RecordingCache, UnreachableRepository, ctx, database,
    insert_zones, rule, static_authz, tenant, zone,
};

struct Fixture {
    repo: Arc<CountingRepository<ZoneResource>>,
    cache: Arc<RecordingCache>,
    reader: ScopedReader<ZoneResource>,
}

async fn fixture(rules: Vec<static_authz_plugin::StaticRule>) -> Fixture {
    let db = database().await;
    insert_zones(
        &db,
        &[
            zone("zone-01", "PR-1", "ZONE"),
            zone("zone-02", "PR-1", "floor"),
            zone("zone-03", "PR-2", "ZONE"),
        ],
    )
    .await;

    let inner: Arc<dyn ResourceRepository<ZoneResource>> = Arc::new(ZoneRepository::new(db));
    let repo = Arc::new(CountingRepository::new(inner));
    let cache = Arc::new(RecordingCache::default());
    let reader = ScopedReader::new(
        repo.clone(),
        cache.clone(),
        PolicyEnforcer::new(static_authz(rules)),
        ServiceConfig::default(),
    );
    Fixture {
        repo,
        cache,
        reader,
    }
}

fn zone_type(raw: &str) -> Option<Specification<ZoneLeaf>> {
    Some(Specification::leaf(ZoneLeaf::has_type(raw).unwrap()))
}

fn allow_all() -> Vec<static_authz_plugin::StaticRule> {
    vec![
        rule("PR-1", "iot.zone", Selector::Unrestricted, &[], &[]),
        rule("PR-2", "iot.zone", Selector::Unrestricted, &[], &[]),
    ]
}

#[tokio::test]
async fn repeated_query_is_served_from_cache() {
    let f = fixture(allow_all()).await;
    let caller = ctx("PR-1");

    let first = f
        .reader
        .read(&caller, &tenant("PR-1"), actions::LIST, zone_type("ZONE"))
        .await
        .unwrap();
    let second = f
        .reader
        .read(&caller, &tenant("PR-1"), actions::LIST, zone_type("ZONE"))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(f.repo.calls(), 1);
    assert_eq!(f.cache.sets().len(), 1);
}

#[tokio::test]
async fn keys_carry_prefix_and_tenant() {
    let f = fixture(allow_all()).await;

    f.reader
        .read(&ctx("PR-1"), &tenant("PR-1"), actions::LIST, zone_type("ZONE"))
        .await
        .unwrap();
    f.reader
        .read(&ctx("PR-2"), &tenant("PR-2"), actions::LIST, zone_type("ZONE"))
        .await
        .unwrap();

    let keys = f.cache.sets();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
    assert!(keys[0].starts_with("iot-registry:iot.zone:"), "{}", keys[0]);
    assert!(keys[0].contains(r#"tenant("PR-1")"#), "{}", keys[0]);
    assert!(keys[1].contains(r#"tenant("PR-2")"#), "{}", keys[1]);
    assert_eq!(f.repo.calls(), 2);
}

#[tokio::test]
async fn different_decisions_do_not_share_entries() {
    let narrow = fixture(vec![rule(
        "PR-1",
        "iot.zone",
        Selector::Unrestricted,
        &[],
        &["zone-01"],
    )])
    .await;
    let wide = fixture(allow_all()).await;

    narrow
        .reader
        .read(&ctx("PR-1"), &tenant("PR-1"), actions::LIST, None)
        .await
        .unwrap();
    wide.reader
        .read(&ctx("PR-1"), &tenant("PR-1"), actions::LIST, None)
        .await
        .unwrap();

    assert_ne!(narrow.cache.sets(), wide.cache.sets());
}

#[tokio::test]
#[tracing_test::traced_test]
async fn undecodable_entry_is_a_miss() {
    let f = fixture(allow_all()).await;
    let caller = ctx("PR-1");

    f.reader
        .read(&caller, &tenant("PR-1"), actions::LIST, None)
        .await
        .unwrap();
    let key = f.cache.sets().remove(0);
    f.cache.poison(&key, b"{not json").await;

    let zones = f
        .reader
        .read(&caller, &tenant("PR-1"), actions::LIST, None)
        .await
        .unwrap();

    assert_eq!(zones.len(), 2);
    assert_eq!(f.repo.calls(), 2);
    assert!(logs_contain("discarding undecodable cached value"));
}

#[tokio::test]
async fn unavailable_cache_fails_the_read() {
    let repo = Arc::new(UnreachableRepository::new());
    let reader = ScopedReader::<ZoneResource>::new(
        repo.clone(),
        Arc::new(DownCache),
        PolicyEnforcer::new(static_authz(allow_all())),
        ServiceConfig::default(),
    );

    let err = reader
        .read(&ctx("PR-1"), &tenant("PR-1"), actions::LIST, None)
        .await
        .unwrap_err();

    assert!(
        matches!(err, DomainError::Cache(CacheError::Unavailable(_))),
        "{err:?}"
    );
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn operand_order_shares_a_key() {
    let f = fixture(allow_all()).await;
    let tenant_leaf = || Specification::leaf(ZoneLeaf::belongs_to_tenant("PR-1").unwrap());
    let type_leaf = || Specification::leaf(ZoneLeaf::has_type("ZONE").unwrap());

    assert_eq!(
        f.reader.cache_key(&tenant_leaf().and(type_leaf())),
        f.reader.cache_key(&type_leaf().and(tenant_leaf()))
    );
}
