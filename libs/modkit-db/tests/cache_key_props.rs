#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;

use modkit_db::cache::{CacheKeyGenerator, LeafKey, id_filter_key, tenant_key};
use modkit_security::{IdFilter, ResourceId, Specification, TenantId};
use proptest::prelude::*;

static TENANTS: &[&str] = &["PR-1", "PR-2", "PR-3"];
static LABELS: &[&str] = &["ZONE", "floor", "a,b", "x\")"];
static IDS: &[&str] = &["zone-01", "zone-02", "zone-03", "zone-04"];

#[derive(Debug, Clone)]
enum Room {
    Tenant(TenantId),
    Kind(String),
    Id(IdFilter<TenantId>),
}

struct RoomKeys;

impl CacheKeyGenerator for RoomKeys {
    type Leaf = Room;
    const NAMESPACE: &'static str = "test.room";

    fn leaf_key(leaf: &Room) -> LeafKey {
        match leaf {
            Room::Tenant(t) => tenant_key(t),
            Room::Kind(k) => LeafKey::new("kind").field(k),
            Room::Id(f) => id_filter_key(f),
        }
    }
}

fn tenant(raw: &str) -> Room {
    Room::Tenant(TenantId::parse_raw(raw).unwrap())
}

fn id_set() -> impl Strategy<Value = BTreeSet<TenantId>> {
    prop::sample::subsequence(IDS.to_vec(), 0..=IDS.len()).prop_map(|ids| {
        ids.into_iter()
            .map(|raw| TenantId::parse_raw(raw).unwrap())
            .collect()
    })
}

/// Leaves other than the tenant scope.
fn filter_leaf() -> impl Strategy<Value = Room> {
    prop_oneof![
        prop::sample::select(LABELS).prop_map(|k| Room::Kind(k.to_owned())),
        id_set().prop_map(|ids| Room::Id(IdFilter::In(ids))),
        id_set().prop_map(|ids| Room::Id(IdFilter::NotIn(ids))),
    ]
}

fn any_leaf() -> impl Strategy<Value = Room> {
    prop_oneof![
        prop::sample::select(TENANTS).prop_map(tenant),
        filter_leaf(),
    ]
}

fn conjunction(leaves: Vec<Room>) -> Specification<Room> {
    Specification::all_of(leaves.into_iter().map(Specification::leaf)).unwrap()
}

fn leaves_and_shuffle() -> impl Strategy<Value = (Vec<Room>, Vec<Room>)> {
    prop::collection::vec(any_leaf(), 1..7)
        .prop_flat_map(|leaves| (Just(leaves.clone()), Just(leaves).prop_shuffle()))
}

fn leaves_and_split() -> impl Strategy<Value = (Vec<Room>, usize)> {
    prop::collection::vec(any_leaf(), 2..7).prop_flat_map(|leaves| {
        let len = leaves.len();
        (Just(leaves), 1..len)
    })
}

proptest! {
    #[test]
    fn key_ignores_operand_order((leaves, shuffled) in leaves_and_shuffle()) {
        prop_assert_eq!(
            RoomKeys::key(&conjunction(leaves)),
            RoomKeys::key(&conjunction(shuffled))
        );
    }

    #[test]
    fn key_ignores_grouping((leaves, at) in leaves_and_split()) {
        let flat = RoomKeys::key(&conjunction(leaves.clone()));
        let (left, right) = leaves.split_at(at);
        let grouped = conjunction(left.to_vec()).and(conjunction(right.to_vec()));
        prop_assert_eq!(RoomKeys::key(&grouped), flat);
    }

    #[test]
    fn tenants_never_share_a_key(
        rest in prop::collection::vec(filter_leaf(), 0..5),
        pair in prop::sample::subsequence(TENANTS.to_vec(), 2),
    ) {
        let scoped = |raw: &str| {
            let mut leaves = vec![tenant(raw)];
            leaves.extend(rest.iter().cloned());
            RoomKeys::key(&conjunction(leaves))
        };
        prop_assert_ne!(scoped(pair[0]), scoped(pair[1]));
    }
}
