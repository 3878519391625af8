use modkit_db::cache::{CacheKeyGenerator, LeafKey, id_filter_key, tenant_key};
use modkit_security::ResourceId;

use crate::domain::catalog::{ActorLeaf, AutomationLeaf, DeviceLeaf, FeedLeaf, ZoneLeaf};

pub struct DeviceKeys;

impl CacheKeyGenerator for DeviceKeys {
    type Leaf = DeviceLeaf;
    const NAMESPACE: &'static str = "iot.device";

    fn leaf_key(leaf: &DeviceLeaf) -> LeafKey {
        match leaf {
            DeviceLeaf::BelongsToTenant(tenant) => tenant_key(tenant),
            DeviceLeaf::HasState(state) => LeafKey::new("state").field(state.as_str()),
            DeviceLeaf::RegisteredBy(actor) => LeafKey::new("registered_by").field(actor.as_str()),
            DeviceLeaf::InZone(zone) => LeafKey::new("zone").field(zone.as_str()),
            DeviceLeaf::Id(filter) => id_filter_key(filter),
        }
    }
}

pub struct ZoneKeys;

impl CacheKeyGenerator for ZoneKeys {
    type Leaf = ZoneLeaf;
    const NAMESPACE: &'static str = "iot.zone";

    fn leaf_key(leaf: &ZoneLeaf) -> LeafKey {
        match leaf {
            ZoneLeaf::BelongsToTenant(tenant) => tenant_key(tenant),
            ZoneLeaf::HasType(zone_type) => LeafKey::new("type").field(zone_type.as_str()),
            ZoneLeaf::WithinPremises(premises) => LeafKey::new("premises").field(premises.as_str()),
            ZoneLeaf::Id(filter) => id_filter_key(filter),
        }
    }
}

pub struct FeedKeys;

impl CacheKeyGenerator for FeedKeys {
    type Leaf = FeedLeaf;
    const NAMESPACE: &'static str = "iot.feed";

    fn leaf_key(leaf: &FeedLeaf) -> LeafKey {
        match leaf {
            FeedLeaf::BelongsToTenant(tenant) => tenant_key(tenant),
            FeedLeaf::OfDevice(device) => LeafKey::new("device").field(device.as_str()),
            FeedLeaf::HasState(state) => LeafKey::new("state").field(state.as_str()),
            FeedLeaf::Id(filter) => id_filter_key(filter),
        }
    }
}

pub struct AutomationKeys;

impl CacheKeyGenerator for AutomationKeys {
    type Leaf = AutomationLeaf;
    const NAMESPACE: &'static str = "iot.automation";

    fn leaf_key(leaf: &AutomationLeaf) -> LeafKey {
        match leaf {
            AutomationLeaf::BelongsToTenant(tenant) => tenant_key(tenant),
            AutomationLeaf::HasState(state) => LeafKey::new("state").field(state.as_str()),
            AutomationLeaf::CreatedBy(actor) => LeafKey::new("created_by").field(actor.as_str()),
            AutomationLeaf::TargetsZone(zone) => LeafKey::new("zone").field(zone.as_str()),
            AutomationLeaf::Id(filter) => id_filter_key(filter),
        }
    }
}

pub struct ActorKeys;

impl CacheKeyGenerator for ActorKeys {
    type Leaf = ActorLeaf;
    const NAMESPACE: &'static str = "iot.actor";

    fn leaf_key(leaf: &ActorLeaf) -> LeafKey {
        match leaf {
            ActorLeaf::BelongsToTenant(tenant) => tenant_key(tenant),
            ActorLeaf::OfKind(kind) => LeafKey::new("kind").field(kind.as_str()),
            ActorLeaf::HasState(state) => LeafKey::new("state").field(state.as_str()),
            ActorLeaf::Id(filter) => id_filter_key(filter),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use modkit_security::Specification;

    fn zones(tenant: &str, zone_type: &str) -> Specification<ZoneLeaf> {
        Specification::leaf(ZoneLeaf::belongs_to_tenant(tenant).unwrap())
            .and(Specification::leaf(ZoneLeaf::has_type(zone_type).unwrap()))
    }

    #[test]
    fn zone_key_is_readable_and_sorted() {
        assert_eq!(
            ZoneKeys::key(&zones("PR-1", "ZONE")),
            r#"iot.zone:all(tenant("PR-1"),type("ZONE"))"#
        );
    }

    #[test]
    fn operand_order_does_not_change_the_key() {
        let tenant = Specification::leaf(FeedLeaf::belongs_to_tenant("PR-1").unwrap());
        let state = Specification::leaf(FeedLeaf::has_state("paused").unwrap());
        assert_eq!(
            FeedKeys::key(&tenant.clone().and(state.clone())),
            FeedKeys::key(&state.and(tenant))
        );
    }

    #[test]
    fn tenants_never_share_a_key() {
        assert_ne!(
            ZoneKeys::key(&zones("PR-1", "ZONE")),
            ZoneKeys::key(&zones("PR-2", "ZONE"))
        );
    }

    #[test]
    fn namespaces_keep_resources_apart() {
        let device = Specification::leaf(DeviceLeaf::belongs_to_tenant("PR-1").unwrap());
        let actor = Specification::leaf(ActorLeaf::belongs_to_tenant("PR-1").unwrap());
        assert_ne!(DeviceKeys::key(&device), ActorKeys::key(&actor));
    }

    #[test]
    fn shared_tags_differ_by_argument() {
        let created = Specification::leaf(AutomationLeaf::created_by("a-1").unwrap());
        let zoned = Specification::leaf(AutomationLeaf::targets_zone("a-1").unwrap());
        assert_ne!(AutomationKeys::key(&created), AutomationKeys::key(&zoned));
    }
}
