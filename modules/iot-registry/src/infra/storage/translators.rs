//! Per-resource specification translators.
//!
//! Tenant and id leaves go through the shared helpers, which resolve their
//! columns via `ScopableEntity`; the remaining leaves compare one column.

use modkit_db::secure::{QueryTranslator, TranslateError, id_condition, tenant_condition};
use modkit_security::ResourceId;
use sea_orm::{ColumnTrait, Condition};

use crate::domain::catalog::{ActorLeaf, AutomationLeaf, DeviceLeaf, FeedLeaf, ZoneLeaf};
use crate::domain::service::resources;
use crate::infra::storage::entity::{actor, automation, device, feed, zone};

fn eq(column: impl ColumnTrait, value: &str) -> Condition {
    Condition::all().add(column.eq(value))
}

pub struct DeviceTranslator;

impl QueryTranslator for DeviceTranslator {
    type Leaf = DeviceLeaf;
    const RESOURCE: &'static str = resources::DEVICE.name;

    fn translate_leaf(leaf: &DeviceLeaf) -> Result<Condition, TranslateError> {
        match leaf {
            DeviceLeaf::BelongsToTenant(tenant) => {
                tenant_condition::<device::Entity>(Self::RESOURCE, tenant)
            }
            DeviceLeaf::HasState(state) => Ok(eq(device::Column::State, state.as_str())),
            DeviceLeaf::RegisteredBy(actor) => {
                Ok(eq(device::Column::RegisteredBy, actor.as_str()))
            }
            DeviceLeaf::InZone(zone) => Ok(eq(device::Column::ZoneId, zone.as_str())),
            DeviceLeaf::Id(filter) => id_condition::<device::Entity, _>(Self::RESOURCE, filter),
        }
    }
}

pub struct ZoneTranslator;

impl QueryTranslator for ZoneTranslator {
    type Leaf = ZoneLeaf;
    const RESOURCE: &'static str = resources::ZONE.name;

    fn translate_leaf(leaf: &ZoneLeaf) -> Result<Condition, TranslateError> {
        match leaf {
            ZoneLeaf::BelongsToTenant(tenant) => {
                tenant_condition::<zone::Entity>(Self::RESOURCE, tenant)
            }
            ZoneLeaf::HasType(zone_type) => Ok(eq(zone::Column::ZoneType, zone_type.as_str())),
            ZoneLeaf::WithinPremises(premises) => {
                Ok(eq(zone::Column::PremisesId, premises.as_str()))
            }
            ZoneLeaf::Id(filter) => id_condition::<zone::Entity, _>(Self::RESOURCE, filter),
        }
    }
}

pub struct FeedTranslator;

impl QueryTranslator for FeedTranslator {
    type Leaf = FeedLeaf;
    const RESOURCE: &'static str = resources::FEED.name;

    fn translate_leaf(leaf: &FeedLeaf) -> Result<Condition, TranslateError> {
        match leaf {
            FeedLeaf::BelongsToTenant(tenant) => {
                tenant_condition::<feed::Entity>(Self::RESOURCE, tenant)
            }
            FeedLeaf::OfDevice(device) => Ok(eq(feed::Column::DeviceId, device.as_str())),
            FeedLeaf::HasState(state) => Ok(eq(feed::Column::State, state.as_str())),
            FeedLeaf::Id(filter) => id_condition::<feed::Entity, _>(Self::RESOURCE, filter),
        }
    }
}

pub struct AutomationTranslator;

impl QueryTranslator for AutomationTranslator {
    type Leaf = AutomationLeaf;
    const RESOURCE: &'static str = resources::AUTOMATION.name;

    fn translate_leaf(leaf: &AutomationLeaf) -> Result<Condition, TranslateError> {
        match leaf {
            AutomationLeaf::BelongsToTenant(tenant) => {
                tenant_condition::<automation::Entity>(Self::RESOURCE, tenant)
            }
            AutomationLeaf::HasState(state) => Ok(eq(automation::Column::State, state.as_str())),
            AutomationLeaf::CreatedBy(actor) => {
                Ok(eq(automation::Column::CreatedBy, actor.as_str()))
            }
            AutomationLeaf::TargetsZone(zone) => Ok(eq(automation::Column::ZoneId, zone.as_str())),
            AutomationLeaf::Id(filter) => {
                id_condition::<automation::Entity, _>(Self::RESOURCE, filter)
            }
        }
    }
}

pub struct ActorTranslator;

impl QueryTranslator for ActorTranslator {
    type Leaf = ActorLeaf;
    const RESOURCE: &'static str = resources::ACTOR.name;

    fn translate_leaf(leaf: &ActorLeaf) -> Result<Condition, TranslateError> {
        match leaf {
            ActorLeaf::BelongsToTenant(tenant) => {
                tenant_condition::<actor::Entity>(Self::RESOURCE, tenant)
            }
            ActorLeaf::OfKind(kind) => Ok(eq(actor::Column::Kind, kind.as_str())),
            ActorLeaf::HasState(state) => Ok(eq(actor::Column::State, state.as_str())),
            ActorLeaf::Id(filter) => id_condition::<actor::Entity, _>(Self::RESOURCE, filter),
        }
    }
}
