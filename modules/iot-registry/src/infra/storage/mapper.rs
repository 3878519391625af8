//! Row <-> record mapping.
//!
//! Rows are re-validated on read: a row that no longer parses surfaces as
//! [`DomainError::CorruptRecord`] instead of being skipped.

use modkit_security::{InvalidPredicateArgument, ResourceId, TenantId};
use sea_orm::ActiveValue::Set;

use crate::domain::error::DomainError;
use crate::domain::ids::{ActorId, AutomationId, DeviceId, FeedId, PremisesId, ZoneId};
use crate::domain::models::{Actor, Automation, Device, Feed, Zone};
use crate::domain::service::resources;
use crate::infra::storage::entity::{actor, automation, device, feed, zone};

fn corrupt(resource: &'static str) -> impl Fn(InvalidPredicateArgument) -> DomainError {
    move |e| DomainError::corrupt(resource, e.to_string())
}

impl TryFrom<device::Model> for Device {
    type Error = DomainError;

    fn try_from(row: device::Model) -> Result<Self, Self::Error> {
        let bad = corrupt(resources::DEVICE.name);
        Ok(Self {
            id: DeviceId::parse_raw(&row.id).map_err(&bad)?,
            tenant_id: TenantId::parse_raw(&row.tenant_id).map_err(&bad)?,
            name: row.name,
            state: row.state.parse().map_err(&bad)?,
            registered_by: ActorId::parse_raw(&row.registered_by).map_err(&bad)?,
            zone_id: row
                .zone_id
                .as_deref()
                .map(ZoneId::parse_raw)
                .transpose()
                .map_err(&bad)?,
        })
    }
}

impl TryFrom<zone::Model> for Zone {
    type Error = DomainError;

    fn try_from(row: zone::Model) -> Result<Self, Self::Error> {
        let bad = corrupt(resources::ZONE.name);
        Ok(Self {
            id: ZoneId::parse_raw(&row.id).map_err(&bad)?,
            tenant_id: TenantId::parse_raw(&row.tenant_id).map_err(&bad)?,
            name: row.name,
            zone_type: row.zone_type.try_into().map_err(&bad)?,
            premises_id: PremisesId::parse_raw(&row.premises_id).map_err(&bad)?,
        })
    }
}

impl TryFrom<feed::Model> for Feed {
    type Error = DomainError;

    fn try_from(row: feed::Model) -> Result<Self, Self::Error> {
        let bad = corrupt(resources::FEED.name);
        Ok(Self {
            id: FeedId::parse_raw(&row.id).map_err(&bad)?,
            tenant_id: TenantId::parse_raw(&row.tenant_id).map_err(&bad)?,
            device_id: DeviceId::parse_raw(&row.device_id).map_err(&bad)?,
            key: row.key,
            state: row.state.parse().map_err(&bad)?,
        })
    }
}

impl TryFrom<automation::Model> for Automation {
    type Error = DomainError;

    fn try_from(row: automation::Model) -> Result<Self, Self::Error> {
        let bad = corrupt(resources::AUTOMATION.name);
        Ok(Self {
            id: AutomationId::parse_raw(&row.id).map_err(&bad)?,
            tenant_id: TenantId::parse_raw(&row.tenant_id).map_err(&bad)?,
            name: row.name,
            state: row.state.parse().map_err(&bad)?,
            created_by: ActorId::parse_raw(&row.created_by).map_err(&bad)?,
            zone_id: ZoneId::parse_raw(&row.zone_id).map_err(&bad)?,
        })
    }
}

impl TryFrom<actor::Model> for Actor {
    type Error = DomainError;

    fn try_from(row: actor::Model) -> Result<Self, Self::Error> {
        let bad = corrupt(resources::ACTOR.name);
        Ok(Self {
            id: ActorId::parse_raw(&row.id).map_err(&bad)?,
            tenant_id: TenantId::parse_raw(&row.tenant_id).map_err(&bad)?,
            display_name: row.display_name,
            kind: row.kind.parse().map_err(&bad)?,
            state: row.state.parse().map_err(&bad)?,
        })
    }
}

impl From<&Device> for device::ActiveModel {
    fn from(d: &Device) -> Self {
        Self {
            id: Set(d.id.as_str().to_owned()),
            tenant_id: Set(d.tenant_id.as_str().to_owned()),
            name: Set(d.name.clone()),
            state: Set(d.state.as_str().to_owned()),
            registered_by: Set(d.registered_by.as_str().to_owned()),
            zone_id: Set(d.zone_id.as_ref().map(|z| z.as_str().to_owned())),
        }
    }
}

impl From<&Zone> for zone::ActiveModel {
    fn from(z: &Zone) -> Self {
        Self {
            id: Set(z.id.as_str().to_owned()),
            tenant_id: Set(z.tenant_id.as_str().to_owned()),
            name: Set(z.name.clone()),
            zone_type: Set(z.zone_type.as_str().to_owned()),
            premises_id: Set(z.premises_id.as_str().to_owned()),
        }
    }
}

impl From<&Feed> for feed::ActiveModel {
    fn from(f: &Feed) -> Self {
        Self {
            id: Set(f.id.as_str().to_owned()),
            tenant_id: Set(f.tenant_id.as_str().to_owned()),
            device_id: Set(f.device_id.as_str().to_owned()),
            key: Set(f.key.clone()),
            state: Set(f.state.as_str().to_owned()),
        }
    }
}

impl From<&Automation> for automation::ActiveModel {
    fn from(a: &Automation) -> Self {
        Self {
            id: Set(a.id.as_str().to_owned()),
            tenant_id: Set(a.tenant_id.as_str().to_owned()),
            name: Set(a.name.clone()),
            state: Set(a.state.as_str().to_owned()),
            created_by: Set(a.created_by.as_str().to_owned()),
            zone_id: Set(a.zone_id.as_str().to_owned()),
        }
    }
}

impl From<&Actor> for actor::ActiveModel {
    fn from(a: &Actor) -> Self {
        Self {
            id: Set(a.id.as_str().to_owned()),
            tenant_id: Set(a.tenant_id.as_str().to_owned()),
            display_name: Set(a.display_name.clone()),
            kind: Set(a.kind.as_str().to_owned()),
            state: Set(a.state.as_str().to_owned()),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn row() -> device::Model {
        device::Model {
            id: "dev-01".to_owned(),
            tenant_id: "PR-1".to_owned(),
            name: "sensor".to_owned(),
            state: "active".to_owned(),
            registered_by: "actor-1".to_owned(),
            zone_id: None,
        }
    }

    #[test]
    fn valid_row_maps() {
        let device = Device::try_from(row()).unwrap();
        assert_eq!(device.id.as_str(), "dev-01");
        assert!(device.zone_id.is_none());
    }

    #[test]
    fn unknown_state_is_corrupt() {
        let err = Device::try_from(device::Model {
            state: "retired".to_owned(),
            ..row()
        })
        .unwrap_err();
        assert!(
            matches!(err, DomainError::CorruptRecord { resource, .. } if resource == "iot.device"),
            "{err:?}"
        );
    }

    #[test]
    fn blank_zone_reference_is_corrupt() {
        let err = Device::try_from(device::Model {
            zone_id: Some(String::new()),
            ..row()
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::CorruptRecord { .. }), "{err:?}");
    }
}
