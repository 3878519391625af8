//! Records returned by the registry.
//!
//! Lifecycle and kind enums are stored and matched in their lowercase form.

use std::fmt;
use std::str::FromStr;

use modkit_security::identifier::validate_raw_id;
use modkit_security::{InvalidPredicateArgument, TenantId};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ActorId, AutomationId, DeviceId, FeedId, PremisesId, ZoneId};

macro_rules! stored_enum {
    ($(#[$meta:meta])* $name:ident($field:literal) { $($variant:ident => $repr:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $repr),+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidPredicateArgument;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw {
                    $($repr => Ok(Self::$variant),)+
                    other => Err(InvalidPredicateArgument::new(
                        $field,
                        format!("unknown value `{other}`"),
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

stored_enum! {
    DeviceState("device_state") {
        Registered => "registered",
        Active => "active",
        Suspended => "suspended",
        Decommissioned => "decommissioned",
    }
}

stored_enum! {
    FeedState("feed_state") {
        Active => "active",
        Paused => "paused",
    }
}

stored_enum! {
    AutomationState("automation_state") {
        Enabled => "enabled",
        Disabled => "disabled",
    }
}

stored_enum! {
    ActorKind("actor_kind") {
        User => "user",
        Service => "service",
        Device => "device",
    }
}

stored_enum! {
    ActorState("actor_state") {
        Active => "active",
        Disabled => "disabled",
    }
}

/// Free-form zone classification (`"ZONE"`, `"floor"`, ...), compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneType(String);

impl ZoneType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ZoneType {
    type Err = InvalidPredicateArgument;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        validate_raw_id("zone_type", raw)?;
        Ok(Self(raw.to_owned()))
    }
}

impl TryFrom<String> for ZoneType {
    type Error = InvalidPredicateArgument;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        validate_raw_id("zone_type", &raw)?;
        Ok(Self(raw))
    }
}

impl From<ZoneType> for String {
    fn from(zone_type: ZoneType) -> String {
        zone_type.0
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub tenant_id: TenantId,
    pub name: String,
    pub state: DeviceState,
    pub registered_by: ActorId,
    pub zone_id: Option<ZoneId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub tenant_id: TenantId,
    pub name: String,
    pub zone_type: ZoneType,
    pub premises_id: PremisesId,
}

/// A telemetry stream published by one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: FeedId,
    pub tenant_id: TenantId,
    pub device_id: DeviceId,
    pub key: String,
    pub state: FeedState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub tenant_id: TenantId,
    pub name: String,
    pub state: AutomationState,
    pub created_by: ActorId,
    pub zone_id: ZoneId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub tenant_id: TenantId,
    pub display_name: String,
    pub kind: ActorKind,
    pub state: ActorState,
}
