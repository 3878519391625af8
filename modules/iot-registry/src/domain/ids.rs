//! Record identifiers.

use modkit_security::resource_id;

pub use modkit_security::TenantId;

resource_id! {
    pub struct DeviceId("device_id");
}

resource_id! {
    pub struct ZoneId("zone_id");
}

resource_id! {
    pub struct PremisesId("premises_id");
}

resource_id! {
    pub struct FeedId("feed_id");
}

resource_id! {
    pub struct AutomationId("automation_id");
}

resource_id! {
    /// A user, service or device principal acting within a tenant.
    pub struct ActorId("actor_id");
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use modkit_security::ResourceId;

    #[test]
    fn parse_failure_names_the_kind() {
        let err = ZoneId::parse_raw("").unwrap_err();
        assert_eq!(err.field(), "zone_id");
    }

    #[test]
    fn serde_revalidates() {
        let id: DeviceId = serde_json::from_str(r#""dev-01""#).unwrap();
        assert_eq!(id.as_str(), "dev-01");
        assert!(serde_json::from_str::<DeviceId>(r#"" dev-01""#).is_err());
    }
}
