use modkit_security::{IdFilter, InvalidPredicateArgument, LeafPredicate, ResourceId, TenantId};

use crate::domain::ids::{PremisesId, ZoneId};
use crate::domain::models::{Zone, ZoneType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneLeaf {
    BelongsToTenant(TenantId),
    HasType(ZoneType),
    WithinPremises(PremisesId),
    Id(IdFilter<ZoneId>),
}

impl ZoneLeaf {
    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `tenant` is not a valid tenant id.
    pub fn belongs_to_tenant(tenant: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::BelongsToTenant(TenantId::parse_raw(tenant)?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] for a blank or padded label.
    pub fn has_type(zone_type: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::HasType(zone_type.parse()?))
    }

    /// # Errors
    ///
    /// [`InvalidPredicateArgument`] if `premises` is not a valid premises id.
    pub fn within_premises(premises: &str) -> Result<Self, InvalidPredicateArgument> {
        Ok(Self::WithinPremises(PremisesId::parse_raw(premises)?))
    }
}

impl From<IdFilter<ZoneId>> for ZoneLeaf {
    fn from(filter: IdFilter<ZoneId>) -> Self {
        Self::Id(filter)
    }
}

impl LeafPredicate for ZoneLeaf {
    type Candidate = Zone;

    fn is_satisfied_by(&self, zone: &Zone) -> bool {
        match self {
            Self::BelongsToTenant(tenant) => zone.tenant_id == *tenant,
            Self::HasType(zone_type) => zone.zone_type == *zone_type,
            Self::WithinPremises(premises) => zone.premises_id == *premises,
            Self::Id(filter) => filter.admits(&zone.id),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn blank_type_is_rejected() {
        let err = ZoneLeaf::has_type(" ").unwrap_err();
        assert_eq!(err.field(), "zone_type");
    }

    #[test]
    fn type_comparison_is_exact() {
        let zone = Zone {
            id: ZoneId::parse_raw("zone-01").unwrap(),
            tenant_id: TenantId::parse_raw("PR-1").unwrap(),
            name: "Lobby".to_owned(),
            zone_type: "ZONE".parse().unwrap(),
            premises_id: PremisesId::parse_raw("hq").unwrap(),
        };
        assert!(ZoneLeaf::has_type("ZONE").unwrap().is_satisfied_by(&zone));
        assert!(!ZoneLeaf::has_type("zone").unwrap().is_satisfied_by(&zone));
        assert!(ZoneLeaf::within_premises("hq").unwrap().is_satisfied_by(&zone));
    }
}
