//! Authorized specification builder.
//!
//! Encodes an [`AuthorizationDecision`] as a predicate over record ids:
//!
//! | selector | predicate |
//! |----------|-----------|
//! | `UNRESTRICTED` | `id NOT IN denied` |
//! | `ENUMERATED` | `id IN allowed AND id NOT IN denied` |
//!
//! The exclusion leaf is always present, so an explicit deny wins under
//! either selector. Tenant scoping is left to the caller.

use modkit_security::{AuthorizationDecision, IdFilter, ResourceId, Selector, Specification};

/// Consume `decision` and build the matching id predicate in catalog `L`.
#[must_use]
pub fn build_authorized_specification<Id, L>(
    decision: AuthorizationDecision<Id>,
) -> Specification<L>
where
    Id: ResourceId,
    L: From<IdFilter<Id>>,
{
    let (selector, allowed, denied) = decision.into_parts();
    let exclusion = Specification::leaf(L::from(IdFilter::NotIn(denied)));
    match selector {
        Selector::Unrestricted => exclusion,
        Selector::Enumerated => Specification::leaf(L::from(IdFilter::In(allowed))).and(exclusion),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use modkit_security::{LeafPredicate, TenantId};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct ById(IdFilter<TenantId>);

    impl From<IdFilter<TenantId>> for ById {
        fn from(filter: IdFilter<TenantId>) -> Self {
            Self(filter)
        }
    }

    impl LeafPredicate for ById {
        type Candidate = TenantId;

        fn is_satisfied_by(&self, candidate: &TenantId) -> bool {
            self.0.admits(candidate)
        }
    }

    fn id(raw: &str) -> TenantId {
        TenantId::parse_raw(raw).unwrap()
    }

    fn tenant() -> TenantId {
        id("PR-01")
    }

    #[test]
    fn unrestricted_is_a_single_exclusion_leaf() {
        let decision =
            AuthorizationDecision::unrestricted(tenant(), "iot.zone", "list", [id("zone-07")]);
        let spec: Specification<ById> = build_authorized_specification(decision);

        assert_eq!(
            spec,
            Specification::leaf(ById(IdFilter::NotIn([id("zone-07")].into_iter().collect())))
        );
        assert!(!spec.is_satisfied_by(&id("zone-07")));
        assert!(spec.is_satisfied_by(&id("zone-01")));
    }

    #[test]
    fn enumerated_conjoins_membership_and_exclusion() {
        let decision = AuthorizationDecision::enumerated(
            tenant(),
            "iot.feed",
            "read",
            [id("feed-01"), id("feed-02")],
            [id("feed-02")],
        );
        let spec: Specification<ById> = build_authorized_specification(decision);

        assert_eq!(spec.leaves().count(), 2);
        assert!(spec.is_satisfied_by(&id("feed-01")));
        assert!(!spec.is_satisfied_by(&id("feed-02")));
        assert!(!spec.is_satisfied_by(&id("feed-03")));
    }

    #[test]
    fn empty_enumerated_matches_nothing() {
        let decision =
            AuthorizationDecision::<TenantId>::enumerated(tenant(), "iot.zone", "list", [], []);
        let spec: Specification<ById> = build_authorized_specification(decision);

        assert!(!spec.is_satisfied_by(&id("zone-01")));
    }
}
