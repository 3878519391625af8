//! Client implementation for the static AuthZ resolver plugin.

use async_trait::async_trait;
use authz_resolver_sdk::{
    AuthZResolverError, AuthZResolverGatewayClient, DecisionRequest, DecisionResponse,
};

use super::service::Service;

#[async_trait]
impl AuthZResolverGatewayClient for Service {
    async fn evaluate(
        &self,
        request: DecisionRequest,
    ) -> Result<DecisionResponse, AuthZResolverError> {
        Ok(Service::evaluate(self, &request))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use authz_resolver_sdk::pep::{PolicyEnforcer, ResourceType};
    use modkit_security::{ResourceId, SecurityContext, Selector, TenantId};
    use uuid::Uuid;

    #[tokio::test]
    async fn plugin_serves_an_enforcer() {
        let enforcer = PolicyEnforcer::new(Arc::new(Service::default()));
        let ctx = SecurityContext::builder()
            .subject_id(Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap())
            .build();

        let decision = enforcer
            .decision::<TenantId>(
                &ctx,
                &ResourceType { name: "iot.actor" },
                "list",
                &TenantId::parse_raw("PR-01").unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(decision.selector(), Selector::Unrestricted);
        assert!(decision.permits(&TenantId::parse_raw("actor-1").unwrap()));
    }
}
