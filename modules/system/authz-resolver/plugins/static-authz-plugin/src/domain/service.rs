//! Service implementation for the static `AuthZ` resolver plugin.

use authz_resolver_sdk::{DecisionRequest, DecisionResponse};
use modkit_security::Selector;
use tracing::debug;

use crate::config::{AuthzMode, StaticAuthzPluginConfig};

/// Static `AuthZ` resolver service.
///
/// In `allow_all` mode every request gets an unrestricted grant with no
/// denials. In `rules` mode the first rule matching tenant, resource type and
/// action answers; a request no rule matches gets an enumerated decision with
/// an empty allow-set, which authorizes nothing.
#[derive(Debug, Clone, Default)]
pub struct Service {
    config: StaticAuthzPluginConfig,
}

impl Service {
    #[must_use]
    pub fn new(config: StaticAuthzPluginConfig) -> Self {
        Self { config }
    }

    /// Evaluate a decision request.
    #[must_use]
    pub fn evaluate(&self, request: &DecisionRequest) -> DecisionResponse {
        match self.config.mode {
            AuthzMode::AllowAll => {
                DecisionResponse::for_request(request, Selector::Unrestricted, vec![], vec![])
            }
            AuthzMode::Rules => {
                let rule = self.config.rules.iter().find(|rule| {
                    rule.matches(
                        &request.context.tenant_id,
                        &request.resource.resource_type,
                        &request.action.name,
                    )
                });
                if let Some(rule) = rule {
                    DecisionResponse::for_request(
                        request,
                        rule.selector,
                        rule.allowed_ids.clone(),
                        rule.denied_ids.clone(),
                    )
                } else {
                    debug!(
                        tenant = %request.context.tenant_id,
                        resource_type = %request.resource.resource_type,
                        action = %request.action.name,
                        "no static rule matched; denying"
                    );
                    DecisionResponse::for_request(request, Selector::Enumerated, vec![], vec![])
                }
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::StaticRule;
    use authz_resolver_sdk::pep::build_decision_request;
    use modkit_security::{ResourceId, SecurityContext, TenantId};

    fn make_request(tenant: &str, resource_type: &str, action: &str) -> DecisionRequest {
        build_decision_request(
            &SecurityContext::anonymous(),
            resource_type,
            action,
            &TenantId::parse_raw(tenant).unwrap(),
        )
    }

    fn rules_service() -> Service {
        Service::new(StaticAuthzPluginConfig {
            mode: AuthzMode::Rules,
            rules: vec![StaticRule {
                tenant_id: "PR-01".to_owned(),
                resource_type: "iot.zone".to_owned(),
                actions: vec!["list".to_owned()],
                selector: Selector::Unrestricted,
                allowed_ids: vec![],
                denied_ids: vec!["zone-07".to_owned()],
            }],
        })
    }

    #[test]
    fn allow_all_grants_unrestricted() {
        let service = Service::default();
        let response = service.evaluate(&make_request("PR-01", "iot.device", "list"));

        assert_eq!(response.selector, Selector::Unrestricted);
        assert!(response.denied_ids.is_empty());
        assert_eq!(response.tenant_id, "PR-01");
        assert_eq!(response.resource_type, "iot.device");
    }

    #[test]
    fn matching_rule_answers() {
        let response = rules_service().evaluate(&make_request("PR-01", "iot.zone", "list"));

        assert_eq!(response.selector, Selector::Unrestricted);
        assert_eq!(response.denied_ids, ["zone-07"]);
    }

    #[test]
    fn unmatched_action_is_denied() {
        let response = rules_service().evaluate(&make_request("PR-01", "iot.zone", "read"));

        assert_eq!(response.selector, Selector::Enumerated);
        assert!(response.allowed_ids.is_empty());
    }

    #[test]
    fn other_tenant_is_denied() {
        let response = rules_service().evaluate(&make_request("PR-02", "iot.zone", "list"));

        assert_eq!(response.selector, Selector::Enumerated);
        assert!(response.allowed_ids.is_empty());
        assert_eq!(response.tenant_id, "PR-02");
    }
}
