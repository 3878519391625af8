//! Configuration for the static AuthZ resolver plugin.

use modkit_security::Selector;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthzPluginConfig {
    /// Authorization mode.
    pub mode: AuthzMode,

    /// Decision rules, consulted in order in `rules` mode.
    pub rules: Vec<StaticRule>,
}

impl Default for StaticAuthzPluginConfig {
    fn default() -> Self {
        Self {
            mode: AuthzMode::AllowAll,
            rules: Vec::new(),
        }
    }
}

/// Authorization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthzMode {
    /// Unrestricted grant with no denials for every request.
    #[default]
    AllowAll,
    /// First matching rule wins; unmatched requests get an empty allow-set.
    Rules,
}

/// One static decision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticRule {
    pub tenant_id: String,
    pub resource_type: String,
    /// Actions the rule answers. Empty matches any action.
    #[serde(default)]
    pub actions: Vec<String>,
    pub selector: Selector,
    #[serde(default)]
    pub allowed_ids: Vec<String>,
    #[serde(default)]
    pub denied_ids: Vec<String>,
}

impl StaticRule {
    #[must_use]
    pub fn matches(&self, tenant_id: &str, resource_type: &str, action: &str) -> bool {
        self.tenant_id == tenant_id
            && self.resource_type == resource_type
            && (self.actions.is_empty() || self.actions.iter().any(|a| a == action))
    }
}
