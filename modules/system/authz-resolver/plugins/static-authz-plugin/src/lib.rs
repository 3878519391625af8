#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthZ` resolver plugin.
//!
//! Answers decision requests from configuration: either an unrestricted
//! grant for everything (`allow_all`) or a list of per-tenant rules.

pub mod config;
pub mod domain;

pub use config::{AuthzMode, StaticAuthzPluginConfig, StaticRule};
pub use domain::service::Service;
