#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! AuthZ Resolver SDK
//!
//! This crate provides the public API for the `authz_resolver` module:
//!
//! - [`AuthZResolverGatewayClient`] - decision source trait consumed by PEPs
//! - [`DecisionRequest`], [`DecisionResponse`] - decision wire models
//! - [`AuthZResolverError`] - error types
//! - [`pep`] - PEP helpers (request builder, decision compiler, authorized
//!   specification builder, enforcer)
//!
//! ## Usage
//!
//! ```ignore
//! use authz_resolver_sdk::pep::{PolicyEnforcer, ResourceType};
//!
//! const ZONE: ResourceType = ResourceType { name: "iot.zone" };
//!
//! let enforcer = PolicyEnforcer::new(authz.clone());
//! let auth: Specification<ZoneLeaf> = enforcer
//!     .authorized_specification::<ZoneId, _>(&ctx, &ZONE, "list", &tenant)
//!     .await?;
//! let spec = auth.and(ZoneLeaf::belongs_to_tenant(tenant).into());
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod pep;

pub use api::AuthZResolverGatewayClient;
pub use error::AuthZResolverError;
pub use models::{Action, Context, DecisionRequest, DecisionResponse, Resource, Subject};
