#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! IoT registry module.
//!
//! Every read goes through the same pipeline: an external authorization
//! decision becomes an id predicate, which is conjoined with tenant scoping
//! and the caller's filters, keyed for the query cache and, on a miss,
//! translated into a `SeaORM` condition.
//!
//! - [`domain::catalog`] - per-resource leaf catalogs
//! - [`domain::service`] - use cases and [`AppServices`](domain::service::AppServices)
//! - [`infra`] - storage entities, translators and cache key generators
//! - [`config`] - layered module configuration

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::IotRegistryConfig;
pub use domain::error::DomainError;
pub use domain::service::{AppServices, ServiceConfig};
