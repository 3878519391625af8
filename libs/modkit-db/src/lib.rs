#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! ModKit database library.
//!
//! - [`secure`] - specification → `SeaORM` condition translation and execution
//! - [`cache`] - canonical cache keys and the query cache contract
//! - [`connect_db`] - connection pool bootstrap

pub mod cache;
mod connect;
mod error;
pub mod secure;

pub use connect::{ConnectOpts, connect_db};
pub use error::DbError;
