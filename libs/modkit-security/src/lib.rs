#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! ModKit security library.
//!
//! - [`Specification`] - predicate algebra over an aggregate type
//! - [`ResourceId`], [`TenantId`], [`resource_id!`] - typed identifiers
//! - [`AuthorizationDecision`], [`Selector`], [`IdFilter`] - external policy decisions
//! - [`SecurityContext`] - the authenticated caller

pub mod authorization;
pub mod context;
pub mod error;
pub mod identifier;
pub mod specification;

pub use authorization::{AuthorizationDecision, IdFilter, Selector, properties};
pub use context::{SecurityContext, SecurityContextBuilder};
pub use error::InvalidPredicateArgument;
pub use identifier::{MAX_ID_LEN, ResourceId, TenantId};
pub use specification::{Conjunction, LeafPredicate, Leaves, Specification};
