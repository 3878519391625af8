//! PEP (Policy Enforcement Point) helpers.
//!
//! - [`request_builder::build_decision_request`] - builds a
//!   [`DecisionRequest`](crate::DecisionRequest) from a `SecurityContext`
//! - [`compiler::compile_decision`] - validates a response and types its identifiers
//! - [`builder::build_authorized_specification`] - turns a decision into a predicate
//! - [`enforcer::PolicyEnforcer`] - the whole flow, bounded by a timeout

pub mod builder;
pub mod compiler;
pub mod enforcer;
pub mod request_builder;

pub use builder::build_authorized_specification;
pub use compiler::{DecisionCompileError, compile_decision};
pub use enforcer::{DEFAULT_DECISION_TIMEOUT, EnforcerError, PolicyEnforcer, ResourceType};
pub use request_builder::build_decision_request;
