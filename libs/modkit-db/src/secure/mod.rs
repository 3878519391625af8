//! Secure query building.
//!
//! Specifications never reach the database directly: a per-resource
//! [`QueryTranslator`] turns them into a `SeaORM` [`Condition`](sea_orm::Condition),
//! resolving authorization properties through [`ScopableEntity`].

mod cond;
mod runner;

pub use cond::{
    QueryTranslator, TranslateError, deny_all, id_condition, resolve_column, tenant_condition,
};
pub use runner::find_where;

use sea_orm::EntityTrait;

/// Entity whose columns can be addressed by authorization property name.
///
/// Returning `None` for a property makes every predicate that needs it fail
/// closed with [`TranslateError::UnsupportedPredicateVariant`].
pub trait ScopableEntity: EntityTrait {
    fn resolve_property(property: &str) -> Option<Self::Column>;
}
