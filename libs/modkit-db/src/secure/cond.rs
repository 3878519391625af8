use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, Condition, sea_query::Expr};

use crate::secure::ScopableEntity;
use modkit_security::{IdFilter, ResourceId, Specification, TenantId, properties};

/// Build a deny-all condition (`WHERE false`).
#[must_use]
pub fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// A predicate could not be turned into a native query.
///
/// Translation fails closed: the caller rejects the query instead of running
/// a broader one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("unsupported predicate variant `{variant}` for resource `{resource}`")]
    UnsupportedPredicateVariant {
        resource: &'static str,
        variant: String,
    },
}

/// Translates a resource's specification tree into a `SeaORM` [`Condition`].
///
/// Implementors match their leaf catalog exhaustively in
/// [`translate_leaf`](Self::translate_leaf); the recursion over conjunctions
/// is shared.
///
/// # Semantics
///
/// | Node | Condition |
/// |------|-----------|
/// | leaf | whatever `translate_leaf` returns |
/// | conjunction | `Condition::all()` of the translated children |
/// | `IdFilter::In(∅)` | `WHERE false` (see [`id_condition`]) |
/// | `IdFilter::NotIn(∅)` | no filtering |
pub trait QueryTranslator {
    type Leaf;

    /// Resource type name, used in errors and logs.
    const RESOURCE: &'static str;

    /// Translate one leaf.
    ///
    /// # Errors
    ///
    /// [`TranslateError::UnsupportedPredicateVariant`] if the leaf needs a
    /// property the storage entity does not map.
    fn translate_leaf(leaf: &Self::Leaf) -> Result<Condition, TranslateError>;

    /// Translate a whole tree.
    ///
    /// # Errors
    ///
    /// The first error raised by any leaf.
    fn translate(spec: &Specification<Self::Leaf>) -> Result<Condition, TranslateError> {
        match spec {
            Specification::Leaf(leaf) => Self::translate_leaf(leaf),
            Specification::And(conjunction) => conjunction
                .children()
                .iter()
                .try_fold(Condition::all(), |all, child| {
                    Ok(all.add(Self::translate(child)?))
                }),
        }
    }
}

/// Resolve an authorization property to a column of `E`.
///
/// # Errors
///
/// [`TranslateError::UnsupportedPredicateVariant`] (logged) when `E` does not
/// map `property`.
pub fn resolve_column<E: ScopableEntity>(
    resource: &'static str,
    property: &str,
) -> Result<E::Column, TranslateError> {
    E::resolve_property(property).ok_or_else(|| {
        tracing::error!(
            resource,
            property,
            "storage entity does not map authorization property; rejecting query"
        );
        TranslateError::UnsupportedPredicateVariant {
            resource,
            variant: property.to_owned(),
        }
    })
}

/// `owner_tenant_id = tenant`.
///
/// # Errors
///
/// See [`resolve_column`].
pub fn tenant_condition<E: ScopableEntity>(
    resource: &'static str,
    tenant: &TenantId,
) -> Result<Condition, TranslateError> {
    let col = resolve_column::<E>(resource, properties::OWNER_TENANT_ID)?;
    Ok(Condition::all().add(col.eq(tenant.as_str())))
}

/// `id IN (..)` / `id NOT IN (..)`.
///
/// # Errors
///
/// See [`resolve_column`].
pub fn id_condition<E: ScopableEntity, Id: ResourceId>(
    resource: &'static str,
    filter: &IdFilter<Id>,
) -> Result<Condition, TranslateError> {
    let col = resolve_column::<E>(resource, properties::RESOURCE_ID)?;
    Ok(match filter {
        IdFilter::In(ids) if ids.is_empty() => deny_all(),
        IdFilter::In(ids) => Condition::all().add(col.is_in(raw_values(ids))),
        IdFilter::NotIn(ids) if ids.is_empty() => Condition::all(),
        IdFilter::NotIn(ids) => Condition::all().add(col.is_not_in(raw_values(ids))),
    })
}

fn raw_values<Id: ResourceId>(ids: &BTreeSet<Id>) -> Vec<String> {
    ids.iter().map(|id| id.as_str().to_owned()).collect()
}
