use sea_orm::{Condition, ConnectionTrait, QueryFilter, QueryOrder};

use crate::DbError;
use crate::secure::ScopableEntity;
use modkit_security::properties;

/// Execute a translated condition against `E`'s table.
///
/// Rows are ordered by the entity's resource id column when it maps one.
///
/// # Errors
///
/// [`DbError`] if the statement fails.
pub async fn find_where<E, C>(conn: &C, condition: Condition) -> Result<Vec<E::Model>, DbError>
where
    E: ScopableEntity,
    C: ConnectionTrait,
{
    let mut select = E::find().filter(condition);
    if let Some(id) = E::resolve_property(properties::RESOURCE_ID) {
        select = select.order_by_asc(id);
    }
    Ok(select.all(conn).await?)
}
