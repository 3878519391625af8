use modkit_db::DbError;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::debug;

use crate::infra::storage::entity::{actor, automation, device, feed, zone};

/// Create the registry tables that do not exist yet.
///
/// # Errors
///
/// [`DbError`] if a `CREATE TABLE` statement fails.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbError> {
    create_table(db, device::Entity).await?;
    create_table(db, zone::Entity).await?;
    create_table(db, feed::Entity).await?;
    create_table(db, automation::Entity).await?;
    create_table(db, actor::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbError> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    debug!(table = entity.table_name(), "table ensured");
    Ok(())
}
