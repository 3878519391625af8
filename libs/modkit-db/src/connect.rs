use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::DbError;

/// Pool options for [`connect_db`].
#[derive(Debug, Clone, Default)]
pub struct ConnectOpts {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    pub acquire_timeout: Option<Duration>,
}

/// Open a connection pool.
///
/// In-memory `SQLite` needs `max_conns = Some(1)`: every pooled connection
/// would otherwise see its own empty database.
///
/// # Errors
///
/// [`DbError::InvalidConfig`] for an empty DSN or `min_conns > max_conns`,
/// [`DbError::Sea`] if the pool cannot connect.
pub async fn connect_db(dsn: &str, opts: ConnectOpts) -> Result<DatabaseConnection, DbError> {
    if dsn.trim().is_empty() {
        return Err(DbError::InvalidConfig("empty DSN".to_owned()));
    }
    if let (Some(min), Some(max)) = (opts.min_conns, opts.max_conns)
        && min > max
    {
        return Err(DbError::InvalidConfig(format!(
            "min_conns ({min}) exceeds max_conns ({max})"
        )));
    }

    let mut options = ConnectOptions::new(dsn.to_owned());
    options.sqlx_logging(false);
    if let Some(max) = opts.max_conns {
        options.max_connections(max);
    }
    if let Some(min) = opts.min_conns {
        options.min_connections(min);
    }
    if let Some(timeout) = opts.acquire_timeout {
        options.acquire_timeout(timeout);
    }

    tracing::debug!(max_conns = ?opts.max_conns, "connecting database pool");
    Ok(Database::connect(options).await?)
}
