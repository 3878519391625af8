//! Wiring: configuration in, [`AppServices`] out.

use std::sync::Arc;

use anyhow::Context;
use authz_resolver_sdk::AuthZResolverGatewayClient;
use modkit_db::cache::QueryCache;
use modkit_db::connect_db;
use tracing::info;

use crate::config::IotRegistryConfig;
use crate::domain::service::AppServices;
use crate::infra::storage::create_schema;

/// Connect to the configured database, ensure the schema and build the
/// services.
///
/// # Errors
///
/// If the database cannot be reached or the schema cannot be created.
pub async fn build_services(
    config: &IotRegistryConfig,
    authz: Arc<dyn AuthZResolverGatewayClient>,
    cache: &Arc<dyn QueryCache>,
) -> anyhow::Result<AppServices> {
    let db = connect_db(&config.database.dsn, config.database.connect_opts())
        .await
        .context("connecting to the registry database")?;
    create_schema(&db)
        .await
        .context("creating registry tables")?;

    info!(
        cache_ttl = ?config.service.cache_ttl,
        decision_timeout = ?config.service.decision_timeout,
        "iot-registry services ready"
    );
    Ok(AppServices::new(&db, authz, cache, &config.service))
}
