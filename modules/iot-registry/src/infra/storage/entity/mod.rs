//! `SeaORM` entities.
//!
//! Identifiers, tenants and lifecycle states are stored in their raw string
//! form; `mapper` re-validates them on the way out.

pub mod actor;
pub mod automation;
pub mod device;
pub mod feed;
pub mod zone;

/// Implement [`ScopableEntity`](modkit_db::secure::ScopableEntity) for an
/// entity with `tenant_id` and `id` columns.
macro_rules! scopable {
    ($module:ident) => {
        impl modkit_db::secure::ScopableEntity for $module::Entity {
            fn resolve_property(property: &str) -> Option<Self::Column> {
                match property {
                    modkit_security::properties::OWNER_TENANT_ID => Some($module::Column::TenantId),
                    modkit_security::properties::RESOURCE_ID => Some($module::Column::Id),
                    _ => None,
                }
            }
        }
    };
}

scopable!(device);
scopable!(zone);
scopable!(feed);
scopable!(automation);
scopable!(actor);
