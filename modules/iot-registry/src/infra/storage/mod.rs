//! `SeaORM` storage: entities, specification translators and repositories.

pub mod entity;
mod mapper;
mod repo;
mod schema;
mod translators;

pub use repo::{
    ActorRepository, AutomationRepository, DeviceRepository, FeedRepository, OrmRepository,
    ZoneRepository,
};
pub use schema::create_schema;
pub use translators::{
    ActorTranslator, AutomationTranslator, DeviceTranslator, FeedTranslator, ZoneTranslator,
};
