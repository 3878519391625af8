use std::marker::PhantomData;

use async_trait::async_trait;
use modkit_db::secure::{QueryTranslator, ScopableEntity, find_where};
use modkit_security::Specification;
use sea_orm::DatabaseConnection;

use crate::domain::error::DomainError;
use crate::domain::repos::ResourceRepository;
use crate::domain::service::CatalogResource;
use crate::infra::storage::entity::{actor, automation, device, feed, zone};
use crate::infra::storage::translators::{
    ActorTranslator, AutomationTranslator, DeviceTranslator, FeedTranslator, ZoneTranslator,
};

pub type DeviceRepository = OrmRepository<device::Entity, DeviceTranslator>;
pub type ZoneRepository = OrmRepository<zone::Entity, ZoneTranslator>;
pub type FeedRepository = OrmRepository<feed::Entity, FeedTranslator>;
pub type AutomationRepository = OrmRepository<automation::Entity, AutomationTranslator>;
pub type ActorRepository = OrmRepository<actor::Entity, ActorTranslator>;

/// `SeaORM` repository for entity `E`, translating with `T`.
pub struct OrmRepository<E, T> {
    db: DatabaseConnection,
    _marker: PhantomData<fn() -> (E, T)>,
}

impl<E, T> OrmRepository<E, T> {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<R, E, T> ResourceRepository<R> for OrmRepository<E, T>
where
    R: CatalogResource,
    E: ScopableEntity,
    T: QueryTranslator<Leaf = R::Leaf>,
    R::Record: TryFrom<E::Model, Error = DomainError>,
{
    async fn find(&self, spec: &Specification<R::Leaf>) -> Result<Vec<R::Record>, DomainError> {
        let condition = T::translate(spec)?;
        let rows = find_where::<E, _>(&self.db, condition).await?;
        rows.into_iter()
            .map(<R::Record as TryFrom<E::Model>>::try_from)
            .collect()
    }
}
