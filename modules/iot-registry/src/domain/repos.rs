use async_trait::async_trait;
use modkit_security::Specification;

use crate::domain::error::DomainError;
use crate::domain::service::CatalogResource;

/// Storage collaborator for one resource type.
///
/// Implementations translate the specification into their native query and
/// execute it; a specification they cannot translate is an error, never an
/// unfiltered read.
#[async_trait]
pub trait ResourceRepository<R: CatalogResource>: Send + Sync {
    /// Records satisfying `spec`, ordered by id.
    ///
    /// # Errors
    ///
    /// [`DomainError::UnsupportedPredicate`] if `spec` cannot be translated;
    /// storage failures otherwise.
    async fn find(&self, spec: &Specification<R::Leaf>) -> Result<Vec<R::Record>, DomainError>;
}
