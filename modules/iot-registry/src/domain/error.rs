use std::time::Duration;

use authz_resolver_sdk::pep::EnforcerError;
use modkit_db::DbError;
use modkit_db::cache::CacheError;
use modkit_db::secure::TranslateError;
use modkit_security::InvalidPredicateArgument;

/// Errors surfaced by registry use cases.
///
/// None of them is recovered into a broader query: the request is rejected.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// No usable authorization decision (failed, timed out or unparsable).
    #[error("authorization unavailable: {reason}")]
    AuthorizationUnavailable { reason: String },

    #[error(transparent)]
    InvalidArgument(#[from] InvalidPredicateArgument),

    /// A predicate reached a translator that cannot express it.
    #[error("internal error: {0}")]
    UnsupportedPredicate(#[from] TranslateError),

    #[error("{resource} `{id}` not found")]
    NotFound { resource: &'static str, id: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("storage call timed out after {0:?}")]
    StorageTimeout(Duration),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("cache call timed out after {0:?}")]
    CacheTimeout(Duration),

    /// A stored row does not map to a valid record.
    #[error("corrupt {resource} record: {reason}")]
    CorruptRecord {
        resource: &'static str,
        reason: String,
    },
}

impl DomainError {
    #[must_use]
    pub fn not_found(resource: &'static str, id: &str) -> Self {
        Self::NotFound {
            resource,
            id: id.to_owned(),
        }
    }

    #[must_use]
    pub fn corrupt(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::CorruptRecord {
            resource,
            reason: reason.into(),
        }
    }
}

impl From<EnforcerError> for DomainError {
    fn from(e: EnforcerError) -> Self {
        Self::AuthorizationUnavailable {
            reason: e.to_string(),
        }
    }
}

impl From<DbError> for DomainError {
    fn from(e: DbError) -> Self {
        Self::Storage(e.to_string())
    }
}
