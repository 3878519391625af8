use sea_orm::DbErr;

/// Database layer error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sea(#[from] DbErr),

    #[error("invalid connection options: {0}")]
    InvalidConfig(String),
}
