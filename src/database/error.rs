use thiserror::Error;

use crate::query::QueryError;

/// Failures raised by persistence adapters. Services decide which of these
/// are business conditions and which are internal errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Unexpected stored value: {0}")]
    CorruptRow(String),

    #[error("Query build error: {0}")]
    Build(#[from] QueryError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return RepositoryError::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKeyViolation(constraint);
            }
        }
        RepositoryError::Sqlx(err)
    }
}
