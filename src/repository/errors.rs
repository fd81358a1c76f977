use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored or submitted value broke a domain rule.
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A unique index rejected the write, e.g. a client email already in use.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key, not-null or check constraint rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn from_database_error(
    kind: DatabaseErrorKind,
    info: &(dyn DatabaseErrorInformation + Send + Sync),
) -> RepositoryError {
    let message = info.message().to_string();
    let constraint = match kind {
        DatabaseErrorKind::UniqueViolation => return RepositoryError::UniqueViolation(message),
        DatabaseErrorKind::ForeignKeyViolation => "foreign key",
        DatabaseErrorKind::NotNullViolation => "not null",
        DatabaseErrorKind::CheckViolation => "check",
        _ => return RepositoryError::DatabaseError(message),
    };
    RepositoryError::ConstraintViolation(format!("{constraint}: {message}"))
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => from_database_error(kind, info.as_ref()),
            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("Row conversion error: {e}"))
            }
            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction error: {err}"))
            }
            other => RepositoryError::Unexpected(format!("Unexpected diesel error: {other}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
