//! Entry points used by collaborators that read or write clients.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod client;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Submitted data broke a field rule; nothing was written.
    #[error("{0}")]
    Validation(String),

    /// Another client already uses the submitted email.
    #[error("{0}")]
    UniqueViolation(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message) => ServiceError::Validation(message),
            RepositoryError::UniqueViolation(message) => ServiceError::UniqueViolation(message),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
