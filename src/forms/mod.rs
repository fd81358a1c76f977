//! Caller-facing payloads validated before they reach the domain layer.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod client;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
}
