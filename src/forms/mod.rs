//! Form definitions backing the client and profile endpoints.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod clients;
pub mod profile;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}
