//! Use cases called by the HTTP handlers and the wizards.
//!
//! Every operation that touches persisted data resolves the principal first
//! and fails with [`ServiceError::Unauthorized`] when there is none.

use thiserror::Error;

use crate::domain::auth::IdentityProvider;
use crate::domain::types::{PrincipalId, TypeConstraintError};
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod clients;
pub mod drafts;
pub mod profiles;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    /// Storage call failed; retrying is safe.
    #[error("{operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("Service unavailable: storage is not configured")]
    NotConfigured,

    #[error("{0}")]
    Form(String),

    #[error("Invalid value: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Lifts a repository failure into an operation-specific error and logs it.
    pub fn repository(operation: &'static str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotConfigured => {
                log::warn!("{operation}: storage is not configured");
                ServiceError::NotConfigured
            }
            RepositoryError::NotFound => ServiceError::NotFound,
            err => {
                log::error!("{operation}: {err}");
                ServiceError::Transport {
                    operation,
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form(err.to_string())
    }
}

/// Resolves the current principal or fails fast.
pub fn require_principal<I>(identity: &I) -> ServiceResult<PrincipalId>
where
    I: IdentityProvider + ?Sized,
{
    identity
        .current_principal()
        .ok_or(ServiceError::Unauthorized)
}
