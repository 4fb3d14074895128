use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Storage failures as seen by the services. Only [`RepositoryError::NotFound`]
/// and [`RepositoryError::NotConfigured`] are expected in normal operation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Storage is not configured")]
    NotConfigured,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A unique or check constraint rejected the write.
    #[error("Conflicting record: {0}")]
    Conflict(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored row no longer satisfies the domain rules.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::CheckViolation),
                info,
            ) => RepositoryError::Conflict(format!("{kind:?}: {}", info.message())),
            DieselError::DeserializationError(e) => RepositoryError::MalformedRecord(e.to_string()),
            other => RepositoryError::QueryFailed(other.to_string()),
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

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::MalformedRecord(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::MalformedRecord(format!("draft snapshot: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_maps_to_not_found() {
        assert!(matches!(
            RepositoryError::from(DieselError::NotFound),
            RepositoryError::NotFound
        ));
    }

    #[test]
    fn broken_snapshot_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::MalformedRecord(_)
        ));
    }
}
