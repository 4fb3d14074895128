//! Persistence boundary.
//!
//! Services only see the reader/writer traits; [`DieselRepository`] is the
//! SQLite implementation. Every query is scoped to the principal that owns
//! the rows.

use crate::db::{DbConnection, DbPool};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::draft::StoredDraft;
use crate::domain::order::OrderFormDraft;
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{ClientId, PrincipalId};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod client;
pub mod draft;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod profile;

pub trait DraftReader {
    /// `Ok(None)` when the principal never saved a draft.
    fn get_draft(&self, user_id: &PrincipalId) -> RepositoryResult<Option<StoredDraft>>;
}

pub trait DraftWriter {
    /// Inserts or replaces the principal's only draft in one statement.
    fn upsert_draft(
        &self,
        user_id: &PrincipalId,
        draft: &OrderFormDraft,
    ) -> RepositoryResult<StoredDraft>;
    /// Returns the number of removed rows; zero is not an error.
    fn delete_draft(&self, user_id: &PrincipalId) -> RepositoryResult<usize>;
}

pub trait ClientReader {
    fn get_client_by_id(
        &self,
        id: ClientId,
        user_id: &PrincipalId,
    ) -> RepositoryResult<Option<Client>>;
    /// Clients of `user_id`, newest first.
    fn list_clients(&self, user_id: &PrincipalId) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(
        &self,
        id: ClientId,
        user_id: &PrincipalId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
    fn delete_client(&self, id: ClientId, user_id: &PrincipalId) -> RepositoryResult<usize>;
}

pub trait ProfileReader {
    fn get_profile(&self, user_id: &PrincipalId) -> RepositoryResult<Option<Profile>>;
}

pub trait ProfileWriter {
    fn upsert_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
}

/// Diesel-backed repository. Built without a pool it reports
/// [`RepositoryError::NotConfigured`] from every call.
#[derive(Clone)]
pub struct DieselRepository {
    pool: Option<DbPool>,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Repository for a deployment without storage credentials.
    pub fn unavailable() -> Self {
        Self { pool: None }
    }

    pub fn is_configured(&self) -> bool {
        self.pool.is_some()
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        let pool = self.pool.as_ref().ok_or(RepositoryError::NotConfigured)?;
        Ok(pool.get()?)
    }
}
