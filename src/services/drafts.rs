//! Draft persistence: one snapshot per principal.

use crate::domain::auth::IdentityProvider;
use crate::domain::draft::StoredDraft;
use crate::domain::order::OrderFormDraft;
use crate::repository::{DraftReader, DraftWriter};
use crate::services::{ServiceError, ServiceResult, require_principal};

pub const SAVE_DRAFT: &str = "Failed to save draft";
pub const LOAD_DRAFT: &str = "Failed to load draft";
pub const DELETE_DRAFT: &str = "Failed to delete draft";

/// Stores `draft` as the principal's only draft, replacing any earlier one.
/// Repeating the call with the same draft is harmless.
pub fn save_draft<R, I>(repo: &R, identity: &I, draft: &OrderFormDraft) -> ServiceResult<StoredDraft>
where
    R: DraftWriter + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;

    repo.upsert_draft(&user_id, draft)
        .map_err(|err| ServiceError::repository(SAVE_DRAFT, err))
}

/// Returns `Ok(None)` when nothing was saved yet.
pub fn load_draft<R, I>(repo: &R, identity: &I) -> ServiceResult<Option<StoredDraft>>
where
    R: DraftReader + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;

    repo.get_draft(&user_id)
        .map_err(|err| ServiceError::repository(LOAD_DRAFT, err))
}

/// Removes the principal's draft; a missing draft is not an error.
pub fn delete_draft<R, I>(repo: &R, identity: &I) -> ServiceResult<()>
where
    R: DraftWriter + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;

    let deleted = repo
        .delete_draft(&user_id)
        .map_err(|err| ServiceError::repository(DELETE_DRAFT, err))?;
    log::debug!("Deleted {deleted} draft(s) for {user_id}");

    Ok(())
}
