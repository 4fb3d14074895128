//! Application-owned profile attributes, keyed by principal.

use crate::domain::auth::{AuthenticatedUser, IdentityProvider};
use crate::domain::profile::Profile;
use crate::forms::profile::UpdateProfileForm;
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::{ServiceError, ServiceResult, require_principal};

pub const LOAD_PROFILE: &str = "Failed to load profile";
pub const SAVE_PROFILE: &str = "Failed to save profile";

pub fn get_profile<R, I>(repo: &R, identity: &I) -> ServiceResult<Option<Profile>>
where
    R: ProfileReader + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;

    repo.get_profile(&user_id)
        .map_err(|err| ServiceError::repository(LOAD_PROFILE, err))
}

/// Writes the token claims of a freshly signed-in user to their profile.
/// A stored company survives when `company` is `None`.
pub fn sync_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    company: Option<String>,
) -> ServiceResult<Profile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    let user_id = require_principal(user)?;

    let company = match company {
        Some(company) => Some(company),
        None => repo
            .get_profile(&user_id)
            .map_err(|err| ServiceError::repository(LOAD_PROFILE, err))?
            .and_then(|profile| profile.company),
    };
    let new_profile = user.to_new_profile(company)?;

    repo.upsert_profile(&new_profile)
        .map_err(|err| ServiceError::repository(SAVE_PROFILE, err))
}

pub fn update_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &UpdateProfileForm,
) -> ServiceResult<Profile>
where
    R: ProfileWriter + ?Sized,
{
    require_principal(user)?;
    let new_profile = form.to_new_profile(user)?;

    repo.upsert_profile(&new_profile)
        .map_err(|err| ServiceError::repository(SAVE_PROFILE, err))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Utc;

    use super::*;
    use crate::domain::profile::{AuthProvider, NewProfile};
    use crate::domain::types::{PrincipalId, ProfileId};
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    #[derive(Default)]
    struct MockRepo {
        stored: RefCell<Option<Profile>>,
        unconfigured: bool,
    }

    impl ProfileReader for MockRepo {
        fn get_profile(&self, user_id: &PrincipalId) -> RepositoryResult<Option<Profile>> {
            if self.unconfigured {
                return Err(RepositoryError::NotConfigured);
            }
            Ok(self
                .stored
                .borrow()
                .clone()
                .filter(|p| &p.user_id == user_id))
        }
    }

    impl ProfileWriter for MockRepo {
        fn upsert_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile> {
            if self.unconfigured {
                return Err(RepositoryError::NotConfigured);
            }
            let now = Utc::now().naive_utc();
            let profile = Profile {
                id: ProfileId::new(1)?,
                user_id: new_profile.user_id.clone(),
                email: new_profile.email.clone(),
                full_name: new_profile.full_name.clone(),
                company: new_profile.company.clone(),
                avatar_url: new_profile.avatar_url.clone(),
                provider: new_profile.provider,
                created_at: now,
                updated_at: now,
            };
            self.stored.replace(Some(profile.clone()));
            Ok(profile)
        }
    }

    fn google_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "google-oauth2|1".to_string(),
            email: "sam@example.com".to_string(),
            name: Some("Sam".to_string()),
            picture: None,
            provider: AuthProvider::Google,
            exp: 0,
        }
    }

    #[test]
    fn sync_keeps_stored_company() {
        let repo = MockRepo::default();
        sync_profile(&repo, &google_user(), Some("Sam & Co".to_string())).unwrap();

        let mut renamed = google_user();
        renamed.name = Some("Samantha".to_string());
        let profile = sync_profile(&repo, &renamed, None).unwrap();

        assert_eq!(profile.full_name.as_str(), "Samantha");
        assert_eq!(profile.company.as_deref(), Some("Sam & Co"));
        assert_eq!(profile.provider, AuthProvider::Google);
    }

    #[test]
    fn update_uses_form_values() {
        let repo = MockRepo::default();
        let form = UpdateProfileForm {
            full_name: "Sam Q.".to_string(),
            company: String::new(),
        };
        let profile = update_profile(&repo, &google_user(), &form).unwrap();
        assert_eq!(profile.full_name.as_str(), "Sam Q.");
        assert_eq!(profile.company, None);
        assert_eq!(
            get_profile(&repo, &google_user()).unwrap().map(|p| p.full_name),
            Some(profile.full_name)
        );
    }

    #[test]
    fn unconfigured_storage_degrades() {
        let repo = MockRepo {
            unconfigured: true,
            ..Default::default()
        };
        assert!(matches!(
            get_profile(&repo, &google_user()),
            Err(ServiceError::NotConfigured)
        ));
    }
}
