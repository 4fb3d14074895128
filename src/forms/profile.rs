use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::profile::NewProfile;
use crate::domain::types::DisplayName;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
/// Profile attributes the principal may edit themselves.
pub struct UpdateProfileForm {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(length(max = 255))]
    pub company: String,
}

impl UpdateProfileForm {
    /// Combines the edited attributes with the identity claims of `user`.
    pub fn to_new_profile(&self, user: &AuthenticatedUser) -> Result<NewProfile, FormError> {
        self.validate()?;

        let mut profile = user.to_new_profile(Some(self.company.clone()))?;
        profile.full_name = DisplayName::new(self.full_name.as_str())?;
        Ok(profile)
    }
}
