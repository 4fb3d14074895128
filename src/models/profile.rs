use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::profile::{AuthProvider, NewProfile as DomainNewProfile, Profile as DomainProfile};
use crate::domain::types::{
    DisplayName, EmailAddress, PrincipalId, ProfileId, TypeConstraintError, WebsiteUrl,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct Profile {
    pub id: i32,
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile<'a> {
    pub user_id: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub company: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
    pub provider: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Profile> for DomainProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProfileId::new(profile.id)?,
            user_id: PrincipalId::new(profile.user_id)?,
            email: EmailAddress::new(profile.email)?,
            full_name: DisplayName::new(profile.full_name)?,
            company: profile.company,
            avatar_url: profile.avatar_url.map(WebsiteUrl::new).transpose()?,
            provider: AuthProvider::try_from(profile.provider.as_str())?,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }
}

impl<'a> NewProfile<'a> {
    pub fn new(profile: &'a DomainNewProfile, now: NaiveDateTime) -> Self {
        Self {
            user_id: profile.user_id.as_str(),
            email: profile.email.as_str(),
            full_name: profile.full_name.as_str(),
            company: profile.company.as_deref(),
            avatar_url: profile.avatar_url.as_ref().map(|url| url.as_str()),
            provider: profile.provider.to_string(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn unknown_provider_is_rejected() {
        let now = Utc::now().naive_utc();
        let row = Profile {
            id: 1,
            user_id: "p-1".into(),
            email: "p@example.com".into(),
            full_name: "P".into(),
            company: None,
            avatar_url: None,
            provider: "github".into(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            DomainProfile::try_from(row),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }
}
