//! Application-owned profile attributes for an authenticated principal.
//!
//! Credentials never reach this table; the identity provider owns them.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    DisplayName, EmailAddress, PrincipalId, ProfileId, TypeConstraintError, WebsiteUrl,
};

/// How the principal signed in.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Email,
    Google,
    Apple,
}

impl Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthProvider::Email => write!(f, "email"),
            AuthProvider::Google => write!(f, "google"),
            AuthProvider::Apple => write!(f, "apple"),
        }
    }
}

impl TryFrom<&str> for AuthProvider {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "email" => Ok(AuthProvider::Email),
            "google" => Ok(AuthProvider::Google),
            "apple" => Ok(AuthProvider::Apple),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown auth provider `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: PrincipalId,
    pub email: EmailAddress,
    pub full_name: DisplayName,
    pub company: Option<String>,
    pub avatar_url: Option<WebsiteUrl>,
    pub provider: AuthProvider,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Profile values written on sign-up or after an OAuth login. Writing the same
/// principal twice updates the stored row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewProfile {
    pub user_id: PrincipalId,
    pub email: EmailAddress,
    pub full_name: DisplayName,
    pub company: Option<String>,
    pub avatar_url: Option<WebsiteUrl>,
    pub provider: AuthProvider,
}
