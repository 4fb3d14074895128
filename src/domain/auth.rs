//! Identity contract shared with the external authentication provider.
//!
//! The provider verifies credentials and issues bearer tokens; this crate only
//! reads the resulting claims and keys all data by the opaque `sub` claim.

use serde::{Deserialize, Serialize};

use crate::domain::profile::{AuthProvider, NewProfile};
use crate::domain::types::{DisplayName, EmailAddress, PrincipalId, TypeConstraintError, WebsiteUrl};

/// Claims carried by an identity provider access token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Opaque principal identifier.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL supplied by OAuth providers.
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub provider: AuthProvider,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Profile attributes derived from the token. Falls back to the local part
    /// of the email when the provider sent no display name.
    pub fn to_new_profile(&self, company: Option<String>) -> Result<NewProfile, TypeConstraintError> {
        let email = EmailAddress::new(self.email.as_str())?;
        let fallback = email.as_str().split('@').next().unwrap_or_default().to_string();
        let full_name = self
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(fallback);

        Ok(NewProfile {
            user_id: PrincipalId::new(self.sub.as_str())?,
            email,
            full_name: DisplayName::new(full_name)?,
            company: company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            avatar_url: self
                .picture
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(WebsiteUrl::new)
                .transpose()?,
            provider: self.provider,
        })
    }
}

/// Source of the current principal, the only identity fact the core depends on.
pub trait IdentityProvider {
    /// Returns `None` when no session is present.
    fn current_principal(&self) -> Option<PrincipalId>;
}

impl IdentityProvider for AuthenticatedUser {
    fn current_principal(&self) -> Option<PrincipalId> {
        PrincipalId::new(self.sub.as_str()).ok()
    }
}

impl<T: IdentityProvider> IdentityProvider for Option<T> {
    fn current_principal(&self) -> Option<PrincipalId> {
        self.as_ref().and_then(IdentityProvider::current_principal)
    }
}

impl IdentityProvider for PrincipalId {
    fn current_principal(&self) -> Option<PrincipalId> {
        Some(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "8d0c7a1e".to_string(),
            email: "Jane@Example.com".to_string(),
            name: None,
            picture: Some("https://cdn.example.com/a.png".to_string()),
            provider: AuthProvider::Google,
            exp: 0,
        }
    }

    #[test]
    fn profile_falls_back_to_email_local_part() {
        let profile = oauth_user().to_new_profile(Some("  ".to_string())).unwrap();
        assert_eq!(profile.full_name.as_str(), "jane");
        assert_eq!(profile.email.as_str(), "jane@example.com");
        assert_eq!(profile.company, None);
        assert_eq!(profile.provider, AuthProvider::Google);
    }

    #[test]
    fn missing_session_has_no_principal() {
        let none: Option<AuthenticatedUser> = None;
        assert!(none.current_principal().is_none());
        assert_eq!(
            Some(oauth_user()).current_principal().map(String::from),
            Some("8d0c7a1e".to_string())
        );
    }
}
