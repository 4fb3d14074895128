use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, ClientName, EmailAddress, PhoneNumber, PrincipalId, TypeConstraintError, WebsiteUrl,
};

/// A client owned by one principal and offered by the assignment wizard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub user_id: PrincipalId,
    pub full_name: ClientName,
    pub company: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub office_email: Option<EmailAddress>,
    pub office_phone: Option<PhoneNumber>,
    pub mobile_phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Optional free-text columns are stored as `NULL` rather than `""`.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Client {
    /// Builds a client from raw storage values, re-validating every field.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        id: i32,
        user_id: String,
        full_name: String,
        company: Option<String>,
        website: Option<String>,
        office_email: Option<String>,
        office_phone: Option<String>,
        mobile_phone: Option<String>,
        address: Option<String>,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            id: ClientId::new(id)?,
            user_id: PrincipalId::new(user_id)?,
            full_name: ClientName::new(full_name)?,
            company: trimmed(company),
            website: trimmed(website).map(WebsiteUrl::new).transpose()?,
            office_email: trimmed(office_email).map(EmailAddress::new).transpose()?,
            office_phone: trimmed(office_phone).map(PhoneNumber::new).transpose()?,
            mobile_phone: trimmed(mobile_phone).map(PhoneNumber::new).transpose()?,
            address: trimmed(address),
            created_at,
            updated_at,
        })
    }
}

/// Contact fields shared by inserts and updates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClientDetails {
    pub full_name: ClientName,
    pub company: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub office_email: Option<EmailAddress>,
    pub office_phone: Option<PhoneNumber>,
    pub mobile_phone: Option<PhoneNumber>,
    pub address: Option<String>,
}

impl ClientDetails {
    #[must_use]
    pub fn new(full_name: ClientName) -> Self {
        Self {
            full_name,
            company: None,
            website: None,
            office_email: None,
            office_phone: None,
            mobile_phone: None,
            address: None,
        }
    }

    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = trimmed(Some(company.into()));
        self
    }

    #[must_use]
    pub fn website(mut self, website: WebsiteUrl) -> Self {
        self.website = Some(website);
        self
    }

    #[must_use]
    pub fn office_email(mut self, email: EmailAddress) -> Self {
        self.office_email = Some(email);
        self
    }

    #[must_use]
    pub fn office_phone(mut self, phone: PhoneNumber) -> Self {
        self.office_phone = Some(phone);
        self
    }

    #[must_use]
    pub fn mobile_phone(mut self, phone: PhoneNumber) -> Self {
        self.mobile_phone = Some(phone);
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = trimmed(Some(address.into()));
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewClient {
    pub user_id: PrincipalId,
    pub details: ClientDetails,
}

impl NewClient {
    #[must_use]
    pub fn new(user_id: PrincipalId, details: ClientDetails) -> Self {
        Self { user_id, details }
    }
}

/// Replacement values for an existing client.
pub type UpdateClient = ClientDetails;
