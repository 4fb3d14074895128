use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, ClientDetails, NewClient as DomainNewClient,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub user_id: String,
    pub full_name: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub office_email: Option<String>,
    pub office_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub user_id: &'a str,
    pub full_name: &'a str,
    pub company: Option<&'a str>,
    pub website: Option<&'a str>,
    pub office_email: Option<&'a str>,
    pub office_phone: Option<&'a str>,
    pub mobile_phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record. Cleared optional fields are
/// written as `NULL`.
pub struct UpdateClient<'a> {
    pub full_name: &'a str,
    pub company: Option<&'a str>,
    pub website: Option<&'a str>,
    pub office_email: Option<&'a str>,
    pub office_phone: Option<&'a str>,
    pub mobile_phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        DomainClient::try_new(
            client.id,
            client.user_id,
            client.full_name,
            client.company,
            client.website,
            client.office_email,
            client.office_phone,
            client.mobile_phone,
            client.address,
            client.created_at,
            client.updated_at,
        )
    }
}

impl<'a> NewClient<'a> {
    pub fn new(client: &'a DomainNewClient, now: NaiveDateTime) -> Self {
        let details = &client.details;
        Self {
            user_id: client.user_id.as_str(),
            full_name: details.full_name.as_str(),
            company: details.company.as_deref(),
            website: details.website.as_ref().map(|w| w.as_str()),
            office_email: details.office_email.as_ref().map(|e| e.as_str()),
            office_phone: details.office_phone.as_ref().map(|p| p.as_str()),
            mobile_phone: details.mobile_phone.as_ref().map(|p| p.as_str()),
            address: details.address.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn new(details: &'a ClientDetails, now: NaiveDateTime) -> Self {
        Self {
            full_name: details.full_name.as_str(),
            company: details.company.as_deref(),
            website: details.website.as_ref().map(|w| w.as_str()),
            office_email: details.office_email.as_ref().map(|e| e.as_str()),
            office_phone: details.office_phone.as_ref().map(|p| p.as_str()),
            mobile_phone: details.mobile_phone.as_ref().map(|p| p.as_str()),
            address: details.address.as_deref(),
            updated_at: now,
        }
    }
}
