//! Client directory of the signed-in principal.

use crate::domain::auth::IdentityProvider;
use crate::domain::client::{Client, NewClient};
use crate::domain::types::ClientId;
use crate::forms::clients::CreateClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult, require_principal};

pub const LIST_CLIENTS: &str = "Failed to load clients";
pub const LOAD_CLIENT: &str = "Failed to load client";
pub const CREATE_CLIENT: &str = "Failed to create client";
pub const UPDATE_CLIENT: &str = "Failed to update client";
pub const DELETE_CLIENT: &str = "Failed to delete client";

/// Clients owned by the principal, newest first.
pub fn list_clients<R, I>(repo: &R, identity: &I) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;

    repo.list_clients(&user_id)
        .map_err(|err| ServiceError::repository(LIST_CLIENTS, err))
}

/// Fetches one client, `Ok(None)` when it does not exist or belongs to
/// someone else.
pub fn get_client<R, I>(repo: &R, identity: &I, client_id: i32) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;
    let Ok(client_id) = ClientId::new(client_id) else {
        return Ok(None);
    };

    repo.get_client_by_id(client_id, &user_id)
        .map_err(|err| ServiceError::repository(LOAD_CLIENT, err))
}

pub fn create_client<R, I>(repo: &R, identity: &I, form: &CreateClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;
    let details = form.to_details()?;

    repo.create_client(&NewClient::new(user_id, details))
        .map_err(|err| ServiceError::repository(CREATE_CLIENT, err))
}

pub fn update_client<R, I>(
    repo: &R,
    identity: &I,
    client_id: i32,
    form: &CreateClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;
    let client_id = ClientId::new(client_id).map_err(|_| ServiceError::NotFound)?;
    let details = form.to_details()?;

    repo.update_client(client_id, &user_id, &details)
        .map_err(|err| ServiceError::repository(UPDATE_CLIENT, err))
}

/// Deleting a client that is already gone is not an error.
pub fn delete_client<R, I>(repo: &R, identity: &I, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let user_id = require_principal(identity)?;
    let Ok(client_id) = ClientId::new(client_id) else {
        return Ok(());
    };

    repo.delete_client(client_id, &user_id)
        .map_err(|err| ServiceError::repository(DELETE_CLIENT, err))?;
    Ok(())
}
