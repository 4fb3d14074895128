use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        client::{Client, NewClient, UpdateClient},
        types::{ClientId, PrincipalId},
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    repository::{
        ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(
        &self,
        id: ClientId,
        user_id: &PrincipalId,
    ) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::id.eq(id.get()))
            .filter(clients::user_id.eq(user_id.as_str()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        client
            .map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_clients(&self, user_id: &PrincipalId) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let rows = clients::table
            .filter(clients::user_id.eq(user_id.as_str()))
            .order((clients::created_at.desc(), clients::id.desc()))
            .load::<DbClient>(&mut conn)?;

        rows.into_iter()
            .map(|row| Client::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertable = DbNewClient::new(new_client, Utc::now().naive_utc());

        let row = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(row)?)
    }

    fn update_client(
        &self,
        id: ClientId,
        user_id: &PrincipalId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changes = DbUpdateClient::new(updates, Utc::now().naive_utc());

        // Filtering on the owner turns another principal's id into NotFound.
        let row = diesel::update(
            clients::table
                .filter(clients::id.eq(id.get()))
                .filter(clients::user_id.eq(user_id.as_str())),
        )
        .set(&changes)
        .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(row)?)
    }

    fn delete_client(&self, id: ClientId, user_id: &PrincipalId) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            clients::table
                .filter(clients::id.eq(id.get()))
                .filter(clients::user_id.eq(user_id.as_str())),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}
