//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::draft::StoredDraft;
use crate::domain::order::OrderFormDraft;
use crate::domain::profile::{NewProfile, Profile};
use crate::domain::types::{ClientId, PrincipalId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, DraftReader, DraftWriter, ProfileReader, ProfileWriter,
};

mock! {
    pub Repository {}

    impl DraftReader for Repository {
        fn get_draft(&self, user_id: &PrincipalId) -> RepositoryResult<Option<StoredDraft>>;
    }

    impl DraftWriter for Repository {
        fn upsert_draft(
            &self,
            user_id: &PrincipalId,
            draft: &OrderFormDraft,
        ) -> RepositoryResult<StoredDraft>;
        fn delete_draft(&self, user_id: &PrincipalId) -> RepositoryResult<usize>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(
            &self,
            id: ClientId,
            user_id: &PrincipalId,
        ) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, user_id: &PrincipalId) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            id: ClientId,
            user_id: &PrincipalId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        fn delete_client(&self, id: ClientId, user_id: &PrincipalId) -> RepositoryResult<usize>;
    }

    impl ProfileReader for Repository {
        fn get_profile(&self, user_id: &PrincipalId) -> RepositoryResult<Option<Profile>>;
    }

    impl ProfileWriter for Repository {
        fn upsert_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile>;
    }
}
