use chrono::Utc;
use diesel::{prelude::*, upsert::excluded};

use crate::{
    domain::{
        profile::{NewProfile, Profile},
        types::PrincipalId,
    },
    models::profile::{NewProfile as DbNewProfile, Profile as DbProfile},
    repository::{
        DieselRepository, ProfileReader, ProfileWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ProfileReader for DieselRepository {
    fn get_profile(&self, user_id: &PrincipalId) -> RepositoryResult<Option<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let row = profiles::table
            .filter(profiles::user_id.eq(user_id.as_str()))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        row.map(Profile::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl ProfileWriter for DieselRepository {
    fn upsert_profile(&self, new_profile: &NewProfile) -> RepositoryResult<Profile> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;
        let insertable = DbNewProfile::new(new_profile, Utc::now().naive_utc());

        let row = diesel::insert_into(profiles::table)
            .values(&insertable)
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                profiles::email.eq(excluded(profiles::email)),
                profiles::full_name.eq(excluded(profiles::full_name)),
                profiles::company.eq(excluded(profiles::company)),
                profiles::avatar_url.eq(excluded(profiles::avatar_url)),
                profiles::provider.eq(excluded(profiles::provider)),
                profiles::updated_at.eq(excluded(profiles::updated_at)),
            ))
            .get_result::<DbProfile>(&mut conn)?;

        Ok(Profile::try_from(row)?)
    }
}
