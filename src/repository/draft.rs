use chrono::Utc;
use diesel::{prelude::*, upsert::excluded};

use crate::{
    domain::{draft::StoredDraft, order::OrderFormDraft, types::PrincipalId},
    models::draft::{NewOrderDraft as DbNewOrderDraft, OrderDraft as DbOrderDraft},
    repository::{DieselRepository, DraftReader, DraftWriter, errors::RepositoryResult},
};

impl DraftReader for DieselRepository {
    fn get_draft(&self, user_id: &PrincipalId) -> RepositoryResult<Option<StoredDraft>> {
        use crate::schema::order_drafts;

        let mut conn = self.conn()?;
        let row = order_drafts::table
            .filter(order_drafts::user_id.eq(user_id.as_str()))
            .first::<DbOrderDraft>(&mut conn)
            .optional()?;

        row.map(StoredDraft::try_from).transpose()
    }
}

impl DraftWriter for DieselRepository {
    fn upsert_draft(
        &self,
        user_id: &PrincipalId,
        draft: &OrderFormDraft,
    ) -> RepositoryResult<StoredDraft> {
        use crate::schema::order_drafts;

        let mut conn = self.conn()?;
        let new_draft = DbNewOrderDraft::try_new(user_id, draft, Utc::now().naive_utc())?;

        let row = diesel::insert_into(order_drafts::table)
            .values(&new_draft)
            .on_conflict(order_drafts::user_id)
            .do_update()
            .set((
                order_drafts::form_data.eq(excluded(order_drafts::form_data)),
                order_drafts::updated_at.eq(excluded(order_drafts::updated_at)),
            ))
            .get_result::<DbOrderDraft>(&mut conn)?;

        StoredDraft::try_from(row)
    }

    fn delete_draft(&self, user_id: &PrincipalId) -> RepositoryResult<usize> {
        use crate::schema::order_drafts;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            order_drafts::table.filter(order_drafts::user_id.eq(user_id.as_str())),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}
