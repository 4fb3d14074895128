//! Diesel model for persisted order form drafts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::draft::StoredDraft;
use crate::domain::order::OrderFormDraft;
use crate::domain::types::PrincipalId;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::order_drafts)]
/// Row holding the JSON snapshot of one principal's draft.
pub struct OrderDraft {
    pub id: i32,
    pub user_id: String,
    pub form_data: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_drafts)]
pub struct NewOrderDraft<'a> {
    pub user_id: &'a str,
    pub form_data: String,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewOrderDraft<'a> {
    pub fn try_new(
        user_id: &'a PrincipalId,
        draft: &OrderFormDraft,
        updated_at: NaiveDateTime,
    ) -> Result<Self, RepositoryError> {
        Ok(Self {
            user_id: user_id.as_str(),
            form_data: serde_json::to_string(draft)?,
            updated_at,
        })
    }
}

impl TryFrom<OrderDraft> for StoredDraft {
    type Error = RepositoryError;

    fn try_from(row: OrderDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: PrincipalId::new(row.user_id)?,
            form_data: serde_json::from_str(&row.form_data)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn snapshot_is_camel_case_json() {
        let user_id = PrincipalId::new("p-1").unwrap();
        let mut draft = OrderFormDraft::default();
        draft.special_instructions = "Call first".to_string();

        let row = NewOrderDraft::try_new(&user_id, &draft, Utc::now().naive_utc()).unwrap();
        assert_eq!(row.user_id, "p-1");
        assert!(row.form_data.contains("\"specialInstructions\":\"Call first\""));
    }

    #[test]
    fn corrupt_snapshot_is_a_validation_error() {
        let now = Utc::now().naive_utc();
        let row = OrderDraft {
            id: 1,
            user_id: "p-1".to_string(),
            form_data: "{not json".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            StoredDraft::try_from(row),
            Err(RepositoryError::MalformedRecord(_))
        ));
    }
}
