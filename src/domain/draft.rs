use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::order::OrderFormDraft;
use crate::domain::types::PrincipalId;

/// The persisted, not yet submitted order form of one principal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredDraft {
    pub user_id: PrincipalId,
    pub form_data: OrderFormDraft,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
