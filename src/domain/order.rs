//! The working aggregate for one apostille order.
//!
//! Records are plain data; which fields are required is decided solely by
//! [`crate::wizard::validation`]. Field names serialize in camelCase so a
//! stored snapshot is the same JSON document the UI edits.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::LineItemId;

/// Country preselected for new contact blocks.
pub const DEFAULT_COUNTRY: &str = "United States";
/// State of registration preselected for entity records.
pub const DEFAULT_ENTITY_STATE: &str = "DE";
/// Number of recipient slots for scanned copies.
pub const SCANNED_COPY_SLOTS: usize = 3;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    pub name: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state_province: String,
    pub zip_code: String,
    pub country: String,
    pub email: String,
    pub daytime_tel: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            company: String::new(),
            address: String::new(),
            city: String::new(),
            state_province: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            email: String::new(),
            daytime_tel: String::new(),
        }
    }
}

/// Return shipping block. While `same_as_primary` is set the contact is a
/// mirror of the primary contact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    pub same_as_primary: bool,
    pub contact: ContactDetails,
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self {
            same_as_primary: true,
            contact: ContactDetails::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    #[serde(default)]
    pub id: LineItemId,
    #[serde(default)]
    pub title: String,
    /// `None` models a cleared quantity input.
    #[serde(default)]
    pub qty: Option<i32>,
    #[serde(default)]
    pub country: String,
}

impl DocumentItem {
    pub fn new() -> Self {
        Self {
            id: LineItemId::new(),
            title: String::new(),
            qty: Some(1),
            country: String::new(),
        }
    }
}

impl Default for DocumentItem {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityDocument {
    pub title: String,
    pub date_filed: Option<NaiveDate>,
    pub qty: Option<i32>,
}

impl Default for EntityDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            date_filed: None,
            qty: Some(1),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityRecord {
    pub entity_name: String,
    pub state_of_registration: String,
    pub entity_number: String,
    pub documents: Vec<EntityDocument>,
    pub apostille_requested: YesNo,
    pub destination_country: String,
}

impl Default for EntityRecord {
    fn default() -> Self {
        Self {
            entity_name: String::new(),
            state_of_registration: DEFAULT_ENTITY_STATE.to_string(),
            entity_number: String::new(),
            documents: vec![EntityDocument::default()],
            apostille_requested: YesNo::No,
            destination_country: String::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationItem {
    #[serde(default)]
    pub id: LineItemId,
    #[serde(default)]
    pub document_title: String,
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub destination_country: String,
}

impl TranslationItem {
    pub fn new() -> Self {
        Self {
            id: LineItemId::new(),
            document_title: String::new(),
            target_language: String::new(),
            destination_country: String::new(),
        }
    }

    /// Whether the user has typed anything into this row.
    pub fn is_blank(&self) -> bool {
        self.document_title.trim().is_empty()
            && self.target_language.trim().is_empty()
            && self.destination_country.trim().is_empty()
    }
}

impl Default for TranslationItem {
    fn default() -> Self {
        Self::new()
    }
}

/// Yes/no apostille toggle with its destination country.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ApostilleRequest {
    pub requested: bool,
    pub destination_country: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecialServices {
    pub require_scanned_copy: bool,
    pub scanned_copy_emails: [String; SCANNED_COPY_SLOTS],
    pub require_chamber_certification: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderFormDraft {
    pub primary_contact: ContactDetails,
    pub return_shipping: ShippingAddress,
    pub documents: Vec<DocumentItem>,
    pub date_needed: Option<NaiveDate>,
    pub entity_records_enabled: bool,
    pub entity_record: EntityRecord,
    pub translations: Vec<TranslationItem>,
    pub apostille_translations: ApostilleRequest,
    pub apostille_originals: ApostilleRequest,
    pub special_services: SpecialServices,
    pub special_instructions: String,
}

impl Default for OrderFormDraft {
    fn default() -> Self {
        Self {
            primary_contact: ContactDetails::default(),
            return_shipping: ShippingAddress::default(),
            documents: vec![DocumentItem::new()],
            date_needed: None,
            entity_records_enabled: false,
            entity_record: EntityRecord::default(),
            translations: vec![TranslationItem::new()],
            apostille_translations: ApostilleRequest::default(),
            apostille_originals: ApostilleRequest::default(),
            special_services: SpecialServices::default(),
            special_instructions: String::new(),
        }
    }
}

impl OrderFormDraft {
    /// Restores the minimum-one invariant on every repeatable section. Used
    /// after deserializing snapshots written by older clients.
    pub fn normalized(mut self) -> Self {
        if self.documents.is_empty() {
            self.documents.push(DocumentItem::new());
        }
        if self.translations.is_empty() {
            self.translations.push(TranslationItem::new());
        }
        if self.entity_record.documents.is_empty() {
            self.entity_record.documents.push(EntityDocument::default());
        }
        if self.return_shipping.same_as_primary {
            self.return_shipping.contact = self.primary_contact.clone();
        }

        // Edits address rows by id, so every id must be unique.
        let mut seen = HashSet::new();
        for id in self
            .documents
            .iter_mut()
            .map(|doc| &mut doc.id)
            .chain(self.translations.iter_mut().map(|item| &mut item.id))
        {
            if !seen.insert(*id) {
                *id = LineItemId::new();
                seen.insert(*id);
            }
        }
        self
    }

    /// Sum of document quantities, counting a cleared quantity as zero.
    pub fn total_document_count(&self) -> i64 {
        self.documents
            .iter()
            .map(|doc| i64::from(doc.qty.unwrap_or(0)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_has_one_entry_per_section() {
        let draft = OrderFormDraft::default();
        assert_eq!(draft.documents.len(), 1);
        assert_eq!(draft.translations.len(), 1);
        assert_eq!(draft.entity_record.documents.len(), 1);
        assert!(draft.return_shipping.same_as_primary);
        assert_eq!(draft.primary_contact.country, DEFAULT_COUNTRY);
        assert_eq!(draft.entity_record.state_of_registration, DEFAULT_ENTITY_STATE);
    }

    #[test]
    fn serializes_in_camel_case() {
        let draft = OrderFormDraft::default();
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value["primaryContact"]["daytimeTel"].is_string());
        assert_eq!(value["returnShipping"]["sameAsPrimary"], true);
        assert_eq!(value["returnShipping"]["contact"]["country"], DEFAULT_COUNTRY);
        assert_eq!(value["documents"][0]["qty"], 1);
        assert_eq!(value["entityRecord"]["apostilleRequested"], "no");
        assert_eq!(
            value["specialServices"]["scannedCopyEmails"]
                .as_array()
                .map(Vec::len),
            Some(SCANNED_COPY_SLOTS)
        );
    }

    #[test]
    fn normalized_restores_missing_line_items() {
        let json = r#"{"documents": [], "translations": [], "entityRecord": {"documents": []}}"#;
        let draft: OrderFormDraft = serde_json::from_str(json).unwrap();
        let draft = draft.normalized();
        assert_eq!(draft.documents.len(), 1);
        assert_eq!(draft.translations.len(), 1);
        assert_eq!(draft.entity_record.documents.len(), 1);
    }

    #[test]
    fn rows_without_ids_get_fresh_unique_ids() {
        let json = r#"{
            "documents": [
                {"title": "Birth certificate", "qty": 1, "country": "US"},
                {"title": "Diploma", "qty": 2, "country": "US"}
            ],
            "translations": [{"documentTitle": "Diploma", "targetLanguage": "Spanish"}]
        }"#;
        let draft: OrderFormDraft = serde_json::from_str(json).unwrap();
        let draft = draft.normalized();

        assert_eq!(draft.documents[1].title, "Diploma");
        assert_eq!(draft.documents[1].qty, Some(2));
        assert_ne!(draft.documents[0].id, draft.documents[1].id);
        assert_ne!(draft.documents[0].id, draft.translations[0].id);
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let mut draft = OrderFormDraft::default();
        let mut copy = draft.documents[0].clone();
        copy.title = "Copy".to_string();
        draft.documents.push(copy);
        let original_id = draft.documents[0].id;

        let draft = draft.normalized();
        assert_eq!(draft.documents[0].id, original_id);
        assert_ne!(draft.documents[1].id, original_id);
        assert_eq!(draft.documents[1].title, "Copy");
    }

    #[test]
    fn total_document_count_treats_missing_qty_as_zero() {
        let mut draft = OrderFormDraft::default();
        draft.documents[0].qty = Some(3);
        let mut second = DocumentItem::new();
        second.qty = None;
        draft.documents.push(second);
        let mut third = DocumentItem::new();
        third.qty = Some(2);
        draft.documents.push(third);

        assert_eq!(draft.total_document_count(), 5);
    }
}
