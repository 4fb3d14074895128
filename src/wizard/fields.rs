//! Addressing of individual order-form fields.
//!
//! Every leaf the UI can edit is reachable through a [`FieldUpdate`], and every
//! leaf the validator can complain about has a dotted path. Both sides build
//! paths through the helpers below so a field edit clears exactly the error the
//! validator produced for it.

use chrono::NaiveDate;

use crate::domain::order::{ContactDetails, OrderFormDraft, YesNo};
use crate::domain::types::LineItemId;

pub const PRIMARY_CONTACT: &str = "primaryContact";
pub const RETURN_SHIPPING: &str = "returnShipping";
pub const DATE_NEEDED: &str = "dateNeeded";

/// Leaves of a contact block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Company,
    Address,
    City,
    StateProvince,
    ZipCode,
    Country,
    Email,
    DaytimeTel,
}

impl ContactField {
    pub const ALL: [ContactField; 9] = [
        ContactField::Name,
        ContactField::Company,
        ContactField::Address,
        ContactField::City,
        ContactField::StateProvince,
        ContactField::ZipCode,
        ContactField::Country,
        ContactField::Email,
        ContactField::DaytimeTel,
    ];

    /// Key used in error paths.
    pub fn key(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Company => "company",
            ContactField::Address => "address",
            ContactField::City => "city",
            ContactField::StateProvince => "state",
            ContactField::ZipCode => "zipCode",
            ContactField::Country => "country",
            ContactField::Email => "email",
            ContactField::DaytimeTel => "daytimeTel",
        }
    }

    pub fn get(self, contact: &ContactDetails) -> &str {
        match self {
            ContactField::Name => &contact.name,
            ContactField::Company => &contact.company,
            ContactField::Address => &contact.address,
            ContactField::City => &contact.city,
            ContactField::StateProvince => &contact.state_province,
            ContactField::ZipCode => &contact.zip_code,
            ContactField::Country => &contact.country,
            ContactField::Email => &contact.email,
            ContactField::DaytimeTel => &contact.daytime_tel,
        }
    }

    pub fn set(self, contact: &mut ContactDetails, value: String) {
        let slot = match self {
            ContactField::Name => &mut contact.name,
            ContactField::Company => &mut contact.company,
            ContactField::Address => &mut contact.address,
            ContactField::City => &mut contact.city,
            ContactField::StateProvince => &mut contact.state_province,
            ContactField::ZipCode => &mut contact.zip_code,
            ContactField::Country => &mut contact.country,
            ContactField::Email => &mut contact.email,
            ContactField::DaytimeTel => &mut contact.daytime_tel,
        };
        *slot = value;
    }
}

pub fn contact_path(section: &str, field: ContactField) -> String {
    format!("{section}.{}", field.key())
}

pub fn document_path(index: usize, field: &str) -> String {
    format!("document.{index}.{field}")
}

pub fn entity_path(field: &str) -> String {
    format!("entityRecord.{field}")
}

pub fn entity_document_path(index: usize, field: &str) -> String {
    format!("entityRecord.document.{index}.{field}")
}

pub fn translation_path(index: usize, field: &str) -> String {
    format!("translation.{index}.{field}")
}

pub fn apostille_translations_path() -> String {
    "apostilleTranslations.destinationCountry".to_string()
}

pub fn apostille_originals_path() -> String {
    "apostilleOriginals.destinationCountry".to_string()
}

pub fn scanned_email_path(index: usize) -> String {
    format!("specialServices.scannedCopyEmails.{index}")
}

/// A single leaf replacement on an [`OrderFormDraft`].
#[derive(Clone, Debug, PartialEq)]
pub enum FieldUpdate {
    PrimaryContact(ContactField, String),
    ReturnShipping(ContactField, String),
    DocumentTitle(LineItemId, String),
    DocumentQty(LineItemId, Option<i32>),
    DocumentCountry(LineItemId, String),
    DateNeeded(Option<NaiveDate>),
    EntityName(String),
    EntityState(String),
    EntityNumber(String),
    EntityApostille(YesNo),
    EntityDestinationCountry(String),
    EntityDocumentTitle(usize, String),
    EntityDocumentDateFiled(usize, Option<NaiveDate>),
    EntityDocumentQty(usize, Option<i32>),
    TranslationTitle(LineItemId, String),
    TranslationLanguage(LineItemId, String),
    TranslationCountry(LineItemId, String),
    ApostilleTranslations(bool),
    ApostilleTranslationsCountry(String),
    ApostilleOriginals(bool),
    ApostilleOriginalsCountry(String),
    RequireScannedCopy(bool),
    ScannedCopyEmail(usize, String),
    RequireChamberCertification(bool),
    SpecialInstructions(String),
}

impl FieldUpdate {
    /// The error path this update addresses, resolved against `draft` for
    /// line items. `None` for leaves the validator never reports on or for
    /// line items that do not exist.
    pub fn path(&self, draft: &OrderFormDraft) -> Option<String> {
        let document_index =
            |id: &LineItemId| draft.documents.iter().position(|doc| doc.id == *id);
        let translation_index =
            |id: &LineItemId| draft.translations.iter().position(|t| t.id == *id);

        match self {
            FieldUpdate::PrimaryContact(field, _) => Some(contact_path(PRIMARY_CONTACT, *field)),
            FieldUpdate::ReturnShipping(field, _) => Some(contact_path(RETURN_SHIPPING, *field)),
            FieldUpdate::DocumentTitle(id, _) => document_index(id).map(|i| document_path(i, "title")),
            FieldUpdate::DocumentQty(id, _) => document_index(id).map(|i| document_path(i, "qty")),
            FieldUpdate::DocumentCountry(id, _) => {
                document_index(id).map(|i| document_path(i, "country"))
            }
            FieldUpdate::DateNeeded(_) => Some(DATE_NEEDED.to_string()),
            FieldUpdate::EntityName(_) => Some(entity_path("entityName")),
            FieldUpdate::EntityState(_) => Some(entity_path("stateOfRegistration")),
            FieldUpdate::EntityNumber(_) => Some(entity_path("entityNumber")),
            FieldUpdate::EntityApostille(_) | FieldUpdate::EntityDestinationCountry(_) => {
                Some(entity_path("destinationCountry"))
            }
            FieldUpdate::EntityDocumentTitle(i, _) => Some(entity_document_path(*i, "title")),
            FieldUpdate::EntityDocumentDateFiled(i, _) => {
                Some(entity_document_path(*i, "dateFiled"))
            }
            FieldUpdate::EntityDocumentQty(i, _) => Some(entity_document_path(*i, "qty")),
            FieldUpdate::TranslationTitle(id, _) => {
                translation_index(id).map(|i| translation_path(i, "documentTitle"))
            }
            FieldUpdate::TranslationLanguage(id, _) => {
                translation_index(id).map(|i| translation_path(i, "targetLanguage"))
            }
            FieldUpdate::TranslationCountry(id, _) => {
                translation_index(id).map(|i| translation_path(i, "destinationCountry"))
            }
            FieldUpdate::ApostilleTranslations(_) | FieldUpdate::ApostilleTranslationsCountry(_) => {
                Some(apostille_translations_path())
            }
            FieldUpdate::ApostilleOriginals(_) | FieldUpdate::ApostilleOriginalsCountry(_) => {
                Some(apostille_originals_path())
            }
            FieldUpdate::ScannedCopyEmail(i, _) => Some(scanned_email_path(*i)),
            FieldUpdate::RequireScannedCopy(_)
            | FieldUpdate::RequireChamberCertification(_)
            | FieldUpdate::SpecialInstructions(_) => None,
        }
    }
}
