//! Order form validation.
//!
//! [`validate`] is a pure function of the draft and the reference date: it
//! never performs I/O and reports every violated rule at once. An empty
//! [`ValidationErrorMap`] means the draft may be submitted.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::order::{ContactDetails, OrderFormDraft};
use crate::domain::types::is_phone_like;
use crate::wizard::fields::{
    ContactField, DATE_NEEDED, PRIMARY_CONTACT, RETURN_SHIPPING, apostille_originals_path,
    apostille_translations_path, contact_path, document_path, entity_document_path, entity_path,
    scanned_email_path, translation_path,
};

pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_QTY: &str = "Quantity must be at least 1";
pub const MSG_DATE_REQUIRED: &str = "Date needed is required";
pub const MSG_DATE_FUTURE: &str = "Date needed must be in the future";
pub const MSG_DESTINATION_REQUIRED: &str = "Destination country is required";

/// Field path to human-readable message.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrorMap(BTreeMap<String, String>);

impl ValidationErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.insert(path.into(), message.into());
    }

    /// Drops the error stored at exactly `path`, returning it.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.0.remove(path)
    }

    /// Drops every error whose path starts with `prefix`.
    pub fn remove_prefix(&mut self, prefix: &str) {
        self.0.retain(|path, _| !path.starts_with(prefix));
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for ValidationErrorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .iter()
            .map(|(path, message)| format!("{path}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Which optional sections are checked in addition to the base rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Contact, documents and date needed only.
    #[default]
    Lenient,
    /// Also requires destination countries behind yes/no toggles, a complete
    /// entity record while that section is enabled, started translation rows
    /// to be complete and non-empty scanned-copy emails to be well-formed.
    Strict,
}

/// `local@domain.tld`: no whitespace, one `@`, and a dot inside the domain.
pub fn has_email_shape(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    has_inner_dot
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn required_message(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name is required",
        ContactField::Address => "Address is required",
        ContactField::City => "City is required",
        ContactField::StateProvince => "State/Province is required",
        ContactField::ZipCode => "Zip Code is required",
        ContactField::Email => "Email is required",
        ContactField::DaytimeTel => "Daytime telephone is required",
        ContactField::Company => "Company is required",
        ContactField::Country => "Country is required",
    }
}

const REQUIRED_CONTACT_FIELDS: [ContactField; 7] = [
    ContactField::Name,
    ContactField::Address,
    ContactField::City,
    ContactField::StateProvince,
    ContactField::ZipCode,
    ContactField::Email,
    ContactField::DaytimeTel,
];

fn validate_contact(section: &str, contact: &ContactDetails, errors: &mut ValidationErrorMap) {
    for field in REQUIRED_CONTACT_FIELDS {
        let value = field.get(contact);
        if is_blank(value) {
            errors.insert(contact_path(section, field), required_message(field));
        } else if field == ContactField::Email && !has_email_shape(value) {
            errors.insert(contact_path(section, field), MSG_EMAIL_INVALID);
        }
    }
}

fn qty_is_valid(qty: Option<i32>) -> bool {
    qty.is_some_and(|qty| qty >= 1)
}

/// Validates `draft` with the lenient policy against the reference date `today`.
pub fn validate(draft: &OrderFormDraft, today: NaiveDate) -> ValidationErrorMap {
    validate_with_policy(draft, today, ValidationPolicy::Lenient)
}

/// Validates `draft` against the local calendar date.
pub fn validate_today(draft: &OrderFormDraft, policy: ValidationPolicy) -> ValidationErrorMap {
    validate_with_policy(draft, Local::now().date_naive(), policy)
}

pub fn validate_with_policy(
    draft: &OrderFormDraft,
    today: NaiveDate,
    policy: ValidationPolicy,
) -> ValidationErrorMap {
    let mut errors = ValidationErrorMap::new();

    validate_contact(PRIMARY_CONTACT, &draft.primary_contact, &mut errors);
    if !draft.return_shipping.same_as_primary {
        validate_contact(RETURN_SHIPPING, &draft.return_shipping.contact, &mut errors);
    }

    for (index, doc) in draft.documents.iter().enumerate() {
        if is_blank(&doc.title) {
            errors.insert(document_path(index, "title"), "Document title is required");
        }
        if is_blank(&doc.country) {
            errors.insert(document_path(index, "country"), "Country is required");
        }
        if !qty_is_valid(doc.qty) {
            errors.insert(document_path(index, "qty"), MSG_QTY);
        }
    }

    match draft.date_needed {
        None => errors.insert(DATE_NEEDED, MSG_DATE_REQUIRED),
        Some(date) if date <= today => errors.insert(DATE_NEEDED, MSG_DATE_FUTURE),
        Some(_) => {}
    }

    if policy == ValidationPolicy::Strict {
        validate_optional_sections(draft, &mut errors);
    }

    errors
}

fn validate_optional_sections(draft: &OrderFormDraft, errors: &mut ValidationErrorMap) {
    if draft.entity_records_enabled {
        let entity = &draft.entity_record;
        if is_blank(&entity.entity_name) {
            errors.insert(entity_path("entityName"), "Entity name is required");
        }
        if is_blank(&entity.entity_number) {
            errors.insert(entity_path("entityNumber"), "Entity number is required");
        }
        for (index, doc) in entity.documents.iter().enumerate() {
            if is_blank(&doc.title) {
                errors.insert(entity_document_path(index, "title"), "Document title is required");
            }
            if !qty_is_valid(doc.qty) {
                errors.insert(entity_document_path(index, "qty"), MSG_QTY);
            }
        }
        if entity.apostille_requested.is_yes() && is_blank(&entity.destination_country) {
            errors.insert(entity_path("destinationCountry"), MSG_DESTINATION_REQUIRED);
        }
    }

    for (index, translation) in draft.translations.iter().enumerate() {
        if translation.is_blank() {
            continue;
        }
        if is_blank(&translation.document_title) {
            errors.insert(
                translation_path(index, "documentTitle"),
                "Document title is required",
            );
        }
        if is_blank(&translation.target_language) {
            errors.insert(
                translation_path(index, "targetLanguage"),
                "Target language is required",
            );
        }
    }

    if draft.apostille_translations.requested
        && is_blank(&draft.apostille_translations.destination_country)
    {
        errors.insert(apostille_translations_path(), MSG_DESTINATION_REQUIRED);
    }
    if draft.apostille_originals.requested
        && is_blank(&draft.apostille_originals.destination_country)
    {
        errors.insert(apostille_originals_path(), MSG_DESTINATION_REQUIRED);
    }

    let services = &draft.special_services;
    if services.require_scanned_copy {
        for (index, email) in services.scanned_copy_emails.iter().enumerate() {
            if !is_blank(email) && !has_email_shape(email.trim()) {
                errors.insert(scanned_email_path(index), MSG_EMAIL_INVALID);
            }
        }
    }

    // Only the primary telephone is checked; other phone fields are free text.
    let tel = draft.primary_contact.daytime_tel.trim();
    if !tel.is_empty() && !is_phone_like(tel) {
        errors.insert(
            contact_path(PRIMARY_CONTACT, ContactField::DaytimeTel),
            "Please enter a valid telephone number",
        );
    }
}
