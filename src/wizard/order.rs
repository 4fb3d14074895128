//! State machine owning one in-progress order form.
//!
//! The wizard mutates a single [`OrderFormDraft`] through typed operations and
//! keeps two invariants in its mutation path: every repeatable section holds at
//! least one entry, and a return shipping block flagged `same_as_primary`
//! always equals the primary contact. Persistence and order creation are
//! collaborators; the wizard only hands out snapshots and records outcomes.

use std::fmt::Display;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::domain::order::{DocumentItem, EntityDocument, OrderFormDraft, TranslationItem};
use crate::domain::types::LineItemId;
use crate::wizard::fields::{FieldUpdate, RETURN_SHIPPING};
use crate::wizard::validation::{ValidationErrorMap, ValidationPolicy, validate_with_policy};

/// How long the success banner stays up before the wizard starts over.
pub const SUBMITTED_DISPLAY_SECONDS: i64 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("return shipping mirrors the primary contact")]
    ShippingMirrored,
    #[error("unknown line item {0}")]
    UnknownLineItem(LineItemId),
    #[error("unknown entity document {0}")]
    UnknownEntityDocument(usize),
    #[error("scanned copy slot {0} does not exist")]
    UnknownEmailSlot(usize),
    #[error("the form has {} validation error(s)", .0.len())]
    Invalid(ValidationErrorMap),
    #[error("a submission is already in progress")]
    SubmissionInProgress,
    #[error("the order has already been submitted")]
    AlreadySubmitted,
    #[error("failed to submit order: {0}")]
    SubmissionFailed(String),
    #[error("failed to save draft: {0}")]
    DraftSaveFailed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum WizardPhase {
    Editing,
    Submitting,
    Submitted { at: NaiveDateTime },
}

/// Order-creation collaborator receiving a fully valid draft.
pub trait OrderSubmitter {
    type Error: Display;

    fn create_order(&self, draft: &OrderFormDraft) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone)]
pub struct OrderWizard {
    draft: OrderFormDraft,
    errors: ValidationErrorMap,
    phase: WizardPhase,
    policy: ValidationPolicy,
    saving: bool,
}

impl Default for OrderWizard {
    fn default() -> Self {
        Self::new(OrderFormDraft::default())
    }
}

impl OrderWizard {
    pub fn new(draft: OrderFormDraft) -> Self {
        Self {
            draft: draft.normalized(),
            errors: ValidationErrorMap::new(),
            phase: WizardPhase::Editing,
            policy: ValidationPolicy::default(),
            saving: false,
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn draft(&self) -> &OrderFormDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrorMap {
        &self.errors
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Replaces exactly one leaf and clears the error recorded for it.
    pub fn set_field(&mut self, update: FieldUpdate) -> Result<(), WizardError> {
        let path = update.path(&self.draft);
        let draft = &mut self.draft;

        match update {
            FieldUpdate::PrimaryContact(field, value) => {
                field.set(&mut draft.primary_contact, value);
                if draft.return_shipping.same_as_primary {
                    draft.return_shipping.contact = draft.primary_contact.clone();
                }
            }
            FieldUpdate::ReturnShipping(field, value) => {
                if draft.return_shipping.same_as_primary {
                    return Err(WizardError::ShippingMirrored);
                }
                field.set(&mut draft.return_shipping.contact, value);
            }
            FieldUpdate::DocumentTitle(id, value) => document_mut(draft, id)?.title = value,
            FieldUpdate::DocumentQty(id, value) => document_mut(draft, id)?.qty = value,
            FieldUpdate::DocumentCountry(id, value) => document_mut(draft, id)?.country = value,
            FieldUpdate::DateNeeded(value) => draft.date_needed = value,
            FieldUpdate::EntityName(value) => draft.entity_record.entity_name = value,
            FieldUpdate::EntityState(value) => draft.entity_record.state_of_registration = value,
            FieldUpdate::EntityNumber(value) => draft.entity_record.entity_number = value,
            FieldUpdate::EntityApostille(value) => draft.entity_record.apostille_requested = value,
            FieldUpdate::EntityDestinationCountry(value) => {
                draft.entity_record.destination_country = value
            }
            FieldUpdate::EntityDocumentTitle(index, value) => {
                entity_document_mut(draft, index)?.title = value
            }
            FieldUpdate::EntityDocumentDateFiled(index, value) => {
                entity_document_mut(draft, index)?.date_filed = value
            }
            FieldUpdate::EntityDocumentQty(index, value) => {
                entity_document_mut(draft, index)?.qty = value
            }
            FieldUpdate::TranslationTitle(id, value) => {
                translation_mut(draft, id)?.document_title = value
            }
            FieldUpdate::TranslationLanguage(id, value) => {
                translation_mut(draft, id)?.target_language = value
            }
            FieldUpdate::TranslationCountry(id, value) => {
                translation_mut(draft, id)?.destination_country = value
            }
            FieldUpdate::ApostilleTranslations(value) => {
                draft.apostille_translations.requested = value
            }
            FieldUpdate::ApostilleTranslationsCountry(value) => {
                draft.apostille_translations.destination_country = value
            }
            FieldUpdate::ApostilleOriginals(value) => draft.apostille_originals.requested = value,
            FieldUpdate::ApostilleOriginalsCountry(value) => {
                draft.apostille_originals.destination_country = value
            }
            FieldUpdate::RequireScannedCopy(value) => {
                draft.special_services.require_scanned_copy = value
            }
            FieldUpdate::ScannedCopyEmail(index, value) => {
                let slot = draft
                    .special_services
                    .scanned_copy_emails
                    .get_mut(index)
                    .ok_or(WizardError::UnknownEmailSlot(index))?;
                *slot = value;
            }
            FieldUpdate::RequireChamberCertification(value) => {
                draft.special_services.require_chamber_certification = value
            }
            FieldUpdate::SpecialInstructions(value) => draft.special_instructions = value,
        }

        if let Some(path) = path {
            self.errors.remove(&path);
        }
        Ok(())
    }

    /// Switches the shipping block between mirroring and independent entry.
    /// Turning mirroring on copies the primary contact immediately.
    pub fn toggle_same_as_primary(&mut self, same_as_primary: bool) {
        let shipping = &mut self.draft.return_shipping;
        shipping.same_as_primary = same_as_primary;
        if same_as_primary {
            shipping.contact = self.draft.primary_contact.clone();
            self.errors.remove_prefix(&format!("{RETURN_SHIPPING}."));
        }
    }

    /// Flips the entity section. Entered entity data is kept while disabled.
    pub fn toggle_entity_records_enabled(&mut self) -> bool {
        self.draft.entity_records_enabled = !self.draft.entity_records_enabled;
        if !self.draft.entity_records_enabled {
            self.errors.remove_prefix("entityRecord.");
        }
        self.draft.entity_records_enabled
    }

    pub fn add_document(&mut self) -> LineItemId {
        let item = DocumentItem::new();
        let id = item.id;
        self.draft.documents.push(item);
        id
    }

    pub fn add_translation(&mut self) -> LineItemId {
        let item = TranslationItem::new();
        let id = item.id;
        self.draft.translations.push(item);
        id
    }

    /// Appends an entity document and returns its index.
    pub fn add_entity_document(&mut self) -> usize {
        self.draft
            .entity_record
            .documents
            .push(EntityDocument::default());
        self.draft.entity_record.documents.len() - 1
    }

    /// Removes the document with `id`. Refused for the last remaining entry
    /// and for unknown ids.
    pub fn remove_document(&mut self, id: LineItemId) -> bool {
        let documents = &mut self.draft.documents;
        if documents.len() <= 1 {
            return false;
        }
        let Some(index) = documents.iter().position(|doc| doc.id == id) else {
            return false;
        };
        documents.remove(index);
        // Indices shift after a removal, so positional errors are stale.
        self.errors.remove_prefix("document.");
        true
    }

    pub fn remove_translation(&mut self, id: LineItemId) -> bool {
        let translations = &mut self.draft.translations;
        if translations.len() <= 1 {
            return false;
        }
        let Some(index) = translations.iter().position(|t| t.id == id) else {
            return false;
        };
        translations.remove(index);
        self.errors.remove_prefix("translation.");
        true
    }

    pub fn remove_entity_document(&mut self, index: usize) -> bool {
        let documents = &mut self.draft.entity_record.documents;
        if documents.len() <= 1 || index >= documents.len() {
            return false;
        }
        documents.remove(index);
        self.errors.remove_prefix("entityRecord.document.");
        true
    }

    pub fn total_document_count(&self) -> i64 {
        self.draft.total_document_count()
    }

    /// Recomputes the full error map against `today`.
    pub fn validate(&mut self, today: NaiveDate) -> &ValidationErrorMap {
        self.errors = validate_with_policy(&self.draft, today, self.policy);
        &self.errors
    }

    /// Validates the draft and, when it is clean, moves to `Submitting` and
    /// returns the snapshot to hand to the order-creation collaborator.
    pub fn begin_submission(&mut self, today: NaiveDate) -> Result<OrderFormDraft, WizardError> {
        match self.phase {
            WizardPhase::Editing => {}
            WizardPhase::Submitting => return Err(WizardError::SubmissionInProgress),
            WizardPhase::Submitted { .. } => return Err(WizardError::AlreadySubmitted),
        }

        let errors = self.validate(today);
        if !errors.is_empty() {
            return Err(WizardError::Invalid(errors.clone()));
        }

        self.phase = WizardPhase::Submitting;
        Ok(self.draft.clone())
    }

    /// Records the collaborator's answer. Results arriving when no submission
    /// is outstanding are ignored.
    pub fn finish_submission<E: Display>(
        &mut self,
        result: Result<(), E>,
        now: NaiveDateTime,
    ) -> Result<(), WizardError> {
        if self.phase != WizardPhase::Submitting {
            log::debug!("Ignoring stale order submission result");
            return Ok(());
        }

        match result {
            Ok(()) => {
                self.phase = WizardPhase::Submitted { at: now };
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to submit order: {err}");
                self.phase = WizardPhase::Editing;
                Err(WizardError::SubmissionFailed(err.to_string()))
            }
        }
    }

    /// Validates and submits synchronously through `submitter`.
    pub fn submit<S>(
        &mut self,
        submitter: &S,
        today: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<(), WizardError>
    where
        S: OrderSubmitter + ?Sized,
    {
        let draft = self.begin_submission(today)?;
        let result = submitter.create_order(&draft);
        self.finish_submission(result, now)
    }

    /// Advances the clock. Once the success banner has been shown long enough
    /// the wizard starts over with a fresh draft. Returns `true` on reset.
    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        let WizardPhase::Submitted { at } = self.phase else {
            return false;
        };
        if now - at < Duration::seconds(SUBMITTED_DISPLAY_SECONDS) {
            return false;
        }

        self.draft = OrderFormDraft::default();
        self.errors.clear();
        self.phase = WizardPhase::Editing;
        true
    }

    /// Returns the snapshot to persist, or `None` while a save is outstanding.
    pub fn begin_draft_save(&mut self) -> Option<OrderFormDraft> {
        if self.saving {
            return None;
        }
        self.saving = true;
        Some(self.draft.clone())
    }

    pub fn finish_draft_save<E: Display>(&mut self, result: Result<(), E>) -> Result<(), WizardError> {
        if !self.saving {
            log::debug!("Ignoring stale draft save result");
            return Ok(());
        }
        self.saving = false;
        result.map_err(|err| {
            log::error!("Failed to save draft: {err}");
            WizardError::DraftSaveFailed(err.to_string())
        })
    }

    /// Replaces the working draft wholesale, e.g. with a reloaded snapshot.
    /// Refused while a submission is outstanding; a finished submission is
    /// left behind so the loaded draft survives the next [`Self::tick`].
    pub fn load_draft(&mut self, draft: OrderFormDraft) -> Result<(), WizardError> {
        if self.phase == WizardPhase::Submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        self.draft = draft.normalized();
        self.errors.clear();
        self.phase = WizardPhase::Editing;
        Ok(())
    }
}

fn document_mut(draft: &mut OrderFormDraft, id: LineItemId) -> Result<&mut DocumentItem, WizardError> {
    draft
        .documents
        .iter_mut()
        .find(|doc| doc.id == id)
        .ok_or(WizardError::UnknownLineItem(id))
}

fn translation_mut(
    draft: &mut OrderFormDraft,
    id: LineItemId,
) -> Result<&mut TranslationItem, WizardError> {
    draft
        .translations
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(WizardError::UnknownLineItem(id))
}

fn entity_document_mut(
    draft: &mut OrderFormDraft,
    index: usize,
) -> Result<&mut EntityDocument, WizardError> {
    draft
        .entity_record
        .documents
        .get_mut(index)
        .ok_or(WizardError::UnknownEntityDocument(index))
}
