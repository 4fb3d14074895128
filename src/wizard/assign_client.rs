//! Three-step flow that picks a client and a destination before a job is
//! created: `SelectClient -> SelectLocation -> CreateJob`.
//!
//! Forward moves are gated on the current step's selection; backward moves
//! keep every selection. A "new client" form can be opened at any point
//! without changing the step.

use serde::{Deserialize, Serialize};

use crate::domain::auth::IdentityProvider;
use crate::domain::client::Client;
use crate::domain::types::{ClientId, CountryCode};
use crate::dto::clients::{ClientCard, client_cards};
use crate::forms::clients::CreateClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::clients as clients_service;
use crate::services::{ServiceError, ServiceResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignStep {
    #[default]
    SelectClient,
    SelectLocation,
    CreateJob,
}

impl AssignStep {
    /// 1-based position shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            AssignStep::SelectClient => 1,
            AssignStep::SelectLocation => 2,
            AssignStep::CreateJob => 3,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            AssignStep::SelectClient => Some(AssignStep::SelectLocation),
            AssignStep::SelectLocation => Some(AssignStep::CreateJob),
            AssignStep::CreateJob => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            AssignStep::SelectClient => None,
            AssignStep::SelectLocation => Some(AssignStep::SelectClient),
            AssignStep::CreateJob => Some(AssignStep::SelectLocation),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSelection {
    pub selected_client_id: Option<ClientId>,
    pub selected_country_code: Option<CountryCode>,
    pub current_step: AssignStep,
}

/// Leaves the wizard from its first step.
pub trait DashboardNavigator {
    fn back_to_dashboard(&mut self);
}

#[derive(Debug, Default)]
pub struct AssignClientWizard {
    selection: WizardSelection,
    clients: Vec<Client>,
    new_client: Option<CreateClientForm>,
    new_client_errors: Vec<(String, String)>,
    needs_refresh: bool,
}

impl AssignClientWizard {
    pub fn new(clients: Vec<Client>) -> Self {
        Self {
            clients,
            ..Default::default()
        }
    }

    /// Opens the wizard with the principal's current client list.
    pub fn load<R, I>(repo: &R, identity: &I) -> ServiceResult<Self>
    where
        R: ClientReader + ?Sized,
        I: IdentityProvider + ?Sized,
    {
        Ok(Self::new(clients_service::list_clients(repo, identity)?))
    }

    pub fn selection(&self) -> &WizardSelection {
        &self.selection
    }

    pub fn step(&self) -> AssignStep {
        self.selection.current_step
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn cards(&self) -> Vec<ClientCard> {
        client_cards(&self.clients)
    }

    pub fn selected_client(&self) -> Option<&Client> {
        let id = self.selection.selected_client_id?;
        self.clients.iter().find(|client| client.id == id)
    }

    /// Selects a listed client. Unknown ids are ignored.
    pub fn select_client(&mut self, id: ClientId) -> bool {
        if !self.clients.iter().any(|client| client.id == id) {
            return false;
        }
        self.selection.selected_client_id = Some(id);
        true
    }

    pub fn select_country(&mut self, code: CountryCode) {
        self.selection.selected_country_code = Some(code);
    }

    /// Whether the current step's selection allows moving forward.
    pub fn can_continue(&self) -> bool {
        match self.selection.current_step {
            AssignStep::SelectClient => self.selection.selected_client_id.is_some(),
            AssignStep::SelectLocation => self.selection.selected_country_code.is_some(),
            AssignStep::CreateJob => false,
        }
    }

    /// Moves one step forward; no effect while gated.
    pub fn continue_step(&mut self) -> bool {
        if !self.can_continue() {
            return false;
        }
        match self.selection.current_step.next() {
            Some(step) => {
                self.selection.current_step = step;
                true
            }
            None => false,
        }
    }

    /// Moves one step back keeping selections, or leaves the wizard from the
    /// first step.
    pub fn back<N>(&mut self, navigator: &mut N)
    where
        N: DashboardNavigator + ?Sized,
    {
        match self.selection.current_step.previous() {
            Some(step) => self.selection.current_step = step,
            None => navigator.back_to_dashboard(),
        }
    }

    pub fn is_new_client_open(&self) -> bool {
        self.new_client.is_some()
    }

    /// Opens an empty new-client form. An already open form is kept.
    pub fn open_new_client(&mut self) {
        if self.new_client.is_none() {
            self.new_client = Some(CreateClientForm::default());
            self.new_client_errors.clear();
        }
    }

    pub fn new_client_form_mut(&mut self) -> Option<&mut CreateClientForm> {
        self.new_client.as_mut()
    }

    /// Field errors from the last rejected submission, camelCase keys.
    pub fn new_client_errors(&self) -> &[(String, String)] {
        &self.new_client_errors
    }

    pub fn cancel_new_client(&mut self) {
        self.new_client = None;
        self.new_client_errors.clear();
    }

    /// Whether the cached list missed a re-fetch after a client was created.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Re-fetches the principal's client list.
    pub fn refresh<R, I>(&mut self, repo: &R, identity: &I) -> ServiceResult<()>
    where
        R: ClientReader + ?Sized,
        I: IdentityProvider + ?Sized,
    {
        self.clients = clients_service::list_clients(repo, identity)?;
        self.needs_refresh = false;
        Ok(())
    }

    /// Validates and persists the open form, closes it, then re-fetches the
    /// client list. The form stays open when validation fails. Once the client
    /// is stored the call succeeds even if the re-fetch fails; the new client
    /// is then put at the top of the cached list and [`Self::needs_refresh`]
    /// is set.
    pub fn submit_new_client<R, I>(&mut self, repo: &R, identity: &I) -> ServiceResult<Client>
    where
        R: ClientReader + ClientWriter + ?Sized,
        I: IdentityProvider + ?Sized,
    {
        let Some(form) = self.new_client.as_ref() else {
            return Err(ServiceError::Form("No client form is open".to_string()));
        };

        let errors = form.field_errors();
        if let Some((_, message)) = errors.first() {
            let message = message.clone();
            self.new_client_errors = errors;
            return Err(ServiceError::Form(message));
        }

        let client = clients_service::create_client(repo, identity, form)?;
        self.cancel_new_client();
        if let Err(err) = self.refresh(repo, identity) {
            log::warn!("Client {} created but the list was not reloaded: {err}", client.id);
            self.clients.insert(0, client.clone());
            self.needs_refresh = true;
        }

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::Utc;

    use super::*;
    use crate::domain::client::{NewClient, UpdateClient};
    use crate::domain::types::{ClientName, PrincipalId};
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    #[derive(Default)]
    struct Navigator {
        calls: usize,
    }

    impl DashboardNavigator for Navigator {
        fn back_to_dashboard(&mut self) {
            self.calls += 1;
        }
    }

    #[derive(Default)]
    struct MockRepo {
        stored: RefCell<Vec<Client>>,
        list_calls: Cell<usize>,
        fail_list: Cell<bool>,
    }

    impl ClientReader for MockRepo {
        fn get_client_by_id(
            &self,
            id: ClientId,
            _user_id: &PrincipalId,
        ) -> RepositoryResult<Option<Client>> {
            Ok(self.stored.borrow().iter().find(|c| c.id == id).cloned())
        }

        fn list_clients(&self, _user_id: &PrincipalId) -> RepositoryResult<Vec<Client>> {
            self.list_calls.set(self.list_calls.get() + 1);
            if self.fail_list.get() {
                return Err(RepositoryError::ConnectionError("timeout".to_string()));
            }
            Ok(self.stored.borrow().iter().rev().cloned().collect())
        }
    }

    impl ClientWriter for MockRepo {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
            let mut stored = self.stored.borrow_mut();
            let client = client(stored.len() as i32 + 1, new_client.details.full_name.as_str());
            stored.push(client.clone());
            Ok(client)
        }

        fn update_client(
            &self,
            _id: ClientId,
            _user_id: &PrincipalId,
            _updates: &UpdateClient,
        ) -> RepositoryResult<Client> {
            Err(RepositoryError::NotFound)
        }

        fn delete_client(&self, _id: ClientId, _user_id: &PrincipalId) -> RepositoryResult<usize> {
            Ok(0)
        }
    }

    fn client(id: i32, name: &str) -> Client {
        let now = Utc::now().naive_utc();
        Client {
            id: ClientId::new(id).unwrap(),
            user_id: PrincipalId::new("owner").unwrap(),
            full_name: ClientName::new(name).unwrap(),
            company: None,
            website: None,
            office_email: None,
            office_phone: None,
            mobile_phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn wizard() -> AssignClientWizard {
        AssignClientWizard::new(vec![client(1, "Randy Dias"), client(2, "Lee Park")])
    }

    fn owner() -> PrincipalId {
        PrincipalId::new("owner").unwrap()
    }

    #[test]
    fn cannot_leave_first_step_without_client() {
        let mut wizard = wizard();
        assert!(!wizard.can_continue());
        assert!(!wizard.continue_step());
        assert_eq!(wizard.step(), AssignStep::SelectClient);
    }

    #[test]
    fn steps_are_gated_by_selection() {
        let mut wizard = wizard();
        assert!(wizard.select_client(ClientId::new(2).unwrap()));
        assert!(wizard.continue_step());
        assert_eq!(wizard.step().number(), 2);

        assert!(!wizard.continue_step());
        wizard.select_country(CountryCode::new("fr").unwrap());
        assert!(wizard.continue_step());
        assert_eq!(wizard.step(), AssignStep::CreateJob);
        assert!(!wizard.continue_step());
    }

    #[test]
    fn unknown_client_is_not_selected() {
        let mut wizard = wizard();
        assert!(!wizard.select_client(ClientId::new(99).unwrap()));
        assert_eq!(wizard.selection().selected_client_id, None);
    }

    #[test]
    fn back_keeps_selections() {
        let mut wizard = wizard();
        let mut navigator = Navigator::default();
        wizard.select_client(ClientId::new(1).unwrap());
        wizard.continue_step();
        wizard.select_country(CountryCode::new("DE").unwrap());
        wizard.continue_step();

        wizard.back(&mut navigator);
        wizard.back(&mut navigator);
        assert_eq!(wizard.step(), AssignStep::SelectClient);
        assert_eq!(navigator.calls, 0);
        assert_eq!(
            wizard.selected_client().map(|c| c.full_name.as_str()),
            Some("Randy Dias")
        );
        assert_eq!(
            wizard
                .selection()
                .selected_country_code
                .as_ref()
                .map(CountryCode::as_str),
            Some("DE")
        );
        assert!(wizard.continue_step());
    }

    #[test]
    fn back_from_first_step_leaves_wizard() {
        let mut wizard = wizard();
        let mut navigator = Navigator::default();
        wizard.back(&mut navigator);
        assert_eq!(navigator.calls, 1);
        assert_eq!(wizard.step(), AssignStep::SelectClient);
    }

    #[test]
    fn new_client_form_does_not_change_step() {
        let mut wizard = wizard();
        wizard.select_client(ClientId::new(1).unwrap());
        wizard.continue_step();

        wizard.open_new_client();
        assert!(wizard.is_new_client_open());
        assert_eq!(wizard.step(), AssignStep::SelectLocation);

        wizard.cancel_new_client();
        assert!(!wizard.is_new_client_open());
        assert_eq!(wizard.step(), AssignStep::SelectLocation);
    }

    #[test]
    fn invalid_new_client_keeps_form_open() {
        let repo = MockRepo::default();
        let mut wizard = AssignClientWizard::default();
        wizard.open_new_client();
        if let Some(form) = wizard.new_client_form_mut() {
            form.website = "bad url".to_string();
        }

        let result = wizard.submit_new_client(&repo, &owner());
        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(wizard.is_new_client_open());
        let fields: Vec<&str> = wizard
            .new_client_errors()
            .iter()
            .map(|(field, _)| field.as_str())
            .collect();
        assert_eq!(fields, vec!["fullName", "website"]);
        assert!(repo.stored.borrow().is_empty());
    }

    #[test]
    fn created_client_triggers_refetch() {
        let repo = MockRepo::default();
        repo.stored.borrow_mut().push(client(1, "Existing"));
        let mut wizard = AssignClientWizard::load(&repo, &owner()).unwrap();
        assert_eq!(repo.list_calls.get(), 1);

        wizard.open_new_client();
        if let Some(form) = wizard.new_client_form_mut() {
            form.full_name = "Nia Long".to_string();
        }
        let created = wizard.submit_new_client(&repo, &owner()).unwrap();

        assert_eq!(repo.list_calls.get(), 2);
        assert!(!wizard.is_new_client_open());
        let names: Vec<&str> = wizard
            .clients()
            .iter()
            .map(|c| c.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["Nia Long", "Existing"]);
        assert!(wizard.select_client(created.id));
        assert_eq!(wizard.cards()[0].initials, "NL");
    }

    #[test]
    fn submitting_without_open_form_fails() {
        let repo = MockRepo::default();
        let mut wizard = AssignClientWizard::default();
        assert!(matches!(
            wizard.submit_new_client(&repo, &owner()),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn anonymous_session_cannot_create_clients() {
        let repo = MockRepo::default();
        let mut wizard = AssignClientWizard::default();
        wizard.open_new_client();
        if let Some(form) = wizard.new_client_form_mut() {
            form.full_name = "Nia".to_string();
        }
        let anonymous: Option<PrincipalId> = None;
        assert!(matches!(
            wizard.submit_new_client(&repo, &anonymous),
            Err(ServiceError::Unauthorized)
        ));
        assert!(wizard.is_new_client_open());
    }

    #[test]
    fn failed_refetch_still_reports_created_client() {
        let repo = MockRepo::default();
        repo.stored.borrow_mut().push(client(1, "Existing"));
        let mut wizard = AssignClientWizard::load(&repo, &owner()).unwrap();

        wizard.open_new_client();
        if let Some(form) = wizard.new_client_form_mut() {
            form.full_name = "Nia Long".to_string();
        }
        repo.fail_list.set(true);
        let created = wizard.submit_new_client(&repo, &owner()).unwrap();

        assert_eq!(created.full_name.as_str(), "Nia Long");
        assert!(!wizard.is_new_client_open());
        assert!(wizard.needs_refresh());
        assert_eq!(repo.stored.borrow().len(), 2);
        let names: Vec<&str> = wizard.clients().iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["Nia Long", "Existing"]);

        repo.fail_list.set(false);
        wizard.refresh(&repo, &owner()).unwrap();
        assert!(!wizard.needs_refresh());
        assert_eq!(wizard.clients().len(), 2);
    }
}
