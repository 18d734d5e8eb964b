use chrono::{DateTime, Local};
use thiserror::Error;

use crate::api::client::ApiError;
use crate::api::models::{Contact, RecordId};
use crate::controllers::{LoadState, load_failure};
use crate::forms::{CONTACT_FORM, Field, FormError, FormState};

pub const ROLE_LEAD: &str = "lead";
pub const ROLE_PARTICIPANT: &str = "participant";
pub const NO_EMAIL: &str = "No Email";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error("Failed to save contact. Please try again.")]
    Api(#[source] ApiError),
}

/// Search box plus the two exact-match dropdowns. Empty parts match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub search_text: String,
    pub status: String,
    pub role: String,
}

impl ContactFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        self.matches_search(contact)
            && (self.status.is_empty() || contact.status.as_deref() == Some(self.status.as_str()))
            && (self.role.is_empty() || contact.role.as_deref() == Some(self.role.as_str()))
    }

    // Name and email compare case-insensitively, NDIS and phone as typed.
    fn matches_search(&self, contact: &Contact) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        contact.name.to_lowercase().contains(&needle)
            || contact
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle))
            || contact
                .ndis
                .as_deref()
                .is_some_and(|n| n.contains(&self.search_text))
            || contact
                .phone
                .as_deref()
                .is_some_and(|p| p.contains(&self.search_text))
    }

    pub fn apply(&self, contacts: &[Contact]) -> Vec<Contact> {
        contacts.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}

#[derive(Debug)]
pub struct ContactList {
    contacts: Vec<Contact>,
    filtered: Vec<Contact>,
    filter: ContactFilter,
    form: FormState,
    show_modal: bool,
    is_lead: bool,
    state: LoadState,
}

impl Default for ContactList {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactList {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            filtered: Vec::new(),
            filter: ContactFilter::default(),
            form: FormState::new(&CONTACT_FORM),
            show_modal: false,
            is_lead: false,
            state: LoadState::Idle,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn filtered(&self) -> &[Contact] {
        &self.filtered
    }

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn is_modal_open(&self) -> bool {
        self.show_modal
    }

    pub fn is_lead(&self) -> bool {
        self.is_lead
    }

    /// Marks the list as loading. The caller issues the GET.
    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Explicit reload from the refresh button.
    pub fn refresh_contacts(&mut self) {
        self.begin_load();
    }

    pub fn finish_load(&mut self, result: Result<Vec<Contact>, ApiError>) {
        match result {
            Ok(records) => {
                self.contacts = records.into_iter().map(Contact::normalized).collect();
                self.apply_filters();
                self.state = LoadState::Loaded;
                log::info!("Contacts loaded: {}", self.contacts.len());
            }
            Err(err) => {
                log::error!("Error loading contacts: {err}");
                self.state = LoadState::Error(load_failure("contacts", &err));
            }
        }
    }

    pub fn apply_filters(&mut self) {
        self.filtered = self.filter.apply(&self.contacts);
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.filter.search_text = text.to_string();
        self.apply_filters();
    }

    pub fn set_status_filter(&mut self, status: &str) {
        self.filter.status = status.to_string();
        self.apply_filters();
    }

    pub fn set_role_filter(&mut self, role: &str) {
        self.filter.role = role.to_string();
        self.apply_filters();
    }

    pub fn clear_filters(&mut self) {
        self.filter = ContactFilter::default();
        self.apply_filters();
    }

    pub fn open_add_contact(&mut self) {
        self.open_form(false);
    }

    pub fn open_add_lead(&mut self) {
        self.open_form(true);
    }

    fn open_form(&mut self, lead: bool) {
        self.is_lead = lead;
        self.show_modal = true;
        self.form.reset();
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
    }

    /// Validates the form and builds the record to POST.
    pub fn prepare_entry(&self) -> Result<Contact, SaveError> {
        self.form.validate()?;
        Ok(self.draft_at(Local::now()))
    }

    fn draft_at(&self, now: DateTime<Local>) -> Contact {
        let form = &self.form;
        let ndis = form.value(Field::Ndis);
        let id = ndis
            .parse::<i64>()
            .ok()
            .filter(|n| *n != 0)
            .unwrap_or_else(|| now.timestamp_millis());
        let email = form.value(Field::Email);
        let service_type = form.value(Field::ServiceType);
        Contact {
            id: Some(RecordId::Number(id)),
            name: form.value(Field::Name).to_string(),
            state: form.value(Field::State).to_string(),
            email: Some((if email.is_empty() { NO_EMAIL } else { email }).to_string()),
            phone: None,
            ndis: (!ndis.is_empty()).then(|| ndis.to_string()),
            status: Some(form.value(Field::Status).to_string()),
            role: Some((if self.is_lead { ROLE_LEAD } else { ROLE_PARTICIPANT }).to_string()),
            last_contact: Some(now.format("%-m/%-d/%Y").to_string()),
            service_type: (!service_type.is_empty()).then(|| service_type.to_string()),
            extra: Default::default(),
        }
    }

    /// Applies the POST outcome. On success the server's record, not the
    /// draft, joins the list. On failure nothing local changes.
    pub fn finish_save(&mut self, result: Result<Contact, ApiError>) -> Result<(), SaveError> {
        match result {
            Ok(saved) => {
                match &saved.id {
                    Some(id) => log::info!("Contact saved: {id}"),
                    None => log::warn!("Contact saved without an id"),
                }
                self.contacts.push(saved);
                self.apply_filters();
                self.show_modal = false;
                self.form.reset();
                Ok(())
            }
            Err(err) => {
                log::error!("Error saving contact: {err}");
                Err(SaveError::Api(err))
            }
        }
    }
}
