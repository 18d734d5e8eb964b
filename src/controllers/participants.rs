use thiserror::Error;

use crate::api::client::ApiError;
use crate::api::models::{Contact, ParticipantDraft};
use crate::controllers::{LoadState, load_failure};
use crate::forms::{Field, FormError, FormState, PARTICIPANT_FORM};

pub const PAGE_SIZE: usize = 10;
pub const CREATED_MESSAGE: &str = "User Created";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error("Failed to create participant. Please try again.")]
    Api(#[source] ApiError),
}

/// Paged participant list. Creating a participant does not feed back into
/// the list: the page stays as fetched until the next reload.
#[derive(Debug)]
pub struct ParticipantList {
    all: Vec<Contact>,
    page_size: usize,
    current_page: usize,
    total_pages: usize,
    form: FormState,
    show_modal: bool,
    state: LoadState,
}

impl Default for ParticipantList {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticipantList {
    pub fn new() -> Self {
        Self {
            all: Vec::new(),
            page_size: PAGE_SIZE,
            current_page: 1,
            total_pages: 0,
            form: FormState::new(&PARTICIPANT_FORM),
            show_modal: false,
            state: LoadState::Idle,
        }
    }

    pub fn all(&self) -> &[Contact] {
        &self.all
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
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

    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Contact>, ApiError>) {
        match result {
            Ok(records) => {
                self.all = records;
                self.total_pages = self.all.len().div_ceil(self.page_size);
                self.state = LoadState::Loaded;
                log::info!(
                    "Participants loaded: {} ({} pages)",
                    self.all.len(),
                    self.total_pages
                );
                self.load_page(1);
            }
            Err(err) => {
                log::error!("Error loading participants: {err}");
                self.state = LoadState::Error(load_failure("participants", &err));
            }
        }
    }

    /// Jumps to `page` without range checks; out of range pages are empty.
    pub fn load_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// The records on the current page.
    pub fn page(&self) -> &[Contact] {
        let Some(offset) = self
            .current_page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(self.page_size))
        else {
            return &[];
        };
        let start = offset.min(self.all.len());
        let end = (start + self.page_size).min(self.all.len());
        &self.all[start..end]
    }

    pub fn go_to_previous(&mut self) {
        if self.current_page > 1 {
            self.load_page(self.current_page - 1);
        }
    }

    pub fn go_to_next(&mut self) {
        if self.current_page < self.total_pages {
            self.load_page(self.current_page + 1);
        }
    }

    pub fn open_modal(&mut self) {
        self.show_modal = true;
    }

    pub fn close_modal(&mut self) {
        self.show_modal = false;
        self.form.reset();
    }

    /// Validates and returns the raw form values to POST. An invalid form
    /// has all its fields marked touched so every error shows.
    pub fn prepare_submission(&mut self) -> Result<ParticipantDraft, SubmitError> {
        if let Err(err) = self.form.validate() {
            self.form.mark_all_touched();
            log::warn!("participant form rejected: {:?}", err.fields);
            return Err(err.into());
        }
        let form = &self.form;
        Ok(ParticipantDraft {
            name: form.value(Field::Name).to_string(),
            ndis: form.value(Field::Ndis).to_string(),
            state: form.value(Field::State).to_string(),
            status: form.value(Field::Status).to_string(),
        })
    }

    /// Reports the POST outcome. The list is deliberately left as is.
    pub fn finish_submission(&mut self, result: Result<(), ApiError>) -> Result<(), SubmitError> {
        result.map_err(|err| {
            log::error!("Error creating participant: {err}");
            SubmitError::Api(err)
        })?;
        log::info!("Participant submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn records(n: usize) -> Vec<Contact> {
        (1..=n)
            .map(|i| {
                serde_json::from_value(json!({"id": i, "name": format!("P{i}"), "state": "WA"}))
                    .unwrap()
            })
            .collect()
    }

    fn loaded(n: usize) -> ParticipantList {
        let mut list = ParticipantList::new();
        list.begin_load();
        list.finish_load(Ok(records(n)));
        list
    }

    fn fill_form(list: &mut ParticipantList) {
        let form = list.form_mut();
        form.input(Field::Name, "Kim Park");
        form.input(Field::Ndis, "987654321");
        form.input(Field::State, "QLD");
        form.input(Field::Status, "On hold");
    }

    #[test]
    fn twenty_five_records_make_three_pages() {
        let list = loaded(25);
        assert_eq!(list.total_pages(), 3);
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.page().len(), 10);
        assert_eq!(list.page()[0].name, "P1");
    }

    #[test]
    fn last_page_is_partial() {
        let mut list = loaded(25);
        list.load_page(3);
        assert_eq!(list.page().len(), 5);
        assert_eq!(list.page()[4].name, "P25");
    }

    #[test]
    fn next_and_previous_stay_in_range() {
        let mut list = loaded(25);
        list.go_to_previous();
        assert_eq!(list.current_page(), 1);
        list.go_to_next();
        list.go_to_next();
        assert_eq!(list.current_page(), 3);
        list.go_to_next();
        assert_eq!(list.current_page(), 3);
        list.go_to_previous();
        assert_eq!(list.current_page(), 2);
        assert_eq!(list.page()[0].name, "P11");
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let mut list = loaded(25);
        list.load_page(7);
        assert!(list.page().is_empty());
        list.load_page(0);
        assert!(list.page().is_empty());
        list.load_page(usize::MAX);
        assert!(list.page().is_empty());
    }

    #[test]
    fn empty_list_has_no_pages() {
        let mut list = loaded(0);
        assert_eq!(list.total_pages(), 0);
        assert!(list.page().is_empty());
        list.go_to_next();
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn failed_fetch_sets_error() {
        let mut list = ParticipantList::new();
        list.begin_load();
        assert!(list.state().is_loading());
        list.finish_load(Err(ApiError::Status(StatusCode::NOT_FOUND)));
        assert_eq!(
            list.state().error_message(),
            Some("Failed to load participants from API: HTTP 404 Not Found")
        );
        assert!(list.all().is_empty());
    }

    #[test]
    fn invalid_submission_marks_everything_touched() {
        let mut list = loaded(3);
        list.open_modal();
        list.form_mut().input(Field::Name, "Kim");
        let err = list.prepare_submission().unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(list.form().is_touched(Field::Status));
        assert_eq!(list.form().visible_errors().len(), 3);
    }

    #[test]
    fn submission_posts_raw_values() {
        let mut list = loaded(3);
        fill_form(&mut list);
        let draft = list.prepare_submission().unwrap();
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"name": "Kim Park", "ndis": "987654321", "state": "QLD", "status": "On hold"})
        );
    }

    #[test]
    fn successful_create_leaves_page_stale() {
        let mut list = loaded(25);
        list.go_to_next();
        let before: Vec<Contact> = list.page().to_vec();
        fill_form(&mut list);
        list.prepare_submission().unwrap();
        list.finish_submission(Ok(())).unwrap();
        assert_eq!(list.page(), before.as_slice());
        assert_eq!(list.all().len(), 25);
        assert_eq!(list.total_pages(), 3);
    }

    #[test]
    fn failed_create_reports_error() {
        let mut list = loaded(1);
        let err = list
            .finish_submission(Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create participant. Please try again.");
    }

    #[test]
    fn closing_modal_resets_form() {
        let mut list = loaded(1);
        list.open_modal();
        fill_form(&mut list);
        list.close_modal();
        assert!(!list.is_modal_open());
        assert_eq!(list.form().value(Field::Name), "");
    }
}
