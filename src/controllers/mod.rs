//! Screen state for the contacts and participants views.
//!
//! Controllers never do I/O themselves. The view starts a request with
//! `begin_*`/`prepare_*`, runs it on the runtime, and feeds the outcome back
//! through `finish_*` on the main loop.

pub mod contacts;
pub mod display;
pub mod participants;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

pub(crate) const INVALID_DATA_MESSAGE: &str = "Invalid data format received from API";

/// Message shown when a list fetch fails.
pub(crate) fn load_failure(what: &str, err: &crate::api::client::ApiError) -> String {
    if err.is_invalid_data() {
        INVALID_DATA_MESSAGE.to_string()
    } else {
        format!("Failed to load {what} from API: {err}")
    }
}
