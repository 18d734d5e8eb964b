/// The two screens, addressed the same way the web build addressed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Participants,
    Contacts,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Participants, Route::Contacts];

    pub fn path(self) -> &'static str {
        match self {
            Route::Participants => "/participants",
            Route::Contacts => "/contacts",
        }
    }

    /// Stack page name.
    pub fn name(self) -> &'static str {
        self.path().trim_start_matches('/')
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Participants => "Participants",
            Route::Contacts => "Contacts",
        }
    }

    /// The root path redirects to participants. Unknown paths give `None`.
    pub fn resolve(path: &str) -> Option<Route> {
        match path.trim().trim_end_matches('/') {
            "" => Some(Route::Participants),
            p => Route::ALL
                .into_iter()
                .find(|r| r.path() == p || r.name() == p),
        }
    }

    /// Like [`Route::resolve`] but falls back to the root redirect.
    pub fn resolve_or_default(path: &str) -> Route {
        Route::resolve(path).unwrap_or_else(|| {
            log::warn!("unknown route {path:?}, showing participants");
            Route::Participants
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_to_participants() {
        assert_eq!(Route::resolve(""), Some(Route::Participants));
        assert_eq!(Route::resolve("/"), Some(Route::Participants));
    }

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::resolve("/contacts"), Some(Route::Contacts));
        assert_eq!(Route::resolve("/participants/"), Some(Route::Participants));
        assert_eq!(Route::resolve("contacts"), Some(Route::Contacts));
    }

    #[test]
    fn unknown_paths_fall_back() {
        assert_eq!(Route::resolve("/leads"), None);
        assert_eq!(Route::resolve_or_default("/leads"), Route::Participants);
    }
}
