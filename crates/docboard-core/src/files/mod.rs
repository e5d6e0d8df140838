//! Document search: shared search state and the searchbar debounce.
//!
//! # Design
//! - The searchbar keeps its own sanitized text for immediate feedback and
//!   pushes it to the shared [`FilesState`] only after typing pauses.
//! - Each keystroke issues a new [`DebounceTicket`]; only the latest ticket
//!   can propagate, so a timer that fires late is ignored.

use crate::sanitize::sanitize_search_query;
use std::time::Duration;

/// Pause after the last keystroke before the query is shared.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// File list state shared between the searchbar and the document list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilesState {
    /// Query the document list filters by.
    pub search_query: String,
    /// A document fetch is in flight.
    pub loading: bool,
    /// The first document fetch has completed.
    pub initialized: bool,
}

impl FilesState {
    /// The searchbar is unusable until the first fetch completes.
    #[must_use]
    pub const fn search_disabled(&self) -> bool {
        self.loading && !self.initialized
    }

    /// A document reload started.
    pub const fn begin_load(&mut self) {
        self.loading = true;
    }

    /// A document reload finished; the list has been loaded at least once.
    pub const fn finish_load(&mut self) {
        self.loading = false;
        self.initialized = true;
    }
}

/// Handle for one scheduled propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Searchbar-local text with pending-propagation bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct SearchInput {
    local_query: String,
    generation: u64,
    pending: Option<u64>,
}

impl SearchInput {
    /// Start from the shared query.
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            local_query: initial.to_string(),
            ..Self::default()
        }
    }

    /// Text shown in the input.
    #[must_use]
    pub fn local_query(&self) -> &str {
        &self.local_query
    }

    /// Whether the clear button should show.
    #[must_use]
    pub const fn has_query(&self) -> bool {
        !self.local_query.is_empty()
    }

    /// Whether a propagation is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a keystroke. Supersedes any earlier pending propagation.
    pub fn input(&mut self, raw: &str) -> DebounceTicket {
        self.local_query = sanitize_search_query(raw);
        self.generation += 1;
        self.pending = Some(self.generation);
        DebounceTicket(self.generation)
    }

    /// Timer for `ticket` fired: the query to share, if the ticket is current.
    pub fn elapse(&mut self, ticket: DebounceTicket) -> Option<String> {
        if self.pending != Some(ticket.0) {
            return None;
        }
        self.pending = None;
        Some(self.local_query.clone())
    }

    /// Drop any pending propagation.
    pub const fn cancel(&mut self) {
        self.pending = None;
    }

    /// Empty the input and cancel the pending propagation.
    pub fn clear(&mut self) {
        self.local_query.clear();
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_disabled_only_before_the_first_load_completes() {
        let mut files = FilesState::default();
        assert!(!files.search_disabled());
        files.begin_load();
        assert!(files.search_disabled());
        files.finish_load();
        assert!(!files.search_disabled());
        assert!(files.initialized);

        files.begin_load();
        assert!(files.loading);
        assert!(!files.search_disabled());
    }

    #[test]
    fn rapid_typing_propagates_once() {
        let debounce = u64::try_from(SEARCH_DEBOUNCE.as_millis()).unwrap_or(u64::MAX);
        let mut input = SearchInput::default();
        let mut timers = Vec::new();
        for (at_ms, text) in [(0, "a"), (100, "ab"), (200, "abc")] {
            timers.push((at_ms + debounce, input.input(text)));
        }

        let propagated: Vec<(u64, String)> = timers
            .into_iter()
            .filter_map(|(fires_at, ticket)| input.elapse(ticket).map(|query| (fires_at, query)))
            .collect();

        assert_eq!(propagated, vec![(500, "abc".to_string())]);
        assert!(!input.is_pending());
    }

    #[test]
    fn keystrokes_are_sanitized_locally() {
        let mut input = SearchInput::new("");
        let ticket = input.input("  <b>report</b>  ");
        assert_eq!(input.local_query(), "report");
        assert_eq!(input.elapse(ticket).as_deref(), Some("report"));
    }

    #[test]
    fn clear_cancels_pending_propagation() {
        let mut input = SearchInput::new("old");
        let ticket = input.input("new");
        input.clear();
        assert!(!input.has_query());
        assert_eq!(input.elapse(ticket), None);
    }

    #[test]
    fn ticket_fires_at_most_once() {
        let mut input = SearchInput::default();
        let ticket = input.input("q");
        assert!(input.elapse(ticket).is_some());
        assert_eq!(input.elapse(ticket), None);
    }

    #[test]
    fn search_disabled_only_before_first_load() {
        let mut state = FilesState {
            loading: true,
            ..FilesState::default()
        };
        assert!(state.search_disabled());
        state.initialized = true;
        assert!(!state.search_disabled());
    }
}
