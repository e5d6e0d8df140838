//! App-wide yewdux store.
//!
//! # Design
//! - The core stores own behavior; this store mirrors their snapshots so
//!   components can select slices and re-render on change.
//! - Files state is owned here since only the searchbar and list touch it.

use docboard_core::authorization::ApplicationState;
use docboard_core::files::FilesState;
use docboard_core::settings::SettingsState;
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Mirror of the settings store.
    pub settings: SettingsState,
    /// Mirror of the application store.
    pub application: ApplicationState,
    /// Searchbar and document list state.
    pub files: FilesState,
}

impl AppStore {
    /// Publish a new search query. Unchanged queries are ignored.
    pub fn set_search_query(&mut self, query: String) -> bool {
        if self.files.search_query == query {
            return false;
        }
        self.files.search_query = query;
        true
    }

    /// Mark documents as reloading.
    pub const fn begin_files_load(&mut self) {
        self.files.begin_load();
    }

    /// Mark the document reload as done.
    pub const fn finish_files_load(&mut self) {
        self.files.finish_load();
    }
}

/// Dispatcher for the global store.
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_updates_only_on_change() {
        let mut store = AppStore::default();
        assert!(store.set_search_query("report".into()));
        assert!(!store.set_search_query("report".into()));
        assert_eq!(store.files.search_query, "report");
        assert!(store.set_search_query(String::new()));
    }

    #[test]
    fn files_load_cycle_gates_the_searchbar() {
        let mut store = AppStore::default();
        store.begin_files_load();
        assert!(store.files.search_disabled());
        store.finish_files_load();
        assert!(!store.files.search_disabled());
        assert!(store.files.initialized && !store.files.loading);
    }
}
