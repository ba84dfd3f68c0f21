//! Intent-level session over one application state.
//!
//! # Responsibility
//! - Hold the single live [`AppState`] and its injected collaborators.
//! - Persist `categories` and `darkMode` whenever they change.
//!
//! # Invariants
//! - Category writes happen only when the category list allocation changed.
//! - Theme writes and theme application happen only when the flag changed.
//! - Storage write failures never abort an intent; they become notices.

use crate::host::{AmbientPreference, NamePrompt, NoopThemeSink, ThemeSink};
use crate::model::category::{Category, CategoryId};
use crate::model::todo::{Todo, TodoId};
use crate::persist::{load_snapshot, save_categories, save_theme, PersistError, ThemeOrigin};
use crate::storage::KeyValueStore;
use crate::store::AppState;
use crate::view::{current_category, visible_todos};
use log::{debug, error, info};

/// Message shown when asking for a new category name.
pub const NEW_CATEGORY_PROMPT: &str = "New category name:";

/// Non-fatal storage problem surfaced to the user.
///
/// Repeated failures for the same key fold into one notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNotice {
    /// Storage key whose write failed.
    pub key: &'static str,
    /// Description of the latest failure.
    pub message: String,
    /// Failed writes folded into this notice.
    pub occurrences: u32,
}

/// Running application session.
pub struct Session<S: KeyValueStore, T: ThemeSink = NoopThemeSink> {
    state: AppState,
    store: S,
    theme_sink: T,
    notices: Vec<StorageNotice>,
}

impl<S: KeyValueStore> Session<S, NoopThemeSink> {
    /// Opens a session that renders no theme.
    pub fn open<A: AmbientPreference + ?Sized>(store: S, ambient: &A) -> Self {
        Self::open_with_theme_sink(store, ambient, NoopThemeSink)
    }
}

impl<S: KeyValueStore, T: ThemeSink> Session<S, T> {
    /// Loads the stored snapshot and starts a session.
    ///
    /// # Side effects
    /// - Applies the startup theme to `theme_sink`.
    /// - Writes the theme flag when it came from the ambient preference, so the
    ///   preference is consulted only on first run.
    pub fn open_with_theme_sink<A: AmbientPreference + ?Sized>(
        store: S,
        ambient: &A,
        theme_sink: T,
    ) -> Self {
        let snapshot = load_snapshot(&store, ambient);
        let theme_origin = snapshot.theme_origin;
        let mut session = Self {
            state: AppState::from_snapshot(snapshot.categories, snapshot.dark_mode),
            store,
            theme_sink,
            notices: Vec::new(),
        };

        session.theme_sink.apply_theme(session.state.dark_mode());
        if theme_origin == ThemeOrigin::Ambient {
            let dark_mode = session.state.dark_mode();
            let result = save_theme(&mut session.store, dark_mode);
            session.absorb(result);
        }

        info!(
            "event=session_open module=session status=ok categories={} dark_mode={} theme_origin={:?}",
            session.state.categories().len(),
            session.state.dark_mode(),
            theme_origin
        );
        session
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn theme_sink(&self) -> &T {
        &self.theme_sink
    }

    /// Releases the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Storage notices raised since the last [`Session::take_notices`],
    /// at most one per storage key.
    pub fn notices(&self) -> &[StorageNotice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<StorageNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn current_category(&self) -> Option<&Category> {
        current_category(&self.state)
    }

    pub fn visible_todos(&self) -> Vec<&Todo> {
        visible_todos(&self.state)
    }

    /// Creates and selects a category. Empty names are ignored.
    pub fn add_category(&mut self, name: &str) {
        let next = self.state.create_category(name);
        self.commit(next);
    }

    /// Asks `prompt` for a name and creates the category unless cancelled.
    pub fn add_category_with_prompt<P: NamePrompt + ?Sized>(&mut self, prompt: &mut P) {
        match prompt.ask(NEW_CATEGORY_PROMPT) {
            Some(name) => self.add_category(&name),
            None => debug!("event=category_create module=session status=cancelled"),
        }
    }

    pub fn select_category(&mut self, id: Option<CategoryId>) {
        let next = self.state.set_selected_category(id);
        self.commit(next);
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        let next = self.state.set_draft_text(text);
        self.commit(next);
    }

    pub fn set_draft_date(&mut self, date: impl Into<String>) {
        let next = self.state.set_draft_date(date);
        self.commit(next);
    }

    /// Creates or updates a todo from the draft in the selected category.
    pub fn submit(&mut self) {
        let next = self.state.submit_draft();
        if next == self.state {
            debug!("event=todo_submit module=session status=skipped");
        }
        self.commit(next);
    }

    /// Starts editing todo `todo_id` of the current category.
    ///
    /// Returns `false` when the current category has no such todo.
    pub fn begin_edit(&mut self, todo_id: TodoId) -> bool {
        let Some(todo) = self
            .current_category()
            .and_then(|category| category.todo(todo_id))
            .cloned()
        else {
            return false;
        };
        let next = self.state.begin_edit(&todo);
        self.commit(next);
        true
    }

    /// Deletes todo `todo_id` from the selected category.
    pub fn delete_todo(&mut self, todo_id: TodoId) {
        let Some(category_id) = self.state.selected_category_id().cloned() else {
            return;
        };
        let next = self.state.delete_todo(&category_id, todo_id);
        self.commit(next);
    }

    /// Flips completion of todo `todo_id` in the selected category.
    pub fn toggle_complete(&mut self, todo_id: TodoId) {
        let Some(category_id) = self.state.selected_category_id().cloned() else {
            return;
        };
        let next = self.state.toggle_complete(&category_id, todo_id);
        self.commit(next);
    }

    pub fn search(&mut self, term: impl Into<String>) {
        let next = self.state.set_search_term(term);
        self.commit(next);
    }

    pub fn set_theme(&mut self, dark_mode: bool) {
        let next = self.state.set_theme(dark_mode);
        self.commit(next);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(!self.state.dark_mode());
    }

    fn commit(&mut self, next: AppState) {
        let categories_changed = !next.shares_categories_with(&self.state);
        let theme_changed = next.dark_mode() != self.state.dark_mode();
        self.state = next;

        if categories_changed {
            let result = save_categories(&mut self.store, self.state.categories());
            self.absorb(result);
        }
        if theme_changed {
            let dark_mode = self.state.dark_mode();
            self.theme_sink.apply_theme(dark_mode);
            let result = save_theme(&mut self.store, dark_mode);
            self.absorb(result);
        }
    }

    fn absorb(&mut self, result: Result<(), PersistError>) {
        let Err(err) = result else {
            return;
        };
        let key = err.key();
        error!(
            "event=snapshot_save module=session status=error key={} error={}",
            key, err
        );
        let message = format!("changes are kept in memory only: {err}");
        match self.notices.iter_mut().find(|notice| notice.key == key) {
            Some(notice) => {
                notice.message = message;
                notice.occurrences = notice.occurrences.saturating_add(1);
            }
            None => self.notices.push(StorageNotice {
                key,
                message,
                occurrences: 1,
            }),
        }
    }
}
