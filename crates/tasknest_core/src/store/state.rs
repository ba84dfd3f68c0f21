//! Application state value and intent operations.

use crate::model::category::{Category, CategoryId};
use crate::model::todo::{Todo, TodoId};
use crate::store::draft::Draft;
use std::sync::Arc;

/// Shared, immutable category list.
///
/// Cloning is a reference-count bump; operations build a new slice and reuse
/// the `Arc<Category>` of every category they do not touch.
pub type CategoryList = Arc<[Arc<Category>]>;

/// Full application state: persisted categories and theme plus transient UI
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    categories: CategoryList,
    selected_category_id: Option<CategoryId>,
    search_term: String,
    draft: Draft,
    dark_mode: bool,
    /// Highest todo id handed out or loaded; next id is this plus one.
    todo_high_water: i64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_snapshot(Vec::new(), false)
    }
}

impl AppState {
    /// Builds the startup state from loaded persisted values.
    ///
    /// Selection, search and draft start empty.
    pub fn from_snapshot(categories: Vec<Category>, dark_mode: bool) -> Self {
        let todo_high_water = categories
            .iter()
            .filter_map(Category::max_todo_id)
            .map(TodoId::get)
            .max()
            .unwrap_or(0);

        Self {
            categories: categories.into_iter().map(Arc::new).collect(),
            selected_category_id: None,
            search_term: String::new(),
            draft: Draft::default(),
            dark_mode,
            todo_high_water,
        }
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    /// Shared handle of the category list, for change detection by pointer.
    pub fn category_list(&self) -> &CategoryList {
        &self.categories
    }

    /// Returns true when `other` holds the same category allocation.
    pub fn shares_categories_with(&self, other: &AppState) -> bool {
        Arc::ptr_eq(&self.categories, &other.categories)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| &category.id == id)
            .map(Arc::as_ref)
    }

    pub fn selected_category_id(&self) -> Option<&CategoryId> {
        self.selected_category_id.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Appends a new empty category named `name` and selects it.
    ///
    /// Empty names are ignored. Duplicate names are allowed.
    pub fn create_category(&self, name: &str) -> Self {
        self.create_category_with_id(CategoryId::generate(), name)
    }

    /// Same as [`AppState::create_category`] with a caller-chosen id.
    ///
    /// An id already present in the list is ignored, keeping ids unique.
    pub fn create_category_with_id(&self, id: CategoryId, name: &str) -> Self {
        if name.is_empty() || self.category(&id).is_some() {
            return self.clone();
        }

        let mut categories = self.categories.to_vec();
        categories.push(Arc::new(Category::new(id.clone(), name)));

        Self {
            categories: categories.into(),
            selected_category_id: Some(id),
            ..self.clone()
        }
    }

    /// Creates a todo or updates the one being edited.
    ///
    /// Requires non-blank `text` and `date` and a `category_id` that resolves;
    /// otherwise the state is returned unchanged, draft included.
    ///
    /// - `editing_id == None`: appends a new open todo with a fresh id.
    /// - `editing_id == Some(id)`: replaces text and date of todo `id`, keeping
    ///   its id and completion. No matching todo leaves the list unchanged.
    ///
    /// Once the inputs validate, the draft is cleared.
    pub fn submit_todo(
        &self,
        category_id: Option<&CategoryId>,
        text: &str,
        date: &str,
        editing_id: Option<TodoId>,
    ) -> Self {
        if text.trim().is_empty() || date.trim().is_empty() {
            return self.clone();
        }
        let Some(index) = category_id.and_then(|id| self.position_of(id)) else {
            return self.clone();
        };
        let target = &self.categories[index];

        let mut next = Self {
            draft: Draft::default(),
            ..self.clone()
        };

        match editing_id {
            None => {
                let fresh = match self.todo_high_water.checked_add(1) {
                    Some(value) => Some(TodoId(value)),
                    None => target.lowest_free_todo_id(),
                };
                let Some(id) = fresh else {
                    return self.clone();
                };
                let todo = Todo::new(id, text, date);
                next.categories = self.replace_at(index, target.with_appended(todo));
                next.todo_high_water = self.todo_high_water.max(id.get());
            }
            Some(editing_id) => {
                if let Some(updated) =
                    target.with_updated(editing_id, |todo| todo.with_content(text, date))
                {
                    next.categories = self.replace_at(index, updated);
                }
            }
        }

        next
    }

    /// Submits the pending draft against the selected category.
    pub fn submit_draft(&self) -> Self {
        self.submit_todo(
            self.selected_category_id.as_ref(),
            &self.draft.text,
            &self.draft.date,
            self.draft.editing_id,
        )
    }

    /// Removes todo `todo_id` from `category_id`; no-op when either is missing.
    pub fn delete_todo(&self, category_id: &CategoryId, todo_id: TodoId) -> Self {
        self.rewrite_category(category_id, |category| category.without(todo_id))
    }

    /// Flips the completion flag of todo `todo_id`; no-op when missing.
    pub fn toggle_complete(&self, category_id: &CategoryId, todo_id: TodoId) -> Self {
        self.rewrite_category(category_id, |category| {
            category.with_updated(todo_id, Todo::toggled)
        })
    }

    /// Loads `todo` into the draft and marks it as the edit target.
    pub fn begin_edit(&self, todo: &Todo) -> Self {
        Self {
            draft: Draft::editing(todo),
            ..self.clone()
        }
    }

    /// Replaces the selection.
    ///
    /// The draft and search term are kept, so an edit started in another
    /// category stays pending and will not match on submit.
    pub fn set_selected_category(&self, id: Option<CategoryId>) -> Self {
        Self {
            selected_category_id: id,
            ..self.clone()
        }
    }

    pub fn set_search_term(&self, term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..self.clone()
        }
    }

    pub fn set_theme(&self, dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..self.clone()
        }
    }

    pub fn set_draft_text(&self, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.draft.text = text.into();
        next
    }

    pub fn set_draft_date(&self, date: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.draft.date = date.into();
        next
    }

    fn position_of(&self, id: &CategoryId) -> Option<usize> {
        self.categories.iter().position(|category| &category.id == id)
    }

    fn rewrite_category(
        &self,
        category_id: &CategoryId,
        rewrite: impl FnOnce(&Category) -> Option<Category>,
    ) -> Self {
        let Some(index) = self.position_of(category_id) else {
            return self.clone();
        };
        match rewrite(self.categories[index].as_ref()) {
            Some(updated) => Self {
                categories: self.replace_at(index, updated),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    fn replace_at(&self, index: usize, category: Category) -> CategoryList {
        let mut replacement = Some(Arc::new(category));
        self.categories
            .iter()
            .enumerate()
            .map(|(position, existing)| {
                if position == index {
                    replacement.take().unwrap_or_else(|| Arc::clone(existing))
                } else {
                    Arc::clone(existing)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::model::category::{Category, CategoryId};
    use crate::model::todo::{Todo, TodoId};
    use std::sync::Arc;

    #[test]
    fn high_water_is_seeded_from_loaded_todos() {
        let mut work = Category::new(CategoryId::from("w"), "Work");
        work.todos.push(Todo::new(TodoId(1_700_000_000_000), "legacy", "2024-01-01"));
        let state = AppState::from_snapshot(vec![work], false);
        let id = CategoryId::from("w");

        let next = state.submit_todo(Some(&id), "new", "2024-01-02", None);
        let todos = &next.category(&id).unwrap().todos;
        assert_eq!(todos[1].id, TodoId(1_700_000_000_001));
    }

    #[test]
    fn exhausted_high_water_falls_back_to_free_id() {
        let mut work = Category::new(CategoryId::from("w"), "Work");
        work.todos.push(Todo::new(TodoId(i64::MAX), "last", "2024-01-01"));
        work.todos.push(Todo::new(TodoId(1), "first", "2024-01-01"));
        let state = AppState::from_snapshot(vec![work], false);
        let id = CategoryId::from("w");

        let next = state
            .submit_todo(Some(&id), "new", "2024-01-02", None)
            .submit_todo(Some(&id), "newer", "2024-01-03", None);
        let ids: Vec<_> = next.category(&id).unwrap().todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TodoId(i64::MAX), TodoId(1), TodoId(2), TodoId(3)]);

        let toggled = next.toggle_complete(&id, TodoId(i64::MAX));
        let todos = &toggled.category(&id).unwrap().todos;
        assert!(todos[0].completed);
        assert!(todos[2..].iter().all(|todo| !todo.completed));
    }

    #[test]
    fn rejected_operations_keep_category_allocation() {
        let state = AppState::default().create_category_with_id(CategoryId::from("w"), "Work");
        let id = CategoryId::from("w");

        assert!(state
            .submit_todo(Some(&id), "   ", "2024-01-01", None)
            .shares_categories_with(&state));
        assert!(state.delete_todo(&id, TodoId(5)).shares_categories_with(&state));
        assert!(state
            .toggle_complete(&CategoryId::from("missing"), TodoId(1))
            .shares_categories_with(&state));
        assert!(state.create_category("").shares_categories_with(&state));
    }

    #[test]
    fn untouched_categories_are_shared() {
        let state = AppState::default()
            .create_category_with_id(CategoryId::from("a"), "A")
            .create_category_with_id(CategoryId::from("b"), "B");
        let next = state.submit_todo(Some(&CategoryId::from("b")), "x", "2024-01-01", None);

        assert!(Arc::ptr_eq(&state.categories()[0], &next.categories()[0]));
        assert!(!Arc::ptr_eq(&state.categories()[1], &next.categories()[1]));
        assert!(state.categories()[1].todos.is_empty());
    }

    #[test]
    fn duplicate_explicit_id_is_ignored() {
        let state = AppState::default().create_category_with_id(CategoryId::from("a"), "A");
        let next = state.create_category_with_id(CategoryId::from("a"), "Again");
        assert_eq!(next.categories().len(), 1);
        assert_eq!(next.categories()[0].name, "A");
    }

    #[test]
    fn draft_setters_do_not_touch_categories() {
        let state = AppState::default()
            .set_draft_text("Report")
            .set_draft_date("2024-01-01");
        assert_eq!(state.draft().text, "Report");
        assert_eq!(state.draft().date, "2024-01-01");
        assert!(!state.draft().is_editing());
    }
}
