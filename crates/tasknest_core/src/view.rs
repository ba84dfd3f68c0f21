//! Read-only views computed from [`AppState`].
//!
//! Nothing here is cached; every call recomputes from the state it is given.

use crate::model::category::Category;
use crate::model::todo::Todo;
use crate::store::AppState;

/// First category whose id equals the selection.
///
/// Returns `None` when nothing is selected or the selection is dangling.
pub fn current_category(state: &AppState) -> Option<&Category> {
    let selected = state.selected_category_id()?;
    state.category(selected)
}

/// Todos of the current category whose text contains the search term,
/// ignoring case, in list order.
///
/// An empty search term matches every todo.
pub fn visible_todos(state: &AppState) -> Vec<&Todo> {
    let Some(category) = current_category(state) else {
        return Vec::new();
    };
    let needle = state.search_term().to_lowercase();
    category
        .todos
        .iter()
        .filter(|todo| todo.matches_lowercase(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{current_category, visible_todos};
    use crate::model::category::CategoryId;
    use crate::store::AppState;

    #[test]
    fn dangling_selection_has_no_current_category() {
        let state = AppState::default()
            .create_category_with_id(CategoryId::from("a"), "A")
            .set_selected_category(Some(CategoryId::from("gone")));
        assert!(current_category(&state).is_none());
        assert!(visible_todos(&state).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_both_ways() {
        let id = CategoryId::from("a");
        let state = AppState::default()
            .create_category_with_id(id.clone(), "A")
            .submit_todo(Some(&id), "Write REPORT", "2024-01-01", None)
            .submit_todo(Some(&id), "call bob", "2024-01-02", None)
            .set_search_term("rePort");

        let texts: Vec<_> = visible_todos(&state)
            .into_iter()
            .map(|todo| todo.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Write REPORT"]);
    }
}
