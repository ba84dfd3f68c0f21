//! Todo item model.
//!
//! # Invariants
//! - `id` is stable for the whole lifetime of the item.
//! - Edits replace `text` and `date` only; `completed` changes through toggle.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Integer identifier of a todo, unique within its category.
///
/// Serialized as a bare JSON number so legacy time-derived ids load as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Returns the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Single task entry inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    /// Free text shown in the list and matched by search.
    pub text: String,
    pub completed: bool,
    /// Date-only string as entered by the user (for example `2024-01-01`).
    /// Not validated for calendar correctness.
    pub date: String,
}

impl Todo {
    /// Creates an open (not completed) todo.
    pub fn new(id: TodoId, text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            date: date.into(),
        }
    }

    /// Returns a copy with replaced text and date, keeping id and completion.
    pub fn with_content(&self, text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: self.id,
            text: text.into(),
            completed: self.completed,
            date: date.into(),
        }
    }

    /// Returns a copy with the completion flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Case-insensitive substring match against `text`.
    ///
    /// `needle_lower` must already be lowercased; an empty needle matches.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.text.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::{Todo, TodoId};

    #[test]
    fn new_todo_starts_open() {
        let todo = Todo::new(TodoId(7), "Report", "2024-01-01");
        assert_eq!(todo.id, TodoId(7));
        assert!(!todo.completed);
    }

    #[test]
    fn with_content_keeps_id_and_completion() {
        let done = Todo::new(TodoId(1), "Report", "2024-01-01").toggled();
        let edited = done.with_content("Final Report", "2024-02-01");
        assert_eq!(edited.id, TodoId(1));
        assert!(edited.completed);
        assert_eq!(edited.text, "Final Report");
        assert_eq!(edited.date, "2024-02-01");
    }

    #[test]
    fn matches_lowercase_ignores_case_of_text() {
        let todo = Todo::new(TodoId(1), "Buy MILK", "2024-01-01");
        assert!(todo.matches_lowercase("milk"));
        assert!(todo.matches_lowercase(""));
        assert!(!todo.matches_lowercase("bread"));
    }
}
