//! Pending input state for the add/edit form.

use crate::model::todo::{Todo, TodoId};

/// Text and date being typed, plus the todo being edited, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub date: String,
    /// Set by `begin_edit`; a submit then updates instead of appending.
    pub editing_id: Option<TodoId>,
}

impl Draft {
    /// Draft pre-filled from an existing todo.
    pub fn editing(todo: &Todo) -> Self {
        Self {
            text: todo.text.clone(),
            date: todo.date.clone(),
            editing_id: Some(todo.id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.date.is_empty() && self.editing_id.is_none()
    }
}
