//! Category model: a named, ordered list of todos.
//!
//! # Invariants
//! - `todos` keeps insertion order; new items are appended.
//! - Helpers return new values and never mutate `self`.

use crate::model::todo::{Todo, TodoId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque category identifier.
///
/// New ids are random UUIDs; older snapshots may carry other strings, which
/// are accepted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named grouping of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl Category {
    /// Creates an empty category.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Looks up one todo by id.
    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Returns the largest todo id in this category, if any.
    pub fn max_todo_id(&self) -> Option<TodoId> {
        self.todos.iter().map(|todo| todo.id).max()
    }

    /// Smallest positive id not used by any todo in this category.
    pub fn lowest_free_todo_id(&self) -> Option<TodoId> {
        let used: BTreeSet<TodoId> = self.todos.iter().map(|todo| todo.id).collect();
        (1..=i64::MAX).map(TodoId).find(|id| !used.contains(id))
    }

    /// Returns a copy with `todo` appended.
    pub fn with_appended(&self, todo: Todo) -> Self {
        let mut todos = Vec::with_capacity(self.todos.len() + 1);
        todos.extend(self.todos.iter().cloned());
        todos.push(todo);
        self.with_todos(todos)
    }

    /// Returns a copy where the todo matching `id` is replaced by `update(todo)`.
    ///
    /// Returns `None` when no todo matches.
    pub fn with_updated(&self, id: TodoId, update: impl FnOnce(&Todo) -> Todo) -> Option<Self> {
        let position = self.todos.iter().position(|todo| todo.id == id)?;
        let mut todos = self.todos.clone();
        todos[position] = update(&self.todos[position]);
        Some(self.with_todos(todos))
    }

    /// Returns a copy without the todo matching `id`.
    ///
    /// Returns `None` when no todo matches.
    pub fn without(&self, id: TodoId) -> Option<Self> {
        if self.todo(id).is_none() {
            return None;
        }
        let todos = self
            .todos
            .iter()
            .filter(|todo| todo.id != id)
            .cloned()
            .collect();
        Some(self.with_todos(todos))
    }

    fn with_todos(&self, todos: Vec<Todo>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            todos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryId};
    use crate::model::todo::{Todo, TodoId};

    fn sample() -> Category {
        Category::new(CategoryId::from("c1"), "Work")
            .with_appended(Todo::new(TodoId(1), "a", "2024-01-01"))
            .with_appended(Todo::new(TodoId(2), "b", "2024-01-02"))
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(CategoryId::generate(), CategoryId::generate());
    }

    #[test]
    fn with_appended_keeps_order() {
        let category = sample();
        let ids: Vec<_> = category.todos.iter().map(|todo| todo.id).collect();
        assert_eq!(ids, vec![TodoId(1), TodoId(2)]);
        assert_eq!(category.max_todo_id(), Some(TodoId(2)));
    }

    #[test]
    fn lowest_free_todo_id_fills_first_gap() {
        let category = sample().with_appended(Todo::new(TodoId(4), "d", "2024-01-04"));
        assert_eq!(category.lowest_free_todo_id(), Some(TodoId(3)));
        let empty = Category::new(CategoryId::from("e"), "Empty");
        assert_eq!(empty.lowest_free_todo_id(), Some(TodoId(1)));
    }

    #[test]
    fn without_missing_id_returns_none() {
        assert!(sample().without(TodoId(99)).is_none());
    }

    #[test]
    fn with_updated_touches_only_matching_todo() {
        let category = sample();
        let updated = category
            .with_updated(TodoId(2), Todo::toggled)
            .expect("todo 2 exists");
        assert!(!updated.todos[0].completed);
        assert!(updated.todos[1].completed);
        assert!(!category.todos[1].completed);
    }
}
