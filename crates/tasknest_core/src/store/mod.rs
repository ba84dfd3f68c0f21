//! Canonical in-memory application state and its transformations.
//!
//! # Responsibility
//! - Own the ordered category list plus transient selection/draft state.
//! - Expose intent-level operations as pure `&self -> Self` transformations.
//!
//! # Invariants
//! - Nothing reachable from a previous state is mutated by an operation.
//! - Categories untouched by an operation stay pointer-equal (`Arc::ptr_eq`).
//! - A rejected operation returns a state whose category list is the same
//!   allocation as the input's.

pub mod draft;
pub mod state;

pub use draft::Draft;
pub use state::{AppState, CategoryList};
