//! Domain model for categorized todo lists.
//!
//! # Responsibility
//! - Define the persisted shapes (`Category`, `Todo`) and their identifiers.
//! - Keep the JSON wire layout identical to what the snapshot store holds.
//!
//! # Invariants
//! - Category ids are unique within one category list.
//! - Todo ids are unique within their owning category.

pub mod category;
pub mod todo;
