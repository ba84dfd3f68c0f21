//! Session services.
//!
//! # Responsibility
//! - Route user intents into state transformations.
//! - Observe state changes and mirror them to storage and the theme sink.

pub mod session;
