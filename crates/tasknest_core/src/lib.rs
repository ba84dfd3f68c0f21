//! Core state and persistence model for TaskNest.
//! This crate is the single source of truth for category/todo invariants.

pub mod config;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use host::{
    AmbientPreference, FixedPreference, NamePrompt, NoopThemeSink, RecordingThemeSink,
    ScriptedPrompt, ThemeSink,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::todo::{Todo, TodoId};
pub use persist::{
    load_snapshot, save_categories, save_theme, try_load_snapshot, PersistError, PersistResult,
    Snapshot, ThemeOrigin, CATEGORIES_KEY, DARK_MODE_KEY,
};
pub use service::session::{Session, StorageNotice, NEW_CATEGORY_PROMPT};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StoreError, StoreResult};
pub use store::{AppState, CategoryList, Draft};
pub use view::{current_category, visible_todos};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
