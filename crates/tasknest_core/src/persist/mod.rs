//! Snapshot persistence over a key-value store.
//!
//! # Responsibility
//! - Encode/decode the category list and theme flag as JSON.
//! - Apply the load fallbacks (empty list, ambient theme).
//!
//! # Invariants
//! - `categories` and `darkMode` are written independently under fixed keys.
//! - Lenient loading never fails; corrupt entries fall back and are logged.

use crate::storage::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod snapshot;

pub use snapshot::{
    decode_categories, encode_categories, load_snapshot, save_categories, save_theme,
    try_load_snapshot, Snapshot, ThemeOrigin,
};

/// Storage key holding the JSON array of categories.
pub const CATEGORIES_KEY: &str = "categories";
/// Storage key holding the JSON boolean theme flag.
pub const DARK_MODE_KEY: &str = "darkMode";

pub type PersistResult<T> = Result<T, PersistError>;

/// Snapshot read/write failure.
#[derive(Debug)]
pub enum PersistError {
    Store {
        key: &'static str,
        source: StoreError,
    },
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl PersistError {
    /// Storage key the failure relates to.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Store { key, .. } | Self::Decode { key, .. } | Self::Encode { key, .. } => *key,
        }
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store { key, source } => write!(f, "storage failed for `{key}`: {source}"),
            Self::Decode { key, source } => {
                write!(f, "stored value for `{key}` cannot be decoded: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "value for `{key}` cannot be encoded: {source}")
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store { source, .. } => Some(source),
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

impl PersistError {
    pub(crate) fn store(key: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { key, source }
    }
}
