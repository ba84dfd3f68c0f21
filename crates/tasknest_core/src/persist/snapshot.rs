//! Load/save of the persisted application snapshot.

use super::{PersistError, PersistResult, CATEGORIES_KEY, DARK_MODE_KEY};
use crate::host::AmbientPreference;
use crate::model::category::Category;
use crate::storage::KeyValueStore;
use log::{debug, warn};
use std::sync::Arc;

/// Where the startup theme value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeOrigin {
    /// Read from the `darkMode` entry.
    Stored,
    /// No usable stored entry; taken from the ambient preference.
    Ambient,
}

/// Persisted values read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub dark_mode: bool,
    pub theme_origin: ThemeOrigin,
}

/// Encodes the category list into its JSON wire form.
pub fn encode_categories(categories: &[Arc<Category>]) -> PersistResult<String> {
    let borrowed: Vec<&Category> = categories.iter().map(Arc::as_ref).collect();
    serde_json::to_string(&borrowed).map_err(|source| PersistError::Encode {
        key: CATEGORIES_KEY,
        source,
    })
}

/// Decodes a JSON category array.
pub fn decode_categories(raw: &str) -> PersistResult<Vec<Category>> {
    serde_json::from_str(raw).map_err(|source| PersistError::Decode {
        key: CATEGORIES_KEY,
        source,
    })
}

fn decode_theme(raw: &str) -> PersistResult<bool> {
    serde_json::from_str(raw).map_err(|source| PersistError::Decode {
        key: DARK_MODE_KEY,
        source,
    })
}

/// Reads the snapshot, failing on the first unreadable or corrupt entry.
///
/// Missing entries are not errors: no categories means an empty list, no
/// theme means the ambient preference.
pub fn try_load_snapshot<S, A>(store: &S, ambient: &A) -> PersistResult<Snapshot>
where
    S: KeyValueStore + ?Sized,
    A: AmbientPreference + ?Sized,
{
    let categories = match store
        .get(CATEGORIES_KEY)
        .map_err(PersistError::store(CATEGORIES_KEY))?
    {
        Some(raw) => decode_categories(&raw)?,
        None => Vec::new(),
    };
    let (dark_mode, theme_origin) = match store
        .get(DARK_MODE_KEY)
        .map_err(PersistError::store(DARK_MODE_KEY))?
    {
        Some(raw) => (decode_theme(&raw)?, ThemeOrigin::Stored),
        None => (ambient.prefers_dark(), ThemeOrigin::Ambient),
    };

    Ok(Snapshot {
        categories,
        dark_mode,
        theme_origin,
    })
}

/// Reads the snapshot, replacing any unreadable entry by its fallback.
///
/// # Side effects
/// - Logs `snapshot_load` with `status=fallback` for each entry that could not
///   be used, and a final summary event.
pub fn load_snapshot<S, A>(store: &S, ambient: &A) -> Snapshot
where
    S: KeyValueStore + ?Sized,
    A: AmbientPreference + ?Sized,
{
    let categories = match store
        .get(CATEGORIES_KEY)
        .map_err(PersistError::store(CATEGORIES_KEY))
        .and_then(|raw| raw.map(|raw| decode_categories(&raw)).transpose())
    {
        Ok(categories) => categories.unwrap_or_default(),
        Err(err) => {
            warn!(
                "event=snapshot_load module=persist status=fallback key={} error={}",
                CATEGORIES_KEY, err
            );
            Vec::new()
        }
    };

    let stored_theme = match store
        .get(DARK_MODE_KEY)
        .map_err(PersistError::store(DARK_MODE_KEY))
        .and_then(|raw| raw.map(|raw| decode_theme(&raw)).transpose())
    {
        Ok(theme) => theme,
        Err(err) => {
            warn!(
                "event=snapshot_load module=persist status=fallback key={} error={}",
                DARK_MODE_KEY, err
            );
            None
        }
    };
    let (dark_mode, theme_origin) = match stored_theme {
        Some(dark_mode) => (dark_mode, ThemeOrigin::Stored),
        None => (ambient.prefers_dark(), ThemeOrigin::Ambient),
    };

    debug!(
        "event=snapshot_load module=persist status=ok categories={} todos={} theme_origin={:?}",
        categories.len(),
        categories
            .iter()
            .map(|category| category.todos.len())
            .sum::<usize>(),
        theme_origin
    );

    Snapshot {
        categories,
        dark_mode,
        theme_origin,
    }
}

/// Serializes and writes the full category list.
pub fn save_categories<S>(store: &mut S, categories: &[Arc<Category>]) -> PersistResult<()>
where
    S: KeyValueStore + ?Sized,
{
    let encoded = encode_categories(categories)?;
    store
        .set(CATEGORIES_KEY, &encoded)
        .map_err(PersistError::store(CATEGORIES_KEY))?;
    debug!(
        "event=snapshot_save module=persist status=ok key={} categories={} bytes={}",
        CATEGORIES_KEY,
        categories.len(),
        encoded.len()
    );
    Ok(())
}

/// Serializes and writes the theme flag.
pub fn save_theme<S>(store: &mut S, dark_mode: bool) -> PersistResult<()>
where
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(&dark_mode).map_err(|source| PersistError::Encode {
        key: DARK_MODE_KEY,
        source,
    })?;
    store
        .set(DARK_MODE_KEY, &encoded)
        .map_err(PersistError::store(DARK_MODE_KEY))?;
    debug!(
        "event=snapshot_save module=persist status=ok key={} dark_mode={}",
        DARK_MODE_KEY, dark_mode
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        decode_categories, encode_categories, save_theme, try_load_snapshot, ThemeOrigin,
    };
    use crate::host::FixedPreference;
    use crate::persist::DARK_MODE_KEY;
    use crate::storage::MemoryStore;
    use crate::model::category::{Category, CategoryId};
    use crate::model::todo::{Todo, TodoId};
    use crate::persist::PersistError;
    use std::sync::Arc;

    #[test]
    fn encodes_expected_wire_fields() {
        let category = Category::new(CategoryId::from("1700000000000"), "Work")
            .with_appended(Todo::new(TodoId(1_700_000_000_001), "Report", "2024-01-01"));
        let encoded = encode_categories(&[Arc::new(category)]).unwrap();

        let json: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(json[0]["id"], "1700000000000");
        assert_eq!(json[0]["name"], "Work");
        assert_eq!(json[0]["todos"][0]["id"], 1_700_000_000_001_i64);
        assert_eq!(json[0]["todos"][0]["text"], "Report");
        assert_eq!(json[0]["todos"][0]["completed"], false);
        assert_eq!(json[0]["todos"][0]["date"], "2024-01-01");
    }

    #[test]
    fn theme_is_written_as_json_bool_and_read_back() {
        let mut store = MemoryStore::new();
        save_theme(&mut store, true).unwrap();
        let raw = store.raw(DARK_MODE_KEY).unwrap();
        assert!(serde_json::from_str::<bool>(raw).unwrap());

        let snapshot = try_load_snapshot(&store, &FixedPreference(false)).unwrap();
        assert!(snapshot.dark_mode);
        assert_eq!(snapshot.theme_origin, ThemeOrigin::Stored);
    }

    #[test]
    fn decode_reports_key_on_corrupt_input() {
        let err = decode_categories("{not json").unwrap_err();
        assert!(matches!(err, PersistError::Decode { key: "categories", .. }));
        assert_eq!(err.key(), "categories");
    }
}
