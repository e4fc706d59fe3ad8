//! Flat key/value session persistence.
//!
//! The surrounding application owns persistence; the core only defines
//! the layout: two text blobs, the selected section, the editing mode and
//! the filename, stored as flat string pairs (the browser-storage shape).

use std::collections::HashMap;

use crate::sync::EditorMode;

/// Keys in the flat session store.
pub mod keys {
    pub const CURRENT_TEXT: &str = "CLUSTERFILE_LAST_YAML";
    pub const BASELINE_TEXT: &str = "CLUSTERFILE_BASELINE_YAML";
    pub const MODE: &str = "CLUSTERFILE_MODE";
    pub const SECTION: &str = "CLUSTERFILE_CURRENT_SECTION";
    pub const FILENAME: &str = "CLUSTERFILE_FILENAME";
}

pub const DEFAULT_FILENAME: &str = "untitled.clusterfile";
pub const DEFAULT_SECTION: &str = "account";

/// Flat string key/value store the host provides.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Everything the surrounding application persists between sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub current_text: String,
    pub baseline_text: String,
    pub mode: EditorMode,
    pub section: String,
    pub filename: String,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        SessionSnapshot {
            current_text: String::new(),
            baseline_text: String::new(),
            mode: EditorMode::Guided,
            section: DEFAULT_SECTION.to_owned(),
            filename: DEFAULT_FILENAME.to_owned(),
        }
    }
}

/// Write the snapshot into the store.
pub fn save_session(store: &mut dyn SessionStore, snapshot: &SessionSnapshot) {
    store.set(keys::CURRENT_TEXT, &snapshot.current_text);
    store.set(keys::BASELINE_TEXT, &snapshot.baseline_text);
    store.set(keys::MODE, snapshot.mode.as_str());
    store.set(keys::SECTION, &snapshot.section);
    store.set(keys::FILENAME, &snapshot.filename);
}

/// Read a snapshot, filling defaults for anything missing or unreadable.
/// Never errors: a half-written store yields a usable session.
pub fn load_session(store: &dyn SessionStore) -> SessionSnapshot {
    let defaults = SessionSnapshot::default();
    SessionSnapshot {
        current_text: store.get(keys::CURRENT_TEXT).unwrap_or(defaults.current_text),
        baseline_text: store
            .get(keys::BASELINE_TEXT)
            .unwrap_or(defaults.baseline_text),
        mode: store
            .get(keys::MODE)
            .and_then(|m| EditorMode::from_str(&m))
            .unwrap_or(defaults.mode),
        section: store.get(keys::SECTION).unwrap_or(defaults.section),
        filename: store.get(keys::FILENAME).unwrap_or(defaults.filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut store = MemorySessionStore::new();
        let snapshot = SessionSnapshot {
            current_text: "name: bar\n".into(),
            baseline_text: "name: foo\n".into(),
            mode: EditorMode::Advanced,
            section: "hosts".into(),
            filename: "prod.clusterfile".into(),
        };
        save_session(&mut store, &snapshot);
        assert_eq!(load_session(&store), snapshot);
    }

    #[test]
    fn test_empty_store_yields_defaults() {
        let store = MemorySessionStore::new();
        let snapshot = load_session(&store);
        assert_eq!(snapshot, SessionSnapshot::default());
        assert_eq!(snapshot.filename, DEFAULT_FILENAME);
        assert_eq!(snapshot.mode, EditorMode::Guided);
    }

    #[test]
    fn test_unreadable_mode_falls_back() {
        let mut store = MemorySessionStore::new();
        store.set(keys::MODE, "turbo");
        assert_eq!(load_session(&store).mode, EditorMode::Guided);
    }

    #[test]
    fn test_remove_clears_a_key() {
        let mut store = MemorySessionStore::new();
        store.set(keys::FILENAME, "a.clusterfile");
        store.remove(keys::FILENAME);
        assert_eq!(load_session(&store).filename, DEFAULT_FILENAME);
    }
}
