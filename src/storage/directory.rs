use super::{persist_list, ActiveStorage, StorageBackend};
use crate::models::{default_extensions, Extension, PresenceStatus};

const DIRECTORY_KEY: &str = "webrtc_extensions";

/// Persisted list of dialable extensions.
pub struct DirectoryStore {
    entries: Vec<Extension>,
    backend: ActiveStorage,
}

impl DirectoryStore {
    /// Read the persisted directory once, falling back to the seed list when
    /// nothing usable is stored.
    pub fn load() -> Self {
        Self::from_backend(ActiveStorage::default())
    }

    fn from_backend(backend: ActiveStorage) -> Self {
        let entries = match backend.read(DIRECTORY_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable extension directory: {}", e);
                default_extensions()
            }),
            None => default_extensions(),
        };
        Self { entries, backend }
    }

    pub fn entries(&self) -> &[Extension] {
        &self.entries
    }

    /// Append a new extension. Returns false (and stores nothing) when
    /// either field is empty.
    pub fn add(&mut self, number: &str, label: &str) -> bool {
        if number.is_empty() || label.is_empty() {
            return false;
        }
        self.entries.push(Extension {
            number: number.to_string(),
            label: label.to_string(),
            status: PresenceStatus::Offline,
        });
        self.persist();
        true
    }

    /// Rename the entry at `index` in place.
    pub fn edit_label(&mut self, index: usize, label: &str) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.label = label.to_string();
            self.persist();
        }
    }

    /// Remove every entry with the given number. Returns whether anything
    /// was removed so the caller can drop a now-dangling dial selection.
    pub fn delete(&mut self, number: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.number != number);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        persist_list(&self.backend, DIRECTORY_KEY, &self.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted(store: &DirectoryStore) -> Vec<Extension> {
        let raw = store.backend.read(DIRECTORY_KEY).expect("nothing persisted");
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn load_without_stored_data_yields_defaults() {
        let store = DirectoryStore::load();
        assert_eq!(store.entries(), default_extensions());
    }

    #[test]
    fn load_discards_corrupt_data() {
        let backend = ActiveStorage::default();
        backend.write(DIRECTORY_KEY, "not json").unwrap();
        let store = DirectoryStore::from_backend(backend);
        assert_eq!(store.entries(), default_extensions());
    }

    #[test]
    fn load_picks_up_previously_persisted_entries() {
        let mut store = DirectoryStore::load();
        store.add("9010", "Lobby");
        let reloaded = DirectoryStore::from_backend(store.backend);
        assert_eq!(reloaded.entries().len(), 5);
        assert_eq!(reloaded.entries()[4].number, "9010");
    }

    #[test]
    fn mutation_sequence_round_trips_through_storage() {
        let mut store = DirectoryStore::load();
        store.add("9010", "Lobby");
        store.edit_label(0, "Desk Phone");
        store.delete("9003");
        assert_eq!(persisted(&store), store.entries().to_vec());
    }

    #[test]
    fn add_ignores_empty_fields() {
        let mut store = DirectoryStore::load();
        assert!(!store.add("", "Lobby"));
        assert!(!store.add("9010", ""));
        assert_eq!(store.entries(), default_extensions());
        assert!(store.backend.read(DIRECTORY_KEY).is_none());
    }

    #[test]
    fn add_then_delete_restores_defaults() {
        let mut store = DirectoryStore::load();
        assert!(store.add("9010", "Lobby"));
        assert!(store.delete("9010"));
        assert_eq!(store.entries(), default_extensions());
        assert_eq!(persisted(&store), default_extensions());
    }

    #[test]
    fn added_entries_start_offline() {
        let mut store = DirectoryStore::load();
        store.add("9010", "Lobby");
        let added = store.entries().last().unwrap();
        assert_eq!(added.status, PresenceStatus::Offline);
    }

    #[test]
    fn edit_label_mutates_by_position() {
        let mut store = DirectoryStore::load();
        store.edit_label(1, "Door Intercom");
        assert_eq!(store.entries()[1].label, "Door Intercom");
        assert_eq!(store.entries()[1].number, "93017");
        assert_eq!(persisted(&store), store.entries().to_vec());
    }

    #[test]
    fn delete_unknown_number_is_a_no_op() {
        let mut store = DirectoryStore::load();
        assert!(!store.delete("0000"));
        assert_eq!(store.entries(), default_extensions());
    }
}
