use super::{persist_list, ActiveStorage, StorageBackend};
use crate::models::CallLogEntry;

const CALL_LOG_KEY: &str = "webrtc_call_logs";

/// Persisted call history, most recent first. Entries are never edited or
/// evicted.
pub struct CallLogStore {
    entries: Vec<CallLogEntry>,
    backend: ActiveStorage,
}

impl CallLogStore {
    pub fn load() -> Self {
        Self::from_backend(ActiveStorage::default())
    }

    fn from_backend(backend: ActiveStorage) -> Self {
        let entries = match backend.read(CALL_LOG_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable call log: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        Self { entries, backend }
    }

    pub fn entries(&self) -> &[CallLogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend a completed call and rewrite the whole list.
    pub fn append(&mut self, entry: CallLogEntry) {
        self.entries.insert(0, entry);
        persist_list(&self.backend, CALL_LOG_KEY, &self.entries);
    }
}
