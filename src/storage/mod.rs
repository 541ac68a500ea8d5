//! Local-storage-backed stores for the extension directory and call log.
//!
//! All mutations go through the store types so the mutate-then-persist
//! invariant lives in one place instead of being scattered through the UI.

mod call_log;
mod directory;

pub use call_log::CallLogStore;
pub use directory::DirectoryStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("browser storage unavailable")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Whole-value string storage, the shape browser local storage exposes.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl StorageBackend for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// In-memory stand-in used off the browser and by the unit tests.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct MemoryStorage {
    values: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub type ActiveStorage = BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type ActiveStorage = MemoryStorage;

/// Rewrite the full list under `key`. Persistence failures are logged and
/// otherwise ignored; the in-memory list stays authoritative for the session.
pub(crate) fn persist_list<T: serde::Serialize>(backend: &ActiveStorage, key: &str, list: &[T]) {
    match serde_json::to_string(list) {
        Ok(raw) => {
            if let Err(e) = backend.write(key, &raw) {
                tracing::warn!("failed to persist {}: {}", key, e);
            }
        }
        Err(e) => tracing::warn!("failed to serialize {}: {}", key, e),
    }
}
