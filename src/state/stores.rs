use dioxus::prelude::*;

use crate::storage::{CallLogStore, DirectoryStore};

/// Persisted stores, read from local storage once at startup.
pub static DIRECTORY: GlobalSignal<DirectoryStore> = Signal::global(DirectoryStore::load);
pub static CALL_LOG: GlobalSignal<CallLogStore> = Signal::global(CallLogStore::load);
