use serde::{Deserialize, Serialize};

/// One completed call. Immutable once recorded; the list is most recent
/// first and never trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogEntry {
    pub from: String,
    pub to: String,
    /// `MM:SS`, captured from the display timer rather than recomputed at
    /// end time.
    pub duration: String,
    pub timestamp: String,
}
