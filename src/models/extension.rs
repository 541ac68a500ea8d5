use serde::{Deserialize, Serialize};

/// A dialable entry in the extension directory, keyed by `number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub number: String,
    pub label: String,
    pub status: PresenceStatus,
}

/// Presence is set when the entry is created and never updated afterwards;
/// there is no server-driven presence feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

/// Seed directory used when nothing has been persisted yet.
pub fn default_extensions() -> Vec<Extension> {
    vec![
        Extension {
            number: "9008".to_string(),
            label: "SIP Phone".to_string(),
            status: PresenceStatus::Online,
        },
        Extension {
            number: "93017".to_string(),
            label: "Zenitel".to_string(),
            status: PresenceStatus::Offline,
        },
        Extension {
            number: "9002".to_string(),
            label: "Operator".to_string(),
            status: PresenceStatus::Online,
        },
        Extension {
            number: "9003".to_string(),
            label: "Security".to_string(),
            status: PresenceStatus::Offline,
        },
    ]
}
