//! Toggleable call history panel, most recent call first.

use dioxus::prelude::*;

use crate::state::{CALL_LOG, UI_STATE};

#[component]
pub fn CallLogPanel() -> Element {
    if !UI_STATE.read().show_logs {
        return rsx! {};
    }
    let log = CALL_LOG.read();

    rsx! {
        div { class: "log-panel",
            h4 { "\u{1f4cb} Call Logs" }
            if log.is_empty() {
                p { "No calls yet." }
            }
            for (index, entry) in log.entries().iter().enumerate() {
                div { key: "{index}", class: "log-entry",
                    div {
                        b { "{entry.from}" }
                        " \u{27a1}\u{fe0f} "
                        b { "{entry.to}" }
                    }
                    div { "\u{23f1} {entry.duration}" }
                    div { "\u{1f552} {entry.timestamp}" }
                }
            }
        }
    }
}
