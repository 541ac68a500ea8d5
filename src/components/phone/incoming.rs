//! Incoming-call prompt, visible only while a call is ringing.

use dioxus::prelude::*;

use crate::call;
use crate::state::{CallPhase, PHONE_STATE};

#[component]
pub fn IncomingCallPrompt() -> Element {
    let phone = PHONE_STATE.read();
    if phone.phase != CallPhase::Ringing {
        return rsx! {};
    }
    let caller = phone.caller.clone().unwrap_or_default();

    rsx! {
        div { class: "incoming-prompt",
            p {
                "\u{1f4de} Incoming call from: "
                strong { "{caller}" }
            }
            div { class: "incoming-actions",
                button {
                    class: "incoming-answer",
                    onclick: move |_| call::answer(),
                    "\u{2705} Answer"
                }
                button {
                    class: "incoming-reject",
                    onclick: move |_| call::reject(),
                    "\u{274c} Reject"
                }
            }
        }
    }
}
