//! Browser SIP softphone widget.
//!
//! A floating phone panel that registers against a SIP server through the
//! JsSIP signaling SDK, dials extensions from a small editable directory and
//! keeps a call log, both persisted in browser local storage. Everything
//! below SIP signaling and media negotiation stays inside the SDK.

mod call;
mod components;
mod config;
mod models;
mod signaling;
mod state;
mod storage;

use dioxus::prelude::*;

use components::phone::{CallLogPanel, IncomingCallPrompt, PhonePanel};

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // The signaling client lives as long as the app. Its events arrive as
    // window CustomEvents wired up in bootstrap; teardown failures are
    // suppressed.
    use_effect(|| call::bootstrap());
    use_drop(call::shutdown);

    rsx! {
        style { {include_str!("../assets/styles.css")} }
        document::Script { src: "https://unpkg.com/jssip@3.10.1/dist/jssip.min.js" }
        document::Script { {include_str!("../assets/signaling.js")} }

        PhonePanel {}
        IncomingCallPrompt {}
        CallLogPanel {}

        audio { id: "remote-audio", autoplay: true }
        audio {
            id: "ringtone",
            src: "/assets/ringtone.mp3",
            r#loop: true,
            preload: "auto",
        }
    }
}
