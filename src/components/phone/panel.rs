//! Floating status/control panel.

use dioxus::prelude::*;

use crate::call;
use crate::models::Extension;
use crate::state::{toggle_edit_mode, toggle_logs, CallPhase, DIRECTORY, PHONE_STATE, UI_STATE};

#[component]
pub fn PhonePanel() -> Element {
    let mut new_ext = use_signal(String::new);
    let mut new_label = use_signal(String::new);

    let phone = PHONE_STATE.read();
    let status = phone.status_label();
    let in_call = phone.phase == CallPhase::Connected;
    let duration = phone.call_duration.clone();
    let target = phone.dial_target.clone();
    let edit_mode = UI_STATE.read().edit_mode;
    let extensions = DIRECTORY.read().entries().to_vec();

    let dial = move |_| {
        if let Err(e) = call::dial() {
            alert(&e.to_string());
        }
    };

    let add_extension = move |_| {
        if DIRECTORY.write().add(&new_ext(), &new_label()) {
            new_ext.set(String::new());
            new_label.set(String::new());
        }
    };

    rsx! {
        div { class: "phone-panel",
            span { class: "phone-status", "{status}" }

            button {
                class: "phone-edit-toggle",
                onclick: move |_| toggle_edit_mode(),
                if edit_mode { "\u{2705}" } else { "\u{270f}\u{fe0f}" }
            }

            if !edit_mode {
                select {
                    class: "phone-select",
                    value: "{target}",
                    onchange: move |e| PHONE_STATE.write().dial_target = e.value(),
                    option { value: "", "Select Extension" }
                    for ext in extensions.iter() {
                        option {
                            key: "{ext.number}",
                            value: "{ext.number}",
                            "{ext.number} - {ext.label}"
                        }
                    }
                }
            } else {
                div { class: "phone-editor",
                    for (index, ext) in extensions.iter().enumerate() {
                        EditRow { key: "{ext.number}", index: index, extension: ext.clone() }
                    }
                    div { class: "phone-add-row",
                        input {
                            class: "phone-add-ext",
                            placeholder: "Ext",
                            value: "{new_ext}",
                            oninput: move |e| new_ext.set(e.value()),
                        }
                        input {
                            class: "phone-add-label",
                            placeholder: "Label",
                            value: "{new_label}",
                            oninput: move |e| new_label.set(e.value()),
                        }
                        button {
                            class: "phone-add",
                            onclick: add_extension,
                            "\u{2795} Add"
                        }
                    }
                }
            }

            if in_call {
                div { class: "phone-duration", "\u{23f1} {duration}" }
            }

            button {
                class: "phone-call",
                title: "Call",
                onclick: dial,
                "\u{1f4de}"
            }
            button {
                class: "phone-hangup",
                title: "Hangup",
                onclick: move |_| call::hangup(),
                "\u{260e}"
            }
            button {
                class: "phone-log-toggle",
                onclick: move |_| toggle_logs(),
                "\u{1f4dc} Call Log"
            }
        }
    }
}

#[component]
fn EditRow(index: usize, extension: Extension) -> Element {
    let number = extension.number.clone();

    rsx! {
        div { class: "phone-edit-row",
            b { "{extension.number}" }
            input {
                value: "{extension.label}",
                oninput: move |e| DIRECTORY.write().edit_label(index, &e.value()),
            }
            button {
                class: "phone-delete",
                onclick: move |_| {
                    // a deleted entry must not linger as the dial target
                    if DIRECTORY.write().delete(&number) {
                        PHONE_STATE.write().clear_target_if(&number);
                    }
                },
                "\u{1f5d1}\u{fe0f}"
            }
        }
    }
}

fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
