use dioxus::prelude::*;

/// Transient UI flags. Never persisted.
pub static UI_STATE: GlobalSignal<UiState> = Signal::global(UiState::default);

#[derive(Clone, Default)]
pub struct UiState {
    pub edit_mode: bool,
    pub show_logs: bool,
}

pub fn toggle_edit_mode() {
    let mut state = UI_STATE.write();
    state.edit_mode = !state.edit_mode;
}

pub fn toggle_logs() {
    let mut state = UI_STATE.write();
    state.show_logs = !state.show_logs;
}
