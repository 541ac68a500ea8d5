//! Boundary to the external signaling library.
//!
//! The SIP stack itself lives in a JavaScript shim (`assets/signaling.js`)
//! wrapping the JsSIP SDK. The shim forwards library events as window
//! CustomEvents; this module holds the extern surface and the typed event
//! variants the controller dispatches on.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = initSignalingClient)]
    pub fn init_signaling_client(
        endpoint: &str,
        uri: &str,
        secret: &str,
        display_name: &str,
        register_on_start: bool,
    ) -> bool;

    #[wasm_bindgen(js_name = dialSession)]
    pub fn dial_session(uri: &str) -> bool;

    #[wasm_bindgen(js_name = answerIncomingSession)]
    pub fn answer_incoming_session() -> bool;

    #[wasm_bindgen(js_name = rejectIncomingSession)]
    pub fn reject_incoming_session();

    #[wasm_bindgen(js_name = terminateActiveSession)]
    pub fn terminate_active_session();

    #[wasm_bindgen(js_name = isSignalingRegistered)]
    pub fn is_signaling_registered() -> bool;

    #[wasm_bindgen(js_name = stopSignalingClient)]
    pub fn stop_signaling_client();

    /// Peer connection of the session currently being established, or null.
    #[wasm_bindgen(js_name = activeSessionConnection)]
    pub fn active_session_connection() -> JsValue;
}

/// CustomEvent names on the shim side of the boundary.
pub const REGISTRATION_EVENT: &str = "sip:registration";
pub const INCOMING_EVENT: &str = "sip:incoming";
pub const SESSION_EVENT: &str = "sip:session";

/// Registration-level events emitted by the signaling client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalingEvent {
    Registered,
    RegistrationFailed,
    Disconnected,
    IncomingSession { caller: String, user: String },
}

impl SignalingEvent {
    /// Map the shim's registration state string onto an event variant.
    pub fn parse_registration(state: &str) -> Option<Self> {
        match state {
            "registered" => Some(SignalingEvent::Registered),
            "registration_failed" => Some(SignalingEvent::RegistrationFailed),
            "disconnected" => Some(SignalingEvent::Disconnected),
            _ => None,
        }
    }
}

/// Lifecycle events of the tracked call session. The shim only reports the
/// outbound or answered session; a rejected incoming session stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Accepted,
    Ended,
    Failed,
}

impl SessionEvent {
    pub fn parse(state: &str) -> Option<Self> {
        match state {
            "accepted" => Some(SessionEvent::Accepted),
            "ended" => Some(SessionEvent::Ended),
            "failed" => Some(SessionEvent::Failed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_states_parse() {
        assert_eq!(
            SignalingEvent::parse_registration("registered"),
            Some(SignalingEvent::Registered)
        );
        assert_eq!(
            SignalingEvent::parse_registration("registration_failed"),
            Some(SignalingEvent::RegistrationFailed)
        );
        assert_eq!(
            SignalingEvent::parse_registration("disconnected"),
            Some(SignalingEvent::Disconnected)
        );
        assert_eq!(SignalingEvent::parse_registration("connecting"), None);
    }

    #[test]
    fn session_states_parse() {
        assert_eq!(SessionEvent::parse("accepted"), Some(SessionEvent::Accepted));
        assert_eq!(SessionEvent::parse("ended"), Some(SessionEvent::Ended));
        assert_eq!(SessionEvent::parse("failed"), Some(SessionEvent::Failed));
        assert_eq!(SessionEvent::parse("progress"), None);
    }
}
