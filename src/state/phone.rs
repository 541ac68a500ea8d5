use dioxus::prelude::*;
use thiserror::Error;

/// Global call/registration view state.
pub static PHONE_STATE: GlobalSignal<PhoneState> = Signal::global(PhoneState::default);

/// Single call slot. At most one tracked session (outbound or answered) and
/// one pending incoming session exist at any time; answering clears the
/// pending reference while the active one becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallPhase {
    #[default]
    Idle,
    Dialing,
    Ringing,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationStatus {
    #[default]
    Offline,
    Online,
}

/// Clock-free summary of a finished call; the wasm layer stamps it into a
/// `CallLogEntry`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedCall {
    pub from: String,
    pub to: String,
    pub duration: String,
}

/// Dial intents rejected before any session is created. The messages are
/// shown verbatim in a blocking alert.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialError {
    #[error("\u{274c} SIP not connected.")]
    NotRegistered,
    #[error("Select an extension!")]
    NoTarget,
}

#[derive(Clone)]
pub struct PhoneState {
    pub registration: RegistrationStatus,
    pub phase: CallPhase,
    /// Extension currently picked in the dial dropdown.
    pub dial_target: String,
    /// Remote identity shown while ringing or in call.
    pub caller: Option<String>,
    /// `(from, to)` recorded into the call log when the session closes.
    route: Option<(String, String)>,
    /// Last rendered `MM:SS`. This exact string is what ends up in the log.
    pub call_duration: String,
    /// Bumped on every transition in or out of Connected; a ticking loop
    /// holding a stale epoch stops itself on its next tick.
    timer_epoch: u64,
}

impl Default for PhoneState {
    fn default() -> Self {
        Self {
            registration: RegistrationStatus::Offline,
            phase: CallPhase::Idle,
            dial_target: String::new(),
            caller: None,
            route: None,
            call_duration: "00:00".to_string(),
            timer_epoch: 0,
        }
    }
}

impl PhoneState {
    /// Status pill text. Derived on every render so no event handler can
    /// leave a stale label behind.
    pub fn status_label(&self) -> String {
        match self.phase {
            CallPhase::Connected => "\u{1f4de} In Call".to_string(),
            CallPhase::Dialing => {
                let target = self.route.as_ref().map(|(_, to)| to.as_str()).unwrap_or("");
                format!("\u{1f4f2} Dialing {}...", target)
            }
            _ => match self.registration {
                RegistrationStatus::Online => "\u{1f7e2} Online".to_string(),
                RegistrationStatus::Offline => "\u{1f534} Offline".to_string(),
            },
        }
    }

    pub fn set_registration(&mut self, registration: RegistrationStatus) {
        self.registration = registration;
    }

    /// Validate and enter Dialing. `registered` is the live answer from the
    /// signaling client, not the last event we saw. Returns the target to
    /// dial; on error nothing changes.
    pub fn begin_dial(&mut self, registered: bool) -> Result<String, DialError> {
        if !registered {
            return Err(DialError::NotRegistered);
        }
        if self.dial_target.is_empty() {
            return Err(DialError::NoTarget);
        }
        let target = self.dial_target.clone();
        self.phase = CallPhase::Dialing;
        self.route = Some(("Me".to_string(), target.clone()));
        Ok(target)
    }

    /// Enter Ringing for a remote invite. The slot holds one call; invites
    /// arriving while busy are not surfaced.
    pub fn incoming_invite(&mut self, caller: String, user: String) -> bool {
        if self.phase != CallPhase::Idle {
            return false;
        }
        self.phase = CallPhase::Ringing;
        self.caller = Some(caller);
        self.route = Some((user, "Me".to_string()));
        true
    }

    /// Session accepted: enter Connected and hand out a fresh timer epoch
    /// for the one display loop allowed to run.
    pub fn session_accepted(&mut self) -> Option<u64> {
        if !matches!(self.phase, CallPhase::Dialing | CallPhase::Ringing) {
            return None;
        }
        self.phase = CallPhase::Connected;
        self.call_duration = "00:00".to_string();
        self.timer_epoch += 1;
        Some(self.timer_epoch)
    }

    /// 1 Hz display update. Returns false when the caller's loop should
    /// stop (stale epoch or no longer connected).
    pub fn tick(&mut self, epoch: u64, elapsed_secs: u64) -> bool {
        if epoch != self.timer_epoch || self.phase != CallPhase::Connected {
            return false;
        }
        self.call_duration = format_duration(elapsed_secs);
        true
    }

    /// Tracked session ended or failed. Cleans up the slot and reports the
    /// call to record; the duration is whatever the display last showed, a
    /// call that never connected reports `00:00`.
    pub fn session_closed(&mut self) -> Option<CompletedCall> {
        let completed = match self.phase {
            CallPhase::Dialing | CallPhase::Connected => {
                self.route.take().map(|(from, to)| CompletedCall {
                    from,
                    to,
                    duration: self.call_duration.clone(),
                })
            }
            // A call that never got answered (remote cancel while ringing)
            // leaves no log entry.
            CallPhase::Ringing => None,
            // Already cleaned up, e.g. the hangup intent ran before the
            // session's own ended event arrived.
            CallPhase::Idle => return None,
        };
        self.reset_call();
        completed
    }

    /// Ringing to Idle on user reject. Records nothing.
    pub fn reject_incoming(&mut self) -> bool {
        if self.phase != CallPhase::Ringing {
            return false;
        }
        self.reset_call();
        true
    }

    /// Drop the dial selection when its directory entry disappears.
    pub fn clear_target_if(&mut self, number: &str) {
        if self.dial_target == number {
            self.dial_target.clear();
        }
    }

    fn reset_call(&mut self) {
        self.phase = CallPhase::Idle;
        self.caller = None;
        self.route = None;
        self.call_duration = "00:00".to_string();
        self.timer_epoch += 1;
    }
}

/// `MM:SS` with zero padding; minutes keep counting past 59, there is no
/// hour field.
pub fn format_duration(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> PhoneState {
        let mut state = PhoneState::default();
        state.set_registration(RegistrationStatus::Online);
        state
    }

    fn dialing(target: &str) -> PhoneState {
        let mut state = registered();
        state.dial_target = target.to_string();
        state.begin_dial(true).unwrap();
        state
    }

    #[test]
    fn dial_requires_registration() {
        let mut state = PhoneState::default();
        state.dial_target = "9002".to_string();
        let label_before = state.status_label();

        assert_eq!(state.begin_dial(false), Err(DialError::NotRegistered));
        assert_eq!(state.phase, CallPhase::Idle);
        assert_eq!(state.status_label(), label_before);
    }

    #[test]
    fn dial_requires_a_target() {
        let mut state = registered();
        assert_eq!(state.begin_dial(true), Err(DialError::NoTarget));
        assert_eq!(state.phase, CallPhase::Idle);
    }

    #[test]
    fn dial_enters_dialing_with_a_visible_target() {
        let state = dialing("9002");
        assert_eq!(state.phase, CallPhase::Dialing);
        assert_eq!(state.status_label(), "\u{1f4f2} Dialing 9002...");
    }

    #[test]
    fn accept_hands_out_exactly_one_fresh_epoch() {
        let mut state = dialing("9002");
        let epoch = state.session_accepted().expect("should connect");
        assert_eq!(state.phase, CallPhase::Connected);

        // a loop still holding the previous epoch must stop
        assert!(!state.tick(epoch - 1, 10));
        assert!(state.tick(epoch, 10));
    }

    #[test]
    fn accept_is_ignored_outside_dialing_and_ringing() {
        let mut state = registered();
        assert_eq!(state.session_accepted(), None);
        assert_eq!(state.phase, CallPhase::Idle);
    }

    #[test]
    fn tick_formats_elapsed_seconds() {
        let mut state = dialing("9002");
        let epoch = state.session_accepted().unwrap();
        assert!(state.tick(epoch, 125));
        assert_eq!(state.call_duration, "02:05");
    }

    #[test]
    fn closed_call_logs_the_last_displayed_duration() {
        let mut state = dialing("9002");
        let epoch = state.session_accepted().unwrap();
        state.tick(epoch, 125);

        let completed = state.session_closed().expect("connected call logs");
        assert_eq!(
            completed,
            CompletedCall {
                from: "Me".to_string(),
                to: "9002".to_string(),
                duration: "02:05".to_string(),
            }
        );
        assert_eq!(state.phase, CallPhase::Idle);
        assert_eq!(state.call_duration, "00:00");
        assert!(!state.tick(epoch, 126));
    }

    #[test]
    fn unanswered_outbound_call_logs_zero_duration() {
        let mut state = dialing("9002");
        let completed = state.session_closed().expect("dialing call logs");
        assert_eq!(completed.duration, "00:00");
    }

    #[test]
    fn second_close_is_a_no_op() {
        let mut state = dialing("9002");
        state.session_accepted();
        assert!(state.session_closed().is_some());
        assert!(state.session_closed().is_none());
    }

    #[test]
    fn incoming_call_rings_and_records_the_caller() {
        let mut state = registered();
        assert!(state.incoming_invite("sip:9002@pbx".to_string(), "9002".to_string()));
        assert_eq!(state.phase, CallPhase::Ringing);
        assert_eq!(state.caller.as_deref(), Some("sip:9002@pbx"));
    }

    #[test]
    fn invite_is_ignored_while_busy() {
        let mut state = dialing("9008");
        assert!(!state.incoming_invite("sip:9002@pbx".to_string(), "9002".to_string()));
        assert_eq!(state.phase, CallPhase::Dialing);
    }

    #[test]
    fn answered_incoming_call_logs_caller_to_me() {
        let mut state = registered();
        state.incoming_invite("sip:9002@pbx".to_string(), "9002".to_string());
        let epoch = state.session_accepted().unwrap();
        state.tick(epoch, 42);

        let completed = state.session_closed().unwrap();
        assert_eq!(completed.from, "9002");
        assert_eq!(completed.to, "Me");
        assert_eq!(completed.duration, "00:42");
    }

    #[test]
    fn reject_records_nothing() {
        let mut state = registered();
        state.incoming_invite("sip:9002@pbx".to_string(), "9002".to_string());
        assert!(state.reject_incoming());
        assert_eq!(state.phase, CallPhase::Idle);
        assert_eq!(state.caller, None);
        assert!(state.session_closed().is_none());
    }

    #[test]
    fn remote_cancel_while_ringing_records_nothing() {
        let mut state = registered();
        state.incoming_invite("sip:9002@pbx".to_string(), "9002".to_string());
        assert!(state.session_closed().is_none());
        assert_eq!(state.phase, CallPhase::Idle);
        assert_eq!(state.caller, None);
    }

    #[test]
    fn deleting_the_selected_extension_clears_the_selection() {
        let mut state = registered();
        state.dial_target = "9002".to_string();
        state.clear_target_if("9003");
        assert_eq!(state.dial_target, "9002");
        state.clear_target_if("9002");
        assert!(state.dial_target.is_empty());
    }

    #[test]
    fn duration_rolls_minutes_past_an_hour() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(125), "02:05");
        assert_eq!(format_duration(3725), "62:05");
    }
}
