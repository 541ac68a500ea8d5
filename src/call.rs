//! Call session controller.
//!
//! Reacts to signaling and session events, drives the visible call state and
//! records completed calls. All SIP negotiation stays behind the JS shim;
//! this module only sequences view-state transitions and their side effects:
//! the 1 Hz duration timer, ringtone playback and remote media attachment.

use crate::state::DialError;

#[cfg(target_arch = "wasm32")]
use crate::config::SignalingConfig;
#[cfg(target_arch = "wasm32")]
use crate::models::CallLogEntry;
#[cfg(target_arch = "wasm32")]
use crate::signaling::{self, SessionEvent, SignalingEvent};
#[cfg(target_arch = "wasm32")]
use crate::state::{CallPhase, CompletedCall, RegistrationStatus, CALL_LOG, PHONE_STATE};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Start the signaling client and wire its events. Runs once on mount.
pub fn bootstrap() {
    #[cfg(target_arch = "wasm32")]
    {
        let config = SignalingConfig::default();
        install_event_listeners();
        install_audio_unlock();
        if !signaling::init_signaling_client(
            &config.transport_endpoint,
            &config.identity_uri,
            &config.credential_secret,
            &config.display_name,
            config.register_on_start,
        ) {
            tracing::error!("failed to start signaling client");
        }
    }
}

/// Stop the signaling client on teardown. Failures during stop are
/// non-fatal cleanup and suppressed inside the shim.
pub fn shutdown() {
    #[cfg(target_arch = "wasm32")]
    signaling::stop_signaling_client();
}

/// Place a call to the selected extension. Precondition failures are
/// reported to the caller and leave every piece of state untouched.
pub fn dial() -> Result<(), DialError> {
    #[cfg(target_arch = "wasm32")]
    {
        // single call slot
        if PHONE_STATE.read().phase != CallPhase::Idle {
            return Ok(());
        }
        let registered = signaling::is_signaling_registered();
        let target = { PHONE_STATE.write().begin_dial(registered) }?;

        let config = SignalingConfig::default();
        let uri = config.dial_uri(&target);
        tracing::info!("dialing {}", uri);
        if signaling::dial_session(&uri) {
            attach_remote_media();
        } else {
            tracing::error!("signaling client refused to dial {}", uri);
            // no session was created, so nothing gets logged
            let _ = PHONE_STATE.write().session_closed();
        }
    }
    Ok(())
}

/// Answer the pending incoming call. The session's accepted event finishes
/// the transition into Connected.
pub fn answer() {
    #[cfg(target_arch = "wasm32")]
    {
        if PHONE_STATE.read().phase != CallPhase::Ringing {
            return;
        }
        if !signaling::answer_incoming_session() {
            tracing::warn!("no pending session to answer");
        }
    }
}

/// Reject the pending incoming call. Terminates the session without ever
/// recording a log entry.
pub fn reject() {
    #[cfg(target_arch = "wasm32")]
    {
        if PHONE_STATE.write().reject_incoming() {
            signaling::reject_incoming_session();
            stop_ringtone();
        }
    }
}

/// Hang up the tracked session. Cleanup and logging run immediately; the
/// session's own ended event then finds the slot already idle.
pub fn hangup() {
    #[cfg(target_arch = "wasm32")]
    {
        signaling::terminate_active_session();
        finish_call();
    }
}

#[cfg(target_arch = "wasm32")]
fn on_signaling_event(event: SignalingEvent) {
    match event {
        SignalingEvent::Registered => {
            PHONE_STATE.write().set_registration(RegistrationStatus::Online);
        }
        SignalingEvent::RegistrationFailed | SignalingEvent::Disconnected => {
            PHONE_STATE.write().set_registration(RegistrationStatus::Offline);
        }
        SignalingEvent::IncomingSession { caller, user } => {
            if PHONE_STATE.write().incoming_invite(caller.clone(), user) {
                tracing::info!("incoming call from {}", caller);
                play_ringtone();
                attach_remote_media();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn on_session_event(event: SessionEvent) {
    match event {
        SessionEvent::Accepted => {
            let epoch = PHONE_STATE.write().session_accepted();
            if let Some(epoch) = epoch {
                stop_ringtone();
                start_call_timer(epoch);
            }
        }
        SessionEvent::Ended | SessionEvent::Failed => finish_call(),
    }
}

/// Shared end-of-call path for hangup and the session's ended/failed
/// events, whichever runs first.
#[cfg(target_arch = "wasm32")]
fn finish_call() {
    let completed = PHONE_STATE.write().session_closed();
    if let Some(call) = completed {
        record_call(call);
    }
    stop_ringtone();
    detach_remote_media();
}

#[cfg(target_arch = "wasm32")]
fn record_call(call: CompletedCall) {
    let entry = CallLogEntry {
        from: call.from,
        to: call.to,
        duration: call.duration,
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    tracing::info!("recording call {} -> {} ({})", entry.from, entry.to, entry.duration);
    CALL_LOG.write().append(entry);
}

/// One display loop per epoch. The state's tick method refuses stale
/// epochs, so a superseded loop stops itself on its next wakeup.
#[cfg(target_arch = "wasm32")]
fn start_call_timer(epoch: u64) {
    let started = js_sys::Date::now();
    spawn_local(async move {
        loop {
            gloo_timers::future::TimeoutFuture::new(1_000).await;
            let elapsed = ((js_sys::Date::now() - started) / 1000.0) as u64;
            if !PHONE_STATE.write().tick(epoch, elapsed) {
                break;
            }
        }
    });
}

#[cfg(target_arch = "wasm32")]
fn install_event_listeners() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let registration = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        if let Some(state) = detail_field(&event, "state") {
            if let Some(ev) = SignalingEvent::parse_registration(&state) {
                on_signaling_event(ev);
            }
        }
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback(
        signaling::REGISTRATION_EVENT,
        registration.as_ref().unchecked_ref(),
    );
    registration.forget();

    let incoming = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(caller) = detail_field(&event, "caller") else {
            return;
        };
        let user = detail_field(&event, "user").unwrap_or_else(|| caller.clone());
        on_signaling_event(SignalingEvent::IncomingSession { caller, user });
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback(
        signaling::INCOMING_EVENT,
        incoming.as_ref().unchecked_ref(),
    );
    incoming.forget();

    let session = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        if let Some(state) = detail_field(&event, "state") {
            if let Some(ev) = SessionEvent::parse(&state) {
                on_session_event(ev);
            }
        }
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback(
        signaling::SESSION_EVENT,
        session.as_ref().unchecked_ref(),
    );
    session.forget();
}

#[cfg(target_arch = "wasm32")]
fn detail_field(event: &web_sys::CustomEvent, field: &str) -> Option<String> {
    js_sys::Reflect::get(&event.detail(), &field.into())
        .ok()
        .and_then(|v| v.as_string())
}

/// One-shot unlock: play-then-pause the ringtone on the first user click so
/// later playback attempts are not blocked by the autoplay policy.
#[cfg(target_arch = "wasm32")]
fn install_audio_unlock() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let unlock = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let Some(el) = ringtone_element() else {
            return;
        };
        if let Ok(promise) = el.play() {
            spawn_local(async move {
                if JsFuture::from(promise).await.is_ok() {
                    if let Some(el) = ringtone_element() {
                        let _ = el.pause();
                        el.set_current_time(0.0);
                    }
                }
            });
        }
    }) as Box<dyn FnMut(_)>);
    let options = web_sys::AddEventListenerOptions::new();
    options.set_once(true);
    let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "click",
        unlock.as_ref().unchecked_ref(),
        &options,
    );
    unlock.forget();
}

#[cfg(target_arch = "wasm32")]
fn ringtone_element() -> Option<web_sys::HtmlAudioElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id("ringtone")?
        .dyn_into::<web_sys::HtmlAudioElement>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
fn remote_audio_element() -> Option<web_sys::HtmlAudioElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id("remote-audio")?
        .dyn_into::<web_sys::HtmlAudioElement>()
        .ok()
}

/// Best effort: the play promise rejects until the page has seen a user
/// gesture, and that rejection must never surface.
#[cfg(target_arch = "wasm32")]
fn play_ringtone() {
    let Some(el) = ringtone_element() else {
        return;
    };
    if let Ok(promise) = el.play() {
        spawn_local(async move {
            let _ = JsFuture::from(promise).await;
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn stop_ringtone() {
    if let Some(el) = ringtone_element() {
        let _ = el.pause();
        el.set_current_time(0.0);
    }
}

/// Subscribe the establishing session's track notification and route the
/// first remote stream into the playback element. Runs once per session
/// establishment.
#[cfg(target_arch = "wasm32")]
fn attach_remote_media() {
    let connection = signaling::active_session_connection();
    let Ok(target) = connection.dyn_into::<web_sys::EventTarget>() else {
        return;
    };

    let on_track = Closure::wrap(Box::new(move |event: web_sys::RtcTrackEvent| {
        let streams = event.streams();
        if streams.length() == 0 {
            return;
        }
        let Ok(stream) = streams.get(0).dyn_into::<web_sys::MediaStream>() else {
            return;
        };
        if let Some(audio) = remote_audio_element() {
            audio.set_src_object(Some(&stream));
        }
    }) as Box<dyn FnMut(_)>);
    let _ = target.add_event_listener_with_callback("track", on_track.as_ref().unchecked_ref());
    on_track.forget();
}

#[cfg(target_arch = "wasm32")]
fn detach_remote_media() {
    if let Some(audio) = remote_audio_element() {
        audio.set_src_object(None);
    }
}
