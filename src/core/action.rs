//! # Actions
//!
//! Everything that can happen in the dialer becomes an `Action`.
//! User presses Enter on a number? That's `Action::Submit(raw)`.
//! The provider answers? That's `Action::CallPlaced { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! caller must run (a network request, clearing the input, ...). No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::phone;
use crate::core::state::{
    App, CALL_FAILED_MESSAGE, CALL_PLACED_MESSAGE, CallStatus, INVALID_NUMBER_MESSAGE,
    NETWORK_ERROR_MESSAGE,
};
use crate::voice::{CallRecord, ProviderError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted the phone input (raw, unnormalized).
    Submit(String),
    /// The provider accepted the call request tagged `request_id`.
    CallPlaced {
        request_id: u64,
        call_id: Option<String>,
    },
    /// The call request tagged `request_id` failed.
    CallFailed {
        request_id: u64,
        error: ProviderError,
    },
    /// Ask for a fresh copy of the call history.
    RefreshHistory,
    HistoryLoaded(Vec<CallRecord>),
    HistoryFailed(ProviderError),
    /// The history list reported a selection.
    SelectCall(String),
    Quit,
}

/// Work the caller must perform after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Issue one call-creation request for `number` (already normalized).
    PlaceCall { request_id: u64, number: String },
    /// A call went through: empty the phone input.
    ClearInput,
    /// Fetch the call history.
    FetchHistory,
}

/// Maps a provider failure to the single message shown to the user.
pub fn failure_message(error: &ProviderError) -> String {
    match error {
        ProviderError::Api {
            message: Some(message),
            ..
        } => message.clone(),
        ProviderError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        ProviderError::Api { message: None, .. }
        | ProviderError::Parse(_)
        | ProviderError::Config(_) => CALL_FAILED_MESSAGE.to_string(),
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(raw) => {
            if app.is_loading() {
                debug!("Submit ignored: call request {:?} still pending", app.in_flight);
                return Effect::None;
            }
            if !phone::validate(&raw) {
                info!("Rejected phone input ({} chars)", raw.len());
                app.status = CallStatus::Error(INVALID_NUMBER_MESSAGE.to_string());
                return Effect::None;
            }

            let number = phone::normalize(&raw);
            let request_id = app.next_request_id();
            app.in_flight = Some(request_id);
            app.status = CallStatus::Loading;
            app.status_message = String::from("Initiating call...");
            info!(
                "Placing call #{} to {}",
                request_id,
                phone::redact(&number)
            );
            Effect::PlaceCall { request_id, number }
        }
        Action::CallPlaced {
            request_id,
            call_id,
        } => {
            if app.in_flight != Some(request_id) {
                debug!("Dropping stale success for call request #{}", request_id);
                return Effect::None;
            }
            app.in_flight = None;
            app.status = CallStatus::Success(CALL_PLACED_MESSAGE.to_string());
            app.status_message = match call_id {
                Some(id) => format!("Call {} queued", id),
                None => String::from("Call queued"),
            };
            Effect::ClearInput
        }
        Action::CallFailed { request_id, error } => {
            if app.in_flight != Some(request_id) {
                debug!("Dropping stale failure for call request #{}", request_id);
                return Effect::None;
            }
            warn!("Call request #{} failed: {}", request_id, error);
            app.in_flight = None;
            app.status = CallStatus::Error(failure_message(&error));
            app.status_message = String::from("Call failed");
            Effect::None
        }
        Action::RefreshHistory => {
            if app.history_loading {
                // The running fetch may predate whatever prompted this one
                debug!("History fetch in flight, queueing another");
                app.history_refresh_queued = true;
                return Effect::None;
            }
            start_history_fetch(app)
        }
        Action::HistoryLoaded(calls) => {
            app.history_loading = false;
            app.status_message = format!("{} recent calls", calls.len());
            if let Some(id) = app.selected_call_id.as_deref()
                && !calls.iter().any(|c| c.call_id == id)
            {
                app.selected_call_id = None;
            }
            app.calls = calls;
            take_queued_refresh(app)
        }
        Action::HistoryFailed(error) => {
            warn!("History fetch failed: {}", error);
            app.history_loading = false;
            app.status_message = format!("History unavailable: {}", error);
            take_queued_refresh(app)
        }
        Action::SelectCall(call_id) => {
            debug!("Selected call {}", call_id);
            app.selected_call_id = Some(call_id);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn start_history_fetch(app: &mut App) -> Effect {
    app.history_loading = true;
    app.status_message = String::from("Loading history...");
    Effect::FetchHistory
}

/// Runs the refresh that was asked for while the last fetch was in flight.
fn take_queued_refresh(app: &mut App) -> Effect {
    if std::mem::take(&mut app.history_refresh_queued) {
        start_history_fetch(app)
    } else {
        Effect::None
    }
}
