//! # Application State
//!
//! Core business state for the dialer. Domain logic only - no TUI types.
//! Presentation state (input buffer, list cursor, scroll) lives in `tui`.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn CallProvider>   // voice provider
//! ├── assistant_id: String              // shown in the title bar
//! ├── status: CallStatus                // initiator status
//! ├── status_message: String            // title bar text
//! ├── calls: Vec<CallRecord>            // history, as supplied
//! ├── selected_call_id: Option<String>  // history selection
//! ├── history_limit: u32                // calls per fetch
//! ├── history_loading: bool             // fetch in flight
//! ├── history_refresh_queued: bool      // refetch once the current one lands
//! └── in_flight: Option<u64>            // token of the pending call request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::voice::{CallProvider, CallRecord};

pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid phone number";
pub const CALL_PLACED_MESSAGE: &str =
    "Call initiated successfully! You should receive a call shortly.";
pub const CALL_FAILED_MESSAGE: &str = "Failed to initiate call. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Outcome of the most recent call submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallStatus {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl CallStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, CallStatus::Loading)
    }

    /// The user-visible message, if this status carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            CallStatus::Success(m) | CallStatus::Error(m) => Some(m),
            CallStatus::Idle | CallStatus::Loading => None,
        }
    }
}

pub struct App {
    pub provider: Arc<dyn CallProvider>,
    pub assistant_id: String,
    pub status: CallStatus,
    pub status_message: String,
    pub calls: Vec<CallRecord>,
    pub selected_call_id: Option<String>,
    pub history_limit: u32,
    pub history_loading: bool,
    /// A refresh was asked for while a fetch was in flight.
    pub history_refresh_queued: bool,
    /// Token of the call request whose response we are waiting for.
    pub in_flight: Option<u64>,
    /// Last token handed out. Tokens are never reused.
    pub(crate) last_request_id: u64,
}

impl App {
    pub fn new(provider: Arc<dyn CallProvider>, assistant_id: String) -> Self {
        Self {
            provider,
            assistant_id,
            status: CallStatus::Idle,
            status_message: String::from("Ready"),
            calls: Vec::new(),
            selected_call_id: None,
            history_limit: crate::core::config::DEFAULT_HISTORY_LIMIT,
            history_loading: false,
            history_refresh_queued: false,
            in_flight: None,
            last_request_id: 0,
        }
    }

    pub fn from_config(provider: Arc<dyn CallProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider, config.assistant_id.clone().unwrap_or_default());
        app.history_limit = config.history_limit;
        app
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// The record the history selection points at, if it is still in the list.
    pub fn selected_call(&self) -> Option<&CallRecord> {
        let id = self.selected_call_id.as_deref()?;
        self.calls.iter().find(|c| c.call_id == id)
    }

    pub(crate) fn next_request_id(&mut self) -> u64 {
        self.last_request_id += 1;
        self.last_request_id
    }
}
