//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Keyboard input goes to one pane at a time (`Focus`). Tab / Shift+Tab
//! cycle panes, Esc returns to the dialer (or quits from it), Ctrl+R
//! re-fetches history from anywhere.
//!
//! ## Redraw Strategy
//!
//! The loop redraws after every poll. The poll timeout sets the pace:
//!
//! - **Animating** (call or history request pending): ~80ms so the spinner moves.
//! - **Idle**: up to a second, which keeps the "N minutes ago" labels current.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::effects;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CallDetailState, CallHistoryState, CallInitiator, HistoryEvent, InputEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::voice::CallProvider;

/// Pane that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Dialer,
    History,
    Detail,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Dialer => Focus::History,
            Focus::History => Focus::Detail,
            Focus::Detail => Focus::Dialer,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Dialer => Focus::Detail,
            Focus::History => Focus::Dialer,
            Focus::Detail => Focus::History,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub call_initiator: CallInitiator,
    pub history: CallHistoryState,
    pub detail: CallDetailState,
    pub focus: Focus,
    /// Call the detail pane was last scrolled for
    detail_call_id: Option<String>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            call_initiator: CallInitiator::new(),
            history: CallHistoryState::new(),
            detail: CallDetailState::new(),
            focus: Focus::Dialer, // User expects to type immediately
            detail_call_id: None,
        }
    }

    /// Copy props from `App` into persistent components before drawing.
    fn sync(&mut self, app: &App, spinner_frame: usize) {
        self.call_initiator.status = app.status.clone();
        self.call_initiator.focused = self.focus == Focus::Dialer;
        self.call_initiator.spinner_frame = spinner_frame;
        self.history.clamp(app.calls.len());

        if self.detail_call_id != app.selected_call_id {
            self.detail.reset();
            self.detail_call_id = app.selected_call_id.clone();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig, provider: Arc<dyn CallProvider>) -> std::io::Result<()> {
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if config.fetch_history_on_start {
        dispatch(&mut app, &mut tui, Action::RefreshHistory, &tx);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();

    loop {
        // Every pass redraws: either input changed something or the clock moved
        let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
        tui.sync(&app, spinner_frame);
        let now = chrono::Utc::now();
        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;

        // Short timeout while a spinner is visible, long when idle
        let timeout = if app.is_loading() || app.history_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(1000)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_tui_event(&event, &mut app, &mut tui, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, &mut tui, action, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    info!("TUI closed");
    Ok(())
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_tui_event(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return dispatch(app, tui, Action::Quit, tx),
        TuiEvent::Refresh => return dispatch(app, tui, Action::RefreshHistory, tx),
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            return false;
        }
        TuiEvent::FocusPrev => {
            tui.focus = tui.focus.prev();
            return false;
        }
        TuiEvent::Escape => {
            if tui.focus == Focus::Dialer {
                return dispatch(app, tui, Action::Quit, tx);
            }
            tui.focus = Focus::Dialer;
            return false;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Dialer => {
            // Loading state must be current even if no frame was drawn yet
            tui.call_initiator.status = app.status.clone();
            if let Some(InputEvent::Submit(text)) = tui.call_initiator.handle_event(event) {
                return dispatch(app, tui, Action::Submit(text), tx);
            }
        }
        Focus::History => {
            if let Some(HistoryEvent::Select(call)) = tui.history.handle_event(event, &app.calls) {
                return dispatch(app, tui, Action::SelectCall(call.call_id), tx);
            }
        }
        Focus::Detail => {
            tui.detail.handle_event(event);
        }
    }
    false
}

/// Run an action through the reducer and carry out the resulting effect.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let effect = update(app, action);
    apply_effect(effect, app, tui, tx)
}

fn apply_effect(
    effect: Effect,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::PlaceCall { request_id, number } => {
            spawn_call(app.provider.clone(), request_id, number, tx.clone());
            false
        }
        Effect::ClearInput => {
            tui.call_initiator.clear();
            // New call should show up in the list
            dispatch(app, tui, Action::RefreshHistory, tx)
        }
        Effect::FetchHistory => {
            spawn_history(app.provider.clone(), app.history_limit, tx.clone());
            false
        }
    }
}

fn spawn_call(
    provider: Arc<dyn CallProvider>,
    request_id: u64,
    number: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning call request #{}", request_id);
    tokio::spawn(async move {
        let action = effects::place_call(provider.as_ref(), request_id, &number).await;
        if tx.send(action).is_err() {
            warn!(
                "Failed to deliver result of call request #{}: receiver dropped",
                request_id
            );
        }
    });
}

fn spawn_history(provider: Arc<dyn CallProvider>, limit: u32, tx: mpsc::Sender<Action>) {
    debug!("Spawning history fetch (limit={})", limit);
    tokio::spawn(async move {
        let action = effects::fetch_history(provider.as_ref(), limit).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver call history: receiver dropped");
        }
    });
}
