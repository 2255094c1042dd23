//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: assistant, status message, history sync marker
//! - `StatusAlert`: success/error box under the call button
//!
//! ### Stateful Components
//!
//! - `CallInitiator`: owns the phone input buffer, emits `InputEvent`s
//! - `CallHistoryList`: transient wrapper over `CallHistoryState` (list cursor)
//! - `CallDetailView`: transient wrapper over `CallDetailState` (scroll offset)
//!
//! Persistent state is kept in `TuiState`; wrappers are rebuilt every frame
//! from that state plus props borrowed from `App`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Top status bar)
//! ├── status_alert.rs   (Result of the last call attempt)
//! ├── call_initiator/   (Phone input + call button)
//! ├── call_history.rs   (Recent calls list)
//! └── call_detail.rs    (Selected call, scrollable)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod call_detail;
pub mod call_history;
pub mod call_initiator;
pub mod status_alert;

pub use call_detail::{CallDetailState, CallDetailView};
pub use call_history::{CallHistoryList, CallHistoryState, HistoryEvent};
pub use call_initiator::{CallInitiator, InputEvent};
