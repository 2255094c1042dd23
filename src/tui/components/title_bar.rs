//! # TitleBar Component
//!
//! Top status bar: assistant in use, last status message, and a marker while
//! the call history is being fetched.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let title_bar = TitleBar {
//!     assistant_id: "asst_123".to_string(),
//!     status_message: "Initiating call...".to_string(),
//!     history_loading: true,
//! };
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Fetching history**: `"Voice Dialer (assistant: asst_123) | Ready | ⟳ Syncing"`
//! 2. **Status message**: `"Voice Dialer (assistant: asst_123) | Ready"`
//! 3. **Default**: `"Voice Dialer (assistant: asst_123)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
///
/// # Props
///
/// - `assistant_id`: the assistant placing calls
/// - `status_message`: transient status (e.g. "Initiating call...")
/// - `history_loading`: a history fetch is in flight
pub struct TitleBar {
    pub assistant_id: String,
    pub status_message: String,
    pub history_loading: bool,
}

impl TitleBar {
    pub fn new(assistant_id: String, status_message: String, history_loading: bool) -> Self {
        Self {
            assistant_id,
            status_message,
            history_loading,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.history_loading {
            format!(
                "Voice Dialer (assistant: {}) | {} | ⟳ Syncing",
                self.assistant_id, self.status_message
            )
        } else if self.status_message.is_empty() {
            format!("Voice Dialer (assistant: {})", self.assistant_id)
        } else {
            format!(
                "Voice Dialer (assistant: {}) | {}",
                self.assistant_id, self.status_message
            )
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_new() {
        let title_bar = TitleBar::new("asst_1".to_string(), "Ready".to_string(), false);

        assert_eq!(title_bar.assistant_id, "asst_1");
        assert_eq!(title_bar.status_message, "Ready");
        assert!(!title_bar.history_loading);
    }

    #[test]
    fn test_title_bar_while_syncing() {
        let mut title_bar = TitleBar::new("asst_1".to_string(), "Ready".to_string(), true);
        let text = render_text(&mut title_bar);

        assert!(text.contains("Voice Dialer"));
        assert!(text.contains("asst_1"));
        assert!(text.contains("Ready"));
        assert!(text.contains("Syncing"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "asst_1".to_string(),
            "Initiating call...".to_string(),
            false,
        );
        let text = render_text(&mut title_bar);

        assert!(text.contains("Initiating call..."));
        assert!(!text.contains("Syncing"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("asst_1".to_string(), "".to_string(), false);
        let text = render_text(&mut title_bar);

        assert!(text.contains("Voice Dialer"));
        assert!(!text.contains('|'));
    }
}
