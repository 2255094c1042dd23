//! # CallInitiator Component
//!
//! Phone number input, call button, and the result of the last attempt.
//!
//! ## Responsibilities
//!
//! - Capture and edit the phone number (single line)
//! - Emit `Submit` on Enter unless a call request is already loading
//! - Show the loading label while the request is pending
//! - Show the success/error alert for the last attempt
//!
//! ## State Management
//!
//! The text buffer is internal state and is *not* cleared on submit: the
//! parent calls [`CallInitiator::clear`] once the provider accepted the call,
//! so a failed attempt leaves the number in place for correction.
//! `status`, `focused` and `spinner_frame` are props synced by the parent
//! every frame.

mod editing;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::CallStatus;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::status_alert::StatusAlert;
use crate::tui::event::TuiEvent;

use editing::LineEditor;

const PLACEHOLDER: &str = "+91 9876543210";
const HINT: &str = "Include country code (e.g., +91 for India, +1 for US)";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Input box (3) + hint (1) + button (1)
const FORM_HEIGHT: u16 = 5;

const ACCENT: Color = Color::Rgb(96, 165, 250);
const HINT_COLOR: Color = Color::Rgb(147, 197, 253);

/// High-level events emitted by the CallInitiator
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User asked to place a call with the raw input text
    Submit(String),
    ContentChanged,
}

pub struct CallInitiator {
    editor: LineEditor,
    /// Status of the last submission (Prop)
    pub status: CallStatus,
    /// Whether keyboard input is routed here (Prop)
    pub focused: bool,
    /// Animation frame for the loading spinner (Prop)
    pub spinner_frame: usize,
}

impl Default for CallInitiator {
    fn default() -> Self {
        Self::new()
    }
}

impl CallInitiator {
    pub fn new() -> Self {
        Self {
            editor: LineEditor::default(),
            status: CallStatus::Idle,
            focused: true,
            spinner_frame: 0,
        }
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// Empties the input after a call went through.
    pub fn clear(&mut self) {
        self.editor.clear();
    }

    /// Total height needed at `width`, alert included.
    pub fn required_height(&self, width: u16) -> u16 {
        FORM_HEIGHT + StatusAlert::calculate_height(&self.status, width)
    }

    fn button_line(&self) -> Line<'static> {
        if self.status.is_loading() {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            Line::from(vec![
                Span::styled(format!("{frame} "), Style::default().fg(ACCENT)),
                Span::styled(
                    "Initiating Call...",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled("[Enter] ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    "☎ Start Voice Call",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ])
        }
    }
}

impl Component for CallInitiator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let alert_height = StatusAlert::calculate_height(&self.status, area.width);
        let [input_area, hint_area, button_area, alert_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(alert_height),
        ])
        .areas(area);

        let border_style = if self.focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Phone Number");

        let content = if self.editor.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.editor.text()).style(Style::default().fg(Color::White))
        };
        frame.render_widget(content.block(block), input_area);

        let hint = Paragraph::new(HINT).style(
            Style::default()
                .fg(HINT_COLOR)
                .add_modifier(Modifier::DIM),
        );
        frame.render_widget(hint, hint_area);

        frame.render_widget(
            Paragraph::new(self.button_line()).alignment(Alignment::Center),
            button_area,
        );

        if alert_height > 0 {
            StatusAlert::new(&self.status).render(frame, alert_area);
        }

        if self.focused {
            let max_col = input_area.width.saturating_sub(3);
            let col = self.editor.cursor_column().min(max_col);
            frame.set_cursor_position((input_area.x + 1 + col, input_area.y + 1));
        }
    }
}

impl EventHandler for CallInitiator {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let changed = match event {
            TuiEvent::InputChar(c) => self.editor.insert_char(*c),
            TuiEvent::Paste(text) => self.editor.insert_str(text),
            TuiEvent::Backspace => self.editor.backspace(),
            TuiEvent::Delete => self.editor.delete(),
            TuiEvent::CursorLeft => self.editor.move_left(),
            TuiEvent::CursorRight => self.editor.move_right(),
            TuiEvent::CursorHome => self.editor.move_home(),
            TuiEvent::CursorEnd => self.editor.move_end(),
            TuiEvent::Submit => {
                // Button is disabled while a request is pending
                if self.status.is_loading() {
                    return None;
                }
                return Some(InputEvent::Submit(self.editor.text().to_string()));
            }
            _ => false,
        };
        changed.then_some(InputEvent::ContentChanged)
    }
}
