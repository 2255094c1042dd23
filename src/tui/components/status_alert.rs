use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::state::CallStatus;
use crate::tui::component::Component;

/// Horizontal space taken by borders (2) and padding (2).
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;

const SUCCESS_BORDER: Color = Color::Rgb(34, 197, 94);
const SUCCESS_TEXT: Color = Color::Rgb(209, 250, 229);
const ERROR_BORDER: Color = Color::Rgb(239, 68, 68);
const ERROR_TEXT: Color = Color::Rgb(254, 202, 202);

/// Boxed success/error message under the call button.
/// Renders nothing for `Idle` and `Loading`.
pub struct StatusAlert<'a> {
    pub status: &'a CallStatus,
}

impl<'a> StatusAlert<'a> {
    pub fn new(status: &'a CallStatus) -> Self {
        Self { status }
    }

    fn content(status: &CallStatus) -> Option<String> {
        match status {
            CallStatus::Success(m) => Some(format!("✓ {m}")),
            CallStatus::Error(m) => Some(format!("✗ {m}")),
            CallStatus::Idle | CallStatus::Loading => None,
        }
    }

    /// Height the alert needs at `width`, borders included. 0 when hidden.
    pub fn calculate_height(status: &CallStatus, width: u16) -> u16 {
        let Some(content) = Self::content(status) else {
            return 0;
        };
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return VERTICAL_OVERHEAD + 1;
        }
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines = textwrap::wrap(&content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

impl<'a> Component for StatusAlert<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(content) = Self::content(self.status) else {
            return;
        };
        let (border, text) = match self.status {
            CallStatus::Success(_) => (SUCCESS_BORDER, SUCCESS_TEXT),
            _ => (ERROR_BORDER, ERROR_TEXT),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(content)
            .block(block)
            .style(Style::default().fg(text))
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}
