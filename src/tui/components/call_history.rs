//! # CallHistoryList Component
//!
//! Renders the supplied call sequence as given: no sorting, filtering or
//! paging. Up/Down move a keyboard cursor, Enter reports the record under
//! it to the parent, which owns the actual selection.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CallHistoryState` lives in `TuiState`
//! - `CallHistoryList` is created each frame with borrowed state and props

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, HighlightSpacing, List, ListItem, ListState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::elapsed::format_distance;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::voice::CallRecord;

const COMPLETED_COLOR: Color = Color::Rgb(74, 222, 128);
const NOT_COMPLETED_COLOR: Color = Color::Rgb(248, 113, 113);
const TIMESTAMP_COLOR: Color = Color::Rgb(147, 197, 253);
const SELECTED_BG: Color = Color::Rgb(30, 58, 138);
const ACCENT: Color = Color::Rgb(96, 165, 250);

/// Persistent state for the history list.
#[derive(Default)]
pub struct CallHistoryState {
    pub cursor: usize,
    pub list_state: ListState,
}

/// Events emitted by the history list.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEvent {
    Select(CallRecord),
}

impl CallHistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the cursor inside a list that may have shrunk since last frame.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Handle a key event against the current call sequence.
    pub fn handle_event(&mut self, event: &TuiEvent, calls: &[CallRecord]) -> Option<HistoryEvent> {
        if calls.is_empty() {
            self.cursor = 0;
            return None;
        }
        self.clamp(calls.len());

        match event {
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.cursor = (self.cursor + 1).min(calls.len() - 1);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = calls.len() - 1;
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => {
                calls.get(self.cursor).cloned().map(HistoryEvent::Select)
            }
            _ => None,
        }
    }
}

/// Truncate to `max_width` terminal cells, ending in "…" when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Transient render wrapper for the history list.
pub struct CallHistoryList<'a> {
    pub state: &'a mut CallHistoryState,
    pub calls: &'a [CallRecord],
    pub selected_call_id: Option<&'a str>,
    pub focused: bool,
    pub now: DateTime<Utc>,
}

impl<'a> CallHistoryList<'a> {
    pub fn new(
        state: &'a mut CallHistoryState,
        calls: &'a [CallRecord],
        selected_call_id: Option<&'a str>,
        focused: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            state,
            calls,
            selected_call_id,
            focused,
            now,
        }
    }

    fn item(&self, call: &CallRecord, inner_width: usize) -> ListItem<'static> {
        let number = truncate_to_width(call.customer_number().unwrap_or("Unknown number"), inner_width);

        let when = match call.started() {
            Some(at) => format!("{} ago", format_distance(at, self.now, false)),
            None => "unknown time".to_string(),
        };
        let (mark, mark_color) = if call.status.is_completed() {
            ("✓", COMPLETED_COLOR)
        } else {
            ("✗", NOT_COMPLETED_COLOR)
        };

        let lines = vec![
            Line::from(Span::styled(
                number,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format!("{when}  "), Style::default().fg(TIMESTAMP_COLOR)),
                Span::styled(format!("{mark} "), Style::default().fg(mark_color)),
                Span::styled(call.status.to_string(), Style::default().fg(mark_color)),
            ]),
        ];

        let item = ListItem::new(lines);
        if self.selected_call_id == Some(call.call_id.as_str()) {
            item.style(Style::default().bg(SELECTED_BG))
        } else {
            item
        }
    }
}

impl<'a> Component for CallHistoryList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Recent Calls ");

        // borders (2) + highlight symbol (2)
        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .calls
            .iter()
            .map(|call| self.item(call, inner_width))
            .collect();

        if self.calls.is_empty() {
            self.state.cursor = 0;
            self.state.list_state.select(None);
        } else {
            self.state.clamp(self.calls.len());
            self.state.list_state.select(Some(self.state.cursor));
        }

        let highlight_style = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style)
            .highlight_symbol(if self.focused { "› " } else { "  " })
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
