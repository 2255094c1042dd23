//! # CallDetailView Component
//!
//! Read-only view of one call record: status badge, metadata, transcript
//! and recording link. With no record it shows an empty-state placeholder.
//!
//! Content is laid out as a single wrapped `Paragraph` inside a
//! `tui_scrollview::ScrollView`, so a long transcript scrolls instead of
//! being clipped. Scroll offset lives in `CallDetailState` (persisted in
//! `TuiState`) and is reset by the parent when the selection changes.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::elapsed::format_distance;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::voice::{CallRecord, CallState, Speaker};

const EMPTY_STATE: &str = "Select a call to view details";
const NOT_AVAILABLE: &str = "N/A";

const LABEL_COLOR: Color = Color::Rgb(147, 197, 253);
const SECTION_COLOR: Color = Color::Rgb(96, 165, 250);
const ASSISTANT_COLOR: Color = Color::Rgb(96, 165, 250);
const CUSTOMER_COLOR: Color = Color::Rgb(74, 222, 128);

/// Display color for a call status.
pub fn status_color(state: &CallState) -> Color {
    match state {
        CallState::Queued => Color::Rgb(0xf5, 0x9e, 0x0b),
        CallState::Ringing => Color::Rgb(0x3b, 0x82, 0xf6),
        CallState::InProgress => Color::Rgb(0x10, 0xb9, 0x81),
        CallState::Completed => Color::Rgb(0x4a, 0xde, 0x80),
        CallState::Failed | CallState::Busy | CallState::NoAnswer => {
            Color::Rgb(0xef, 0x44, 0x44)
        }
        CallState::Other(_) => Color::Rgb(0x93, 0xc5, 0xfd),
    }
}

fn speaker_label(role: &Speaker) -> &str {
    match role {
        Speaker::Assistant => "AI Assistant",
        Speaker::Customer => "Customer",
        Speaker::Other(role) => role,
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(LABEL_COLOR)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(SECTION_COLOR)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Body lines for a record, relative to `now`.
pub fn detail_lines(record: &CallRecord, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let mut lines = vec![
        field(
            "Customer Number",
            record.customer_number().unwrap_or(NOT_AVAILABLE).to_string(),
        ),
        field(
            "Duration",
            record
                .started()
                .map(|at| format_distance(at, now, true))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
    ];
    if let Some(call_type) = &record.call_type {
        lines.push(field("Call Type", call_type.clone()));
    }
    if let Some(reason) = &record.ended_reason {
        lines.push(field("End Reason", reason.clone()));
    }

    if !record.transcript.is_empty() {
        lines.push(Line::default());
        lines.push(section("TRANSCRIPT"));
        for entry in &record.transcript {
            let color = match entry.role {
                Speaker::Assistant => ASSISTANT_COLOR,
                Speaker::Customer => CUSTOMER_COLOR,
                Speaker::Other(_) => LABEL_COLOR,
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", speaker_label(&entry.role)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(entry.text.clone()),
            ]));
        }
    }

    if let Some(url) = &record.recording_url {
        lines.push(Line::default());
        lines.push(section("RECORDING"));
        lines.push(Line::from(Span::styled(
            url.clone(),
            Style::default()
                .fg(LABEL_COLOR)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }

    lines
}

/// Scroll state for the detail pane.
#[derive(Default)]
pub struct CallDetailState {
    pub scroll: ScrollViewState,
}

impl CallDetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, used when another call is selected.
    pub fn reset(&mut self) {
        self.scroll.scroll_to_top();
    }

    fn clamp(&mut self, content_height: u16, viewport_height: u16) {
        let max_y = content_height.saturating_sub(viewport_height);
        let current = self.scroll.offset();
        if current.y > max_y {
            self.scroll.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for CallDetailState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.scroll.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.scroll.scroll_down(),
            TuiEvent::PageUp => self.scroll.scroll_page_up(),
            TuiEvent::PageDown => self.scroll.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll.scroll_to_top(),
            _ => {}
        }
        None
    }
}

pub struct CallDetailView<'a> {
    pub state: &'a mut CallDetailState,
    pub record: Option<&'a CallRecord>,
    pub now: DateTime<Utc>,
    pub focused: bool,
}

impl<'a> CallDetailView<'a> {
    pub fn new(
        state: &'a mut CallDetailState,
        record: Option<&'a CallRecord>,
        now: DateTime<Utc>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            record,
            now,
            focused,
        }
    }

    fn block(&self) -> Block<'static> {
        let border_style = if self.focused {
            Style::default().fg(SECTION_COLOR)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title(" Call Details ");

        let Some(record) = self.record else {
            return block;
        };
        let mut badge_style = Style::default()
            .fg(status_color(&record.status))
            .add_modifier(Modifier::BOLD);
        if record.status == CallState::InProgress {
            badge_style = badge_style.add_modifier(Modifier::SLOW_BLINK);
        }
        block.title_top(
            Line::from(Span::styled(format!(" ● {} ", record.status), badge_style))
                .right_aligned(),
        )
    }
}

impl<'a> Component for CallDetailView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(record) = self.record else {
            let placeholder = Paragraph::new(EMPTY_STATE)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            let middle = Rect {
                y: inner.y + inner.height / 2,
                height: inner.height.min(1),
                ..inner
            };
            frame.render_widget(placeholder, middle);
            return;
        };

        // -1 for the scrollbar column
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(detail_lines(record, self.now)).wrap(Wrap { trim: false });
        let content_height = paragraph.line_count(content_width) as u16;

        self.state.clamp(content_height, inner.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            paragraph,
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll);
    }
}
