use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{CallDetailView, CallHistoryList, TitleBar};
use crate::tui::{Focus, TuiState};

/// Left column width as a percentage of the terminal.
const LEFT_PERCENT: u16 = 42;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: DateTime<Utc>) {
    use Constraint::{Length, Min, Percentage};

    let [title_area, body_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [left_area, detail_area] =
        Layout::horizontal([Percentage(LEFT_PERCENT), Min(0)]).areas(body_area);
    let initiator_height = tui.call_initiator.required_height(left_area.width);
    let [initiator_area, history_area] =
        Layout::vertical([Length(initiator_height), Min(0)]).areas(left_area);

    TitleBar::new(
        app.assistant_id.clone(),
        app.status_message.clone(),
        app.history_loading,
    )
    .render(frame, title_area);

    tui.call_initiator.render(frame, initiator_area);

    CallHistoryList::new(
        &mut tui.history,
        &app.calls,
        app.selected_call_id.as_deref(),
        tui.focus == Focus::History,
        now,
    )
    .render(frame, history_area);

    CallDetailView::new(
        &mut tui.detail,
        app.selected_call(),
        now,
        tui.focus == Focus::Detail,
    )
    .render(frame, detail_area);

    draw_footer(frame, footer_area, tui.focus);
}

fn footer_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Dialer => "Enter call · Tab next pane · Ctrl+R refresh · Esc quit",
        Focus::History => "↑/↓ move · Enter show details · Tab next pane · Ctrl+R refresh · Esc back",
        Focus::Detail => "↑/↓ PgUp/PgDn scroll · Tab next pane · Esc back",
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, focus: Focus) {
    let line = Line::from(Span::styled(
        footer_hints(focus),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(line, area);
}
