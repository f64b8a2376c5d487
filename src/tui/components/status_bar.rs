//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::store::SortField;
use crate::tui::app::{App, FeedStatus};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.feed_status {
        FeedStatus::Live => Color::Green,
        FeedStatus::Paused => Color::Yellow,
    };

    let visible = app.view().len();
    let total = app.store.assets().len();

    let sort_label = match app.store.current_sort() {
        Some(sort) => {
            let label = SortField::from_key(&sort.field).map_or(sort.field.as_str(), |f| f.label());
            format!(" Sort: {} {} ", label, sort.direction.arrow())
        }
        None => " Sort: none ".to_string(),
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.feed_status.label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {} updates ", app.update_count),
            Style::default().fg(Color::White),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {visible}/{total} assets "),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("│"),
        Span::raw(sort_label),
        Span::raw("│"),
        error_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
