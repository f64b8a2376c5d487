//! Title line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, FeedStatus};

/// Renders the title line with the feed badge.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let badge = match app.feed_status {
        FeedStatus::Live => Span::styled(" ● LIVE ", Style::default().fg(Color::Black).bg(Color::Green)),
        FeedStatus::Paused => Span::styled(" ‖ PAUSED ", Style::default().fg(Color::Black).bg(Color::Yellow)),
    };

    let line = Line::from(vec![
        Span::styled(
            " Tickerboard ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            "Cryptocurrency Prices by Market Cap",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        badge,
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
