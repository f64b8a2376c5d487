//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::{App, Focus, Mode};
use super::components::{asset_table, filter_bar, header, status_bar};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                       // Header
            Constraint::Length(filter_bar::height(app)), // Search and filters
            Constraint::Min(5),                          // Market table
            Constraint::Length(1),                       // Status bar
            Constraint::Length(1),                       // Keybindings help
        ])
        .split(area);

    header::render(frame, main_layout[0], app);
    filter_bar::render(frame, main_layout[1], app);
    asset_table::render(frame, main_layout[2], app);
    status_bar::render(frame, main_layout[3], app);
    render_keybindings(frame, main_layout[4], app);
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match (app.mode, app.focus) {
        (Mode::Insert, Focus::Search) => "[Esc]normal [Enter]search now",
        (Mode::Insert, _) => "[Esc]normal [Tab]min/max [Enter]apply price range",
        (Mode::Normal, _) => {
            "[/]search [f]filters [m/M]price [1-7]sort [c]hange [r]eset [p]ause [j/k]move [q]quit"
        }
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
