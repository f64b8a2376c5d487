//! Search box and the collapsible sort / price / change panel.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::store::ChangeFilter;
use crate::tui::app::{App, Focus, Mode, SORT_BUTTONS};
use crate::tui::input::TextInput;

const SEARCH_HEIGHT: u16 = 3;
const PANEL_HEIGHT: u16 = 5;

/// Rows the filter bar needs in its current state.
pub fn height(app: &App) -> u16 {
    if app.filters_expanded {
        SEARCH_HEIGHT + PANEL_HEIGHT
    } else {
        SEARCH_HEIGHT
    }
}

/// Renders the filter bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SEARCH_HEIGHT), Constraint::Min(0)])
        .split(area);

    render_search(frame, rows[0], app);
    if app.filters_expanded {
        render_panel(frame, rows[1], app);
    }
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Search;
    let is_insert = is_focused && app.mode == Mode::Insert;

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let toggle_hint = if app.filters_expanded {
        " [f]hide filters "
    } else {
        " [f]show filters "
    };

    let block = Block::default()
        .title(" Search [/] ")
        .title_bottom(Line::from(toggle_hint).right_aligned())
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let prompt = "> ";
    let content = if app.search_input.is_empty() && !is_insert {
        Line::from(vec![
            Span::raw(prompt),
            Span::styled("Search by name or symbol", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![Span::raw(prompt), Span::raw(app.search_input.as_str())])
    };
    frame.render_widget(Paragraph::new(content), inner);

    if is_insert {
        let prompt_width = Span::raw(prompt).width() as u16;
        frame.set_cursor_position((
            inner.x + prompt_width + app.search_input.cursor_column(),
            inner.y,
        ));
    }
}

fn render_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (price_line, cursor_x) = price_line(app);
    let lines = vec![sort_line(app), price_line, change_line(app)];
    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(x) = cursor_x {
        frame.set_cursor_position((inner.x + x, inner.y + 1));
    }
}

fn sort_line(app: &App) -> Line<'static> {
    let active = app.store.sort_field();
    let direction = app.store.current_sort().map(|s| s.direction);

    let mut spans = vec![Span::styled("Sort  ", Style::default().fg(Color::DarkGray))];
    for (i, field) in SORT_BUTTONS.iter().enumerate() {
        let is_active = active == Some(*field);
        let arrow = match direction {
            Some(d) if is_active => format!(" {}", d.arrow()),
            _ => String::new(),
        };
        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}] {}{}", i + 1, field.label(), arrow),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Builds the price range line and, when one of its inputs is being edited,
/// the cursor column inside it.
fn price_line(app: &App) -> (Line<'static>, Option<u16>) {
    let mut spans = vec![Span::styled("Price ", Style::default().fg(Color::DarkGray))];
    let mut cursor = None;

    for (label, input, focus) in [
        ("[m]in $", &app.min_price_input, Focus::MinPrice),
        ("  [M]ax $", &app.max_price_input, Focus::MaxPrice),
    ] {
        spans.push(Span::raw(label));
        let is_focused = app.focus == focus;
        if is_focused && app.mode == Mode::Insert {
            let offset: usize = spans.iter().map(Span::width).sum();
            cursor = Some(offset as u16 + input.cursor_column());
        }
        spans.push(input_span(input, is_focused));
    }

    (Line::from(spans), cursor)
}

fn input_span(input: &TextInput, is_focused: bool) -> Span<'static> {
    let style = if is_focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
    };
    Span::styled(format!("{:<10}", input.as_str()), style)
}

fn change_line(app: &App) -> Line<'static> {
    let current = app.store.current_filters().change_filter;

    let mut spans = vec![Span::styled(
        "24h   [c] ",
        Style::default().fg(Color::DarkGray),
    )];
    for filter in [ChangeFilter::All, ChangeFilter::Positive, ChangeFilter::Negative] {
        let style = if filter == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("[r]eset", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}
