//! The market table.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::format::{
    format_currency, format_percentage, format_signed_percentage, format_supply,
};
use crate::models::Asset;
use crate::store::SortField;
use crate::tui::app::{App, Focus};

/// Shown instead of rows when the filters exclude every asset.
pub const EMPTY_MESSAGE: &str = "No cryptocurrencies match your filter criteria";

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const SPARK_WIDTH: usize = 16;

const COLUMNS: [(Option<SortField>, &str, Constraint); 10] = [
    (Some(SortField::Id), "#", Constraint::Length(3)),
    (Some(SortField::Name), "Name", Constraint::Min(16)),
    (Some(SortField::Price), "Price", Constraint::Length(14)),
    (Some(SortField::PercentChange1h), "1h %", Constraint::Length(9)),
    (Some(SortField::PercentChange24h), "24h %", Constraint::Length(9)),
    (Some(SortField::PercentChange7d), "7d %", Constraint::Length(9)),
    (Some(SortField::MarketCap), "Market Cap", Constraint::Length(12)),
    (Some(SortField::Volume24h), "Volume(24h)", Constraint::Length(12)),
    (Some(SortField::CirculatingSupply), "Circulating Supply", Constraint::Length(18)),
    (None, "Last 7 Days", Constraint::Length(SPARK_WIDTH as u16 + 9)),
];

/// Renders the table of visible assets.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Table {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(" Markets ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let view = app.view();
    if view.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let para = Paragraph::new(EMPTY_MESSAGE)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(para, inner);
        return;
    }

    let now = Instant::now();
    let rows: Vec<Row> = view.iter().map(|asset| asset_row(app, asset, now)).collect();

    let table = Table::new(rows, COLUMNS.map(|(_, _, width)| width))
        .header(header_row(app))
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(Some(app.selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn header_row(app: &App) -> Row<'static> {
    let active = app.store.sort_field();
    let arrow = app.store.current_sort().map(|s| s.direction.arrow());

    let cells = COLUMNS.iter().map(|(field, title, _)| {
        let title = match (field, arrow) {
            (Some(f), Some(arrow)) if active == Some(*f) => format!("{title} {arrow}"),
            _ => (*title).to_string(),
        };
        Cell::from(title)
    });

    Row::new(cells).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
}

fn asset_row<'a>(app: &App, asset: &'a Asset, now: Instant) -> Row<'a> {
    let trend = asset.history_change_pct();
    let trend_color = if asset.history_trending_up() {
        Color::Green
    } else {
        Color::Red
    };

    let cells = vec![
        Cell::from(asset.id.to_string()),
        Cell::from(Line::from(vec![
            Span::styled(asset.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(asset.symbol.as_str(), Style::default().fg(Color::DarkGray)),
        ])),
        Cell::from(format_currency(asset.price)),
        change_cell(asset.percent_change_1h),
        change_cell(asset.percent_change_24h),
        change_cell(asset.percent_change_7d),
        Cell::from(format_currency(asset.market_cap)),
        Cell::from(format_currency(asset.volume_24h)),
        Cell::from(format_supply(asset.circulating_supply, &asset.symbol)),
        Cell::from(Line::from(vec![
            Span::styled(sparkline(asset, SPARK_WIDTH), Style::default().fg(trend_color)),
            Span::raw(" "),
            Span::styled(format_signed_percentage(trend), Style::default().fg(trend_color)),
        ])),
    ];

    let row = Row::new(cells);
    match app.last_update.as_ref() {
        Some(update) if app.is_highlighted(asset.id, now) => {
            let bg = if update.rose { Color::Rgb(0, 60, 0) } else { Color::Rgb(70, 0, 0) };
            row.style(Style::default().bg(bg))
        }
        _ => row,
    }
}

/// Colored percentage with a direction arrow. Zero is gray and has no arrow.
fn change_cell(value: f64) -> Cell<'static> {
    let (color, arrow) = if value > 0.0 {
        (Color::Green, "▲ ")
    } else if value < 0.0 {
        (Color::Red, "▼ ")
    } else {
        (Color::Gray, "")
    };
    Cell::from(Span::styled(
        format!("{arrow}{}", format_percentage(value)),
        Style::default().fg(color),
    ))
}

/// Draws the price history as block glyphs scaled between its min and max.
///
/// The history is resampled to `width` glyphs. A flat history draws at mid height.
pub fn sparkline(asset: &Asset, width: usize) -> String {
    let points: Vec<f64> = asset.price_history.iter().copied().collect();
    if points.is_empty() || width == 0 {
        return String::new();
    }

    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    let span = max - min;
    let top = SPARK_GLYPHS.len() - 1;
    let glyphs = width.min(points.len());
    let last = points.len() - 1;

    (0..glyphs)
        .map(|i| {
            let value = points[(i * last / (glyphs - 1).max(1)).min(last)];
            let level = if span > 0.0 {
                (((value - min) / span) * top as f64).round() as usize
            } else {
                top / 2
            };
            SPARK_GLYPHS[level.min(top)]
        })
        .collect()
}
