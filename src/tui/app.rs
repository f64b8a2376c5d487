//! Application state for the TUI.

use std::time::{Duration, Instant};

use crate::models::{Asset, PriceUpdate};
use crate::simulation::PriceSimulator;
use crate::store::{FilterPatch, SortConfig, SortField, Store};

use super::input::TextInput;

/// Delay between the last search keystroke and the search being applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a row stays highlighted after it was updated.
pub const UPDATE_HIGHLIGHT: Duration = Duration::from_millis(800);

/// How long an error stays in the status bar.
const ERROR_TIMEOUT: Duration = Duration::from_secs(5);

/// Sort buttons in the filter panel, bound to keys `1`..=`7`.
pub const SORT_BUTTONS: [SortField; 7] = [
    SortField::Name,
    SortField::Price,
    SortField::PercentChange1h,
    SortField::PercentChange24h,
    SortField::PercentChange7d,
    SortField::MarketCap,
    SortField::Volume24h,
];

/// Central application state container.
pub struct App {
    // -- Market State --
    /// Assets and view configuration.
    pub store: Store,
    /// Source of simulated updates.
    pub simulator: PriceSimulator,
    /// Whether the update feed is running.
    pub feed_status: FeedStatus,
    /// Number of updates applied since start.
    pub update_count: u64,
    /// Most recently applied update, for row highlighting.
    pub last_update: Option<RecentUpdate>,

    // -- Filter Inputs --
    pub search_input: TextInput,
    pub min_price_input: TextInput,
    pub max_price_input: TextInput,
    /// Time of the last uncommitted search edit.
    pub search_edited_at: Option<Instant>,
    /// Whether the sort/price/change panel is shown.
    pub filters_expanded: bool,

    // -- UI State --
    /// Current focus.
    pub focus: Focus,
    /// Current input mode.
    pub mode: Mode,
    /// Selected row in the current view.
    pub selected_row: usize,
    /// Error message to display (clears after timeout).
    pub error_message: Option<ErrorDisplay>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App around an initialized store.
    pub fn new(store: Store, simulator: PriceSimulator) -> Self {
        Self {
            store,
            simulator,
            feed_status: FeedStatus::Paused,
            update_count: 0,
            last_update: None,

            search_input: TextInput::new(),
            min_price_input: TextInput::new(),
            max_price_input: TextInput::new(),
            search_edited_at: None,
            filters_expanded: false,

            focus: Focus::Table,
            mode: Mode::Normal,
            selected_row: 0,
            error_message: None,

            should_quit: false,
        }
    }

    /// Rows currently visible, filtered and sorted.
    pub fn view(&self) -> Vec<&Asset> {
        self.store.select_view()
    }

    /// Runs one simulator step against the store.
    pub fn apply_tick(&mut self) -> Option<PriceUpdate> {
        let update = self.simulator.next_update(&self.store)?;
        let rose = self
            .store
            .asset(update.id)
            .is_none_or(|a| update.price >= a.price);
        self.store.apply_price_update(&update);
        self.clamp_selection();

        self.update_count += 1;
        self.last_update = Some(RecentUpdate {
            id: update.id,
            rose,
            at: Instant::now(),
        });
        Some(update)
    }

    /// Whether the row for `id` should be drawn highlighted at `now`.
    pub fn is_highlighted(&self, id: u32, now: Instant) -> bool {
        self.last_update
            .as_ref()
            .is_some_and(|u| u.id == id && now.duration_since(u.at) < UPDATE_HIGHLIGHT)
    }

    /// Sorts by `field`, flipping the direction when it is already the sort field.
    pub fn toggle_sort(&mut self, field: SortField) {
        let config = match self.store.current_sort() {
            Some(current) if current.field == field.key() => {
                SortConfig::new(field.key(), current.direction.flipped())
            }
            _ => SortConfig::ascending(field.key()),
        };
        self.store.set_sort(config);
        self.clamp_selection();
    }

    /// Records a search edit made at `now`. The store sees it after the debounce.
    pub fn note_search_edit(&mut self, now: Instant) {
        self.search_edited_at = Some(now);
    }

    /// Applies a pending search edit once the debounce has elapsed.
    pub fn commit_search_if_due(&mut self, now: Instant) {
        if self
            .search_edited_at
            .is_some_and(|at| now.duration_since(at) >= SEARCH_DEBOUNCE)
        {
            self.commit_search();
        }
    }

    /// Applies the search input to the store immediately.
    pub fn commit_search(&mut self) {
        self.search_edited_at = None;
        if self.store.current_filters().search_text != self.search_input.as_str() {
            self.store
                .set_filters(FilterPatch::default().search(self.search_input.as_str()));
            self.clamp_selection();
        }
    }

    /// Parses the price inputs and applies them as bounds.
    ///
    /// Empty inputs clear their bound. If either input is not a number,
    /// nothing is applied, an error is shown and `false` is returned.
    pub fn apply_price_range(&mut self) -> bool {
        let min = parse_bound(self.min_price_input.as_str());
        let max = parse_bound(self.max_price_input.as_str());

        match (min, max) {
            (Ok(min), Ok(max)) => {
                self.store
                    .set_filters(FilterPatch::default().min_price(min).max_price(max));
                self.clamp_selection();
                true
            }
            (Err(raw), _) | (_, Err(raw)) => {
                tracing::warn!(input = %raw, "rejected price filter input");
                self.show_error(format!("not a price: {raw}"));
                false
            }
        }
    }

    /// Steps the 24h change filter to its next value.
    pub fn cycle_change_filter(&mut self) {
        let next = self.store.current_filters().change_filter.next();
        self.store.set_filters(FilterPatch::default().change(next));
        self.clamp_selection();
    }

    /// Resets the store's filters and clears every filter input.
    pub fn reset_filters(&mut self) {
        self.store.reset_filters();
        self.search_input.clear();
        self.min_price_input.clear();
        self.max_price_input.clear();
        self.search_edited_at = None;
        self.clamp_selection();
    }

    /// Returns the input field that has focus, if any.
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::Table => None,
            Focus::Search => Some(&mut self.search_input),
            Focus::MinPrice => Some(&mut self.min_price_input),
            Focus::MaxPrice => Some(&mut self.max_price_input),
        }
    }

    /// Moves the row selection down.
    pub fn select_next(&mut self) {
        let len = self.view().len();
        if self.selected_row + 1 < len {
            self.selected_row += 1;
        }
    }

    /// Moves the row selection up.
    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    /// Keeps the selection inside the current view.
    fn clamp_selection(&mut self) {
        let len = self.view().len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            timestamp: Instant::now(),
        });
    }

    /// Clears error messages older than 5 seconds.
    pub fn clear_stale_errors(&mut self) {
        if let Some(ref error) = self.error_message
            && error.timestamp.elapsed() > ERROR_TIMEOUT
        {
            self.error_message = None;
        }
    }
}

/// Parses a price input. Empty means "no bound".
fn parse_bound(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(trimmed.to_string()),
    }
}

/// Update feed state shown in the status bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedStatus {
    Live,
    #[default]
    Paused,
}

impl FeedStatus {
    /// Returns a display string for the status.
    pub fn label(&self) -> &'static str {
        match self {
            FeedStatus::Live => "Live",
            FeedStatus::Paused => "Paused",
        }
    }
}

/// UI focus targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Table,
    Search,
    MinPrice,
    MaxPrice,
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

/// The last applied update.
#[derive(Clone, Debug)]
pub struct RecentUpdate {
    pub id: u32,
    /// Whether the price went up (or stayed level).
    pub rose: bool,
    pub at: Instant,
}

/// Error message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct ErrorDisplay {
    /// The error message.
    pub message: String,
    /// When the error was shown.
    pub timestamp: Instant,
}
