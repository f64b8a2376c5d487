//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tracing::debug;

use crate::feed::{FeedTick, UpdateFeed};

use super::app::{App, FeedStatus, Focus, Mode, SORT_BUTTONS};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// The update feed fired.
    Feed(FeedTick),
}

impl From<FeedTick> for Message {
    fn from(tick: FeedTick) -> Self {
        Message::Feed(tick)
    }
}

/// Actions that require external handling (the feed lives outside `App`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PauseFeed,
    ResumeFeed,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                // Release and repeat events are reported on some platforms.
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Routes one message through [`update`] and carries out the returned action.
///
/// Feed ticks the feed no longer accepts are dropped here, before they can
/// reach the store.
pub fn dispatch(
    app: &mut App,
    feed: &mut UpdateFeed,
    tx: &mpsc::UnboundedSender<Message>,
    message: Message,
) {
    if let Message::Feed(tick) = message
        && !feed.accepts(tick)
    {
        debug!(epoch = tick.epoch, "dropping stale feed tick");
        return;
    }

    match update(app, message) {
        Some(Action::PauseFeed) => {
            feed.stop();
            app.feed_status = FeedStatus::Paused;
        }
        Some(Action::ResumeFeed) => {
            feed.start(tx.clone());
            app.feed_status = FeedStatus::Live;
        }
        None => {}
    }
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Feed(_) => {
            app.apply_tick();
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            app.commit_search_if_due(Instant::now());
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.focus = Focus::Table;
            return None;
        }
        _ => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => {
            handle_insert_mode(app, key);
            None
        }
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('/') => {
            app.focus = Focus::Search;
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char('f') => {
            app.filters_expanded = !app.filters_expanded;
            None
        }
        KeyCode::Char('m') => {
            app.filters_expanded = true;
            app.focus = Focus::MinPrice;
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char('M') => {
            app.filters_expanded = true;
            app.focus = Focus::MaxPrice;
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char(c @ '1'..='7') => {
            let index = (c as usize) - ('1' as usize);
            app.toggle_sort(SORT_BUTTONS[index]);
            None
        }
        KeyCode::Char('c') => {
            app.cycle_change_filter();
            None
        }
        KeyCode::Char('r') => {
            app.reset_filters();
            None
        }
        KeyCode::Char('p') => match app.feed_status {
            FeedStatus::Live => Some(Action::PauseFeed),
            FeedStatus::Paused => Some(Action::ResumeFeed),
        },
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            None
        }
        _ => None,
    }
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => submit_input(app),
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::MinPrice => Focus::MaxPrice,
                Focus::MaxPrice => Focus::MinPrice,
                other => other,
            };
        }
        _ => {
            let Some(input) = app.focused_input() else {
                return;
            };
            let edited = match key.code {
                KeyCode::Char(c) => {
                    input.insert(c);
                    true
                }
                KeyCode::Backspace => {
                    input.backspace();
                    true
                }
                KeyCode::Delete => {
                    input.delete();
                    true
                }
                KeyCode::Left => {
                    input.move_left();
                    false
                }
                KeyCode::Right => {
                    input.move_right();
                    false
                }
                KeyCode::Home => {
                    input.move_home();
                    false
                }
                KeyCode::End => {
                    input.move_end();
                    false
                }
                _ => false,
            };
            if edited && app.focus == Focus::Search {
                app.note_search_edit(Instant::now());
            }
        }
    }
}

/// Applies the focused input and returns to normal mode on success.
fn submit_input(app: &mut App) {
    let accepted = match app.focus {
        Focus::Search => {
            app.commit_search();
            true
        }
        Focus::MinPrice | Focus::MaxPrice => app.apply_price_range(),
        Focus::Table => true,
    };
    if accepted {
        app.mode = Mode::Normal;
        app.focus = Focus::Table;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::models::seed::seed_assets;
    use crate::simulation::PriceSimulator;
    use crate::store::{ChangeFilter, SortDirection, Store};

    fn app() -> App {
        let assets = seed_assets(&mut StdRng::seed_from_u64(1));
        App::new(Store::with_seed(assets, 2), PriceSimulator::seeded(3))
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        update(
            app,
            Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.search_input.as_str(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn number_keys_sort_and_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        let sort = app.store.current_sort().unwrap();
        assert_eq!(sort.field, "price");
        assert_eq!(sort.direction, SortDirection::Ascending);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(
            app.store.current_sort().unwrap().direction,
            SortDirection::Descending
        );

        press(&mut app, KeyCode::Char('7'));
        let sort = app.store.current_sort().unwrap();
        assert_eq!(sort.field, "volume24h");
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn enter_commits_search_immediately() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "eth");
        assert_eq!(app.store.current_filters().search_text, "");
        assert!(app.search_edited_at.is_some());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.current_filters().search_text, "eth");
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.focus, Focus::Table);
    }

    #[test]
    fn price_inputs_apply_on_enter() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m'));
        assert!(app.filters_expanded);
        type_text(&mut app, "150");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::MaxPrice);
        type_text(&mut app, "700");
        press(&mut app, KeyCode::Enter);

        let filters = app.store.current_filters();
        assert_eq!(filters.min_price, Some(150.0));
        assert_eq!(filters.max_price, Some(700.0));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn bad_price_keeps_insert_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('M'));
        type_text(&mut app, "1e");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Insert);
        assert_eq!(app.store.current_filters().max_price, None);
        assert!(app.error_message.is_some());
    }

    #[test]
    fn c_and_r_drive_filters() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            app.store.current_filters().change_filter,
            ChangeFilter::Negative
        );

        press(&mut app, KeyCode::Char('r'));
        assert!(!app.store.current_filters().is_active());
    }

    #[test]
    fn p_requests_pause_or_resume() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('p')), Some(Action::ResumeFeed));
        app.feed_status = FeedStatus::Live;
        assert_eq!(press(&mut app, KeyCode::Char('p')), Some(Action::PauseFeed));
    }

    #[test]
    fn f_toggles_filter_panel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert!(app.filters_expanded);
        press(&mut app, KeyCode::Char('f'));
        assert!(!app.filters_expanded);
    }

    #[tokio::test]
    async fn stale_ticks_never_reach_the_store() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut feed = UpdateFeed::new(Duration::from_secs(60));

        dispatch(&mut app, &mut feed, &tx, Message::Feed(FeedTick { epoch: 1 }));
        assert_eq!(app.update_count, 0);

        let resume = Message::Input(Event::Key(KeyEvent::new(
            KeyCode::Char('p'),
            KeyModifiers::NONE,
        )));
        dispatch(&mut app, &mut feed, &tx, resume);
        assert!(feed.is_running());
        assert_eq!(app.feed_status, FeedStatus::Live);

        dispatch(&mut app, &mut feed, &tx, Message::Feed(FeedTick { epoch: 1 }));
        assert_eq!(app.update_count, 1);

        let pause = Message::Input(Event::Key(KeyEvent::new(
            KeyCode::Char('p'),
            KeyModifiers::NONE,
        )));
        dispatch(&mut app, &mut feed, &tx, pause);
        assert!(!feed.is_running());

        let before = app.store.assets().to_vec();
        dispatch(&mut app, &mut feed, &tx, Message::Feed(FeedTick { epoch: 1 }));
        assert_eq!(app.update_count, 1);
        assert_eq!(app.store.assets(), before.as_slice());
    }
}
