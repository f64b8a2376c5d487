//! Terminal user interface for the market board.
//!
//! Ratatui front end over the [`Store`](crate::store::Store): a filter bar,
//! the asset table and a status line, driven by one message channel.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message, dispatch};
pub use terminal::{Tui, is_interactive, restore_terminal, setup_terminal};
pub use ui::render;
