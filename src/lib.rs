//! Terminal crypto market board with simulated live prices.
//!
//! A fixed set of assets lives in a [`store::Store`]. A background
//! [`feed::UpdateFeed`] fires on an interval and the
//! [`simulation::PriceSimulator`] turns each firing into a small random
//! move of one asset. The [`tui`] front end renders the filtered, sorted
//! view and lets the user search, filter, sort and pause the feed.

pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod models;
pub mod simulation;
pub mod store;
pub mod tui;

pub use error::{Result, TickerboardError};
