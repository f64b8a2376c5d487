//! Reusable rendering pieces of the board.

pub mod asset_table;
pub mod filter_bar;
pub mod header;
pub mod status_bar;
