//! Shared test utilities.
#![allow(dead_code)]

use std::collections::VecDeque;

use tickerboard::models::{Asset, HISTORY_WINDOW};
use tickerboard::store::Store;

/// Builds an asset with only the fields the store contract cares about set.
pub fn asset(id: u32, price: f64, change_24h: f64) -> Asset {
    Asset {
        id,
        name: format!("Coin {id}"),
        symbol: format!("C{id}"),
        price,
        percent_change_1h: 0.1,
        percent_change_24h: change_24h,
        percent_change_7d: 1.0,
        market_cap: price * 1_000.0,
        volume_24h: price * 10.0,
        circulating_supply: 1_000.0,
        max_supply: None,
        price_history: VecDeque::from(vec![price; HISTORY_WINDOW]),
    }
}

/// The two-asset store used by the documented store scenarios.
pub fn scenario_store() -> Store {
    Store::with_seed(vec![asset(1, 100.0, 5.0), asset(2, 50.0, -3.0)], 7)
}

pub fn view_ids(store: &Store) -> Vec<u32> {
    store.select_view().iter().map(|a| a.id).collect()
}
