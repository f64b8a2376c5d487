//! Asset data model.
//!
//! [`Asset`] is the single record type shown on the board. [`PriceUpdate`]
//! is the payload the simulator hands to the store on every tick.

pub mod seed;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of points kept in every asset's price history.
pub const HISTORY_WINDOW: usize = 50;

/// One tradable instrument.
///
/// Field names serialize in camelCase so seed files use the same keys as
/// the dashboard they were written for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: u32,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,
    /// `None` means the supply is uncapped.
    #[serde(default)]
    pub max_supply: Option<f64>,
    /// Recent prices, oldest first.
    #[serde(default, alias = "sparklineData")]
    pub price_history: VecDeque<f64>,
}

impl Asset {
    /// Returns the most recent history point, falling back to the current price.
    #[must_use]
    pub fn last_history_point(&self) -> f64 {
        self.price_history.back().copied().unwrap_or(self.price)
    }

    /// Percentage move from the oldest to the newest history point.
    #[must_use]
    pub fn history_change_pct(&self) -> f64 {
        match (self.price_history.front(), self.price_history.back()) {
            (Some(&first), Some(&last)) if first != 0.0 => (last - first) / first * 100.0,
            _ => 0.0,
        }
    }

    /// Whether the history ended at or above where it started.
    #[must_use]
    pub fn history_trending_up(&self) -> bool {
        match (self.price_history.front(), self.price_history.back()) {
            (Some(first), Some(last)) => last >= first,
            _ => true,
        }
    }

    /// Drops the oldest history point and appends `point`.
    pub fn push_history(&mut self, point: f64) {
        while self.price_history.len() >= HISTORY_WINDOW {
            self.price_history.pop_front();
        }
        self.price_history.push_back(point);
    }

    /// Forces the history to exactly [`HISTORY_WINDOW`] points.
    ///
    /// Longer histories keep their most recent points. Shorter ones are
    /// padded at the front with their oldest point, or with the current
    /// price when empty.
    pub fn normalize_history(&mut self) {
        while self.price_history.len() > HISTORY_WINDOW {
            self.price_history.pop_front();
        }
        let pad = self.price_history.front().copied().unwrap_or(self.price);
        while self.price_history.len() < HISTORY_WINDOW {
            self.price_history.push_front(pad);
        }
    }
}

/// The fields a simulated tick changes on one asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceUpdate {
    pub id: u32,
    pub price: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub volume_24h: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_with_history(history: &[f64]) -> Asset {
        Asset {
            id: 1,
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            price: 100.0,
            percent_change_1h: 0.0,
            percent_change_24h: 0.0,
            percent_change_7d: 0.0,
            market_cap: 0.0,
            volume_24h: 0.0,
            circulating_supply: 0.0,
            max_supply: None,
            price_history: history.iter().copied().collect(),
        }
    }

    #[test]
    fn normalize_pads_short_history_at_front() {
        let mut asset = asset_with_history(&[5.0, 6.0]);
        asset.normalize_history();
        assert_eq!(asset.price_history.len(), HISTORY_WINDOW);
        assert_eq!(asset.price_history[0], 5.0);
        assert_eq!(asset.price_history[HISTORY_WINDOW - 2], 5.0);
        assert_eq!(asset.price_history[HISTORY_WINDOW - 1], 6.0);
    }

    #[test]
    fn normalize_empty_history_uses_price() {
        let mut asset = asset_with_history(&[]);
        asset.normalize_history();
        assert_eq!(asset.price_history.len(), HISTORY_WINDOW);
        assert!(asset.price_history.iter().all(|&p| p == 100.0));
    }

    #[test]
    fn normalize_trims_long_history_from_front() {
        let points: Vec<f64> = (0..60).map(f64::from).collect();
        let mut asset = asset_with_history(&points);
        asset.normalize_history();
        assert_eq!(asset.price_history.len(), HISTORY_WINDOW);
        assert_eq!(asset.price_history.front(), Some(&10.0));
        assert_eq!(asset.price_history.back(), Some(&59.0));
    }

    #[test]
    fn push_history_slides_window() {
        let points: Vec<f64> = (0..50).map(f64::from).collect();
        let mut asset = asset_with_history(&points);
        asset.push_history(99.0);
        assert_eq!(asset.price_history.len(), HISTORY_WINDOW);
        assert_eq!(asset.price_history.front(), Some(&1.0));
        assert_eq!(asset.price_history.back(), Some(&99.0));
    }

    #[test]
    fn history_change() {
        let asset = asset_with_history(&[100.0, 90.0, 110.0]);
        assert!((asset.history_change_pct() - 10.0).abs() < 1e-9);
        assert!(asset.history_trending_up());

        let flat = asset_with_history(&[0.0, 5.0]);
        assert_eq!(flat.history_change_pct(), 0.0);
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let json = r#"{
            "id": 2,
            "name": "Ethereum",
            "symbol": "ETH",
            "price": 1802.46,
            "percentChange1h": 0.6,
            "percentChange24h": 3.21,
            "percentChange7d": 13.68,
            "marketCap": 217581279327,
            "volume24h": 23547469307,
            "circulatingSupply": 120.71,
            "maxSupply": null
        }"#;

        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.symbol, "ETH");
        assert_eq!(asset.percent_change_24h, 3.21);
        assert_eq!(asset.max_supply, None);
        assert!(asset.price_history.is_empty());
    }
}
