//! The single state container behind the board.
//!
//! [`Store`] owns the asset list together with the active sort and filter
//! configuration. All writes go through its methods. [`Store::select_view`]
//! derives the filtered, sorted rows without touching stored data.
//!
//! The store is not shared across threads: the event loop owns it and
//! applies every mutation in turn, so no locking is involved.

pub mod filter;
pub mod sort;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::models::{Asset, PriceUpdate};
use crate::simulation::next_history_point;

pub use filter::{ChangeFilter, FilterConfig, FilterPatch};
pub use sort::{SortConfig, SortDirection, SortField};

/// Asset list plus view configuration.
pub struct Store {
    assets: Vec<Asset>,
    sort: Option<SortConfig>,
    /// `sort.field` resolved once in [`Store::set_sort`].
    sort_field: Option<SortField>,
    filters: FilterConfig,
    /// Drives the noise in derived history points.
    rng: StdRng,
}

impl Store {
    /// Creates a store with default configs and an OS-seeded random source.
    pub fn new(assets: Vec<Asset>) -> Self {
        Self::with_rng(assets, StdRng::from_os_rng())
    }

    /// Creates a store whose history noise is determined by `seed`.
    pub fn with_seed(assets: Vec<Asset>, seed: u64) -> Self {
        Self::with_rng(assets, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut assets: Vec<Asset>, rng: StdRng) -> Self {
        assets.iter_mut().for_each(Asset::normalize_history);
        Self {
            assets,
            sort: None,
            sort_field: None,
            filters: FilterConfig::default(),
            rng,
        }
    }

    // -- Reads --

    /// All assets in insertion order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Looks up an asset by id.
    pub fn asset(&self, id: u32) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn current_sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// The typed field the active sort resolved to, if it resolved.
    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_field
    }

    pub fn current_filters(&self) -> &FilterConfig {
        &self.filters
    }

    /// Filters, then sorts, the asset list.
    ///
    /// Sorting is stable. With no sort, or a sort on a field that did not
    /// resolve, rows come back in insertion order.
    pub fn select_view(&self) -> Vec<&Asset> {
        let mut view: Vec<&Asset> = self
            .assets
            .iter()
            .filter(|asset| self.filters.matches(asset))
            .collect();

        if let (Some(field), Some(config)) = (self.sort_field, &self.sort) {
            sort::sort_assets(&mut view, field, config.direction);
        }

        view
    }

    // -- Writes --

    /// Replaces the whole asset list. Histories are normalized to the window size.
    pub fn replace_all(&mut self, mut assets: Vec<Asset>) {
        assets.iter_mut().for_each(Asset::normalize_history);
        self.assets = assets;
    }

    /// Applies one simulated tick to the asset with the matching id.
    ///
    /// Replaces price, 1h change, 24h change and volume, then slides the
    /// history window by one derived point. Returns `false` without
    /// changing anything when no asset has that id.
    pub fn apply_price_update(&mut self, update: &PriceUpdate) -> bool {
        let Some(asset) = self.assets.iter_mut().find(|a| a.id == update.id) else {
            debug!(id = update.id, "price update for unknown asset ignored");
            return false;
        };

        let point = next_history_point(&mut self.rng, update.price, asset.last_history_point());

        asset.price = update.price;
        asset.percent_change_1h = update.percent_change_1h;
        asset.percent_change_24h = update.percent_change_24h;
        asset.volume_24h = update.volume_24h;
        asset.push_history(point);
        true
    }

    /// Replaces the sort configuration.
    ///
    /// Any field name is accepted. One that does not name a sortable field
    /// is stored as given and leaves the view unsorted.
    pub fn set_sort(&mut self, config: SortConfig) {
        self.sort_field = SortField::from_key(&config.field);
        if self.sort_field.is_none() {
            debug!(field = %config.field, "sort field not recognized, view stays unsorted");
        }
        self.sort = Some(config);
    }

    /// Returns the view to insertion order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.sort_field = None;
    }

    /// Merges `patch` into the filter configuration.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.merge(patch);
    }

    /// Restores the default filter configuration.
    pub fn reset_filters(&mut self) {
        self.filters = FilterConfig::default();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::models::HISTORY_WINDOW;

    fn asset(id: u32, name: &str, price: f64, change_24h: f64) -> Asset {
        Asset {
            id,
            name: name.to_string(),
            symbol: name[..3].to_uppercase(),
            price,
            percent_change_1h: 0.5,
            percent_change_24h: change_24h,
            percent_change_7d: 2.0,
            market_cap: 1_000.0,
            volume_24h: 500.0,
            circulating_supply: 10.0,
            max_supply: Some(21.0),
            price_history: VecDeque::from(vec![price; HISTORY_WINDOW]),
        }
    }

    fn store() -> Store {
        Store::with_seed(
            vec![
                asset(1, "Bitcoin", 100.0, 5.0),
                asset(2, "Ethereum", 50.0, -3.0),
                asset(3, "Solana", 75.0, 0.0),
            ],
            42,
        )
    }

    fn view_ids(store: &Store) -> Vec<u32> {
        store.select_view().iter().map(|a| a.id).collect()
    }

    #[test]
    fn new_store_uses_default_configs() {
        let store = store();
        assert!(store.current_sort().is_none());
        assert_eq!(store.current_filters(), &FilterConfig::default());
        assert_eq!(view_ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn construction_normalizes_histories() {
        let mut short = asset(1, "Bitcoin", 100.0, 1.0);
        short.price_history = VecDeque::from(vec![1.0, 2.0]);
        let store = Store::with_seed(vec![short], 0);
        assert_eq!(store.assets()[0].price_history.len(), HISTORY_WINDOW);
    }

    #[test]
    fn price_update_replaces_only_live_fields() {
        let mut store = store();
        let before = store.asset(2).unwrap().clone();

        let applied = store.apply_price_update(&PriceUpdate {
            id: 2,
            price: 51.0,
            percent_change_1h: 0.7,
            percent_change_24h: -2.5,
            volume_24h: 520.0,
        });
        assert!(applied);

        let after = store.asset(2).unwrap();
        assert_eq!(after.price, 51.0);
        assert_eq!(after.percent_change_1h, 0.7);
        assert_eq!(after.percent_change_24h, -2.5);
        assert_eq!(after.volume_24h, 520.0);
        assert_eq!(after.percent_change_7d, before.percent_change_7d);
        assert_eq!(after.market_cap, before.market_cap);
        assert_eq!(after.circulating_supply, before.circulating_supply);
        assert_eq!(after.max_supply, before.max_supply);
        assert_eq!(after.name, before.name);
        assert_eq!(after.symbol, before.symbol);
        assert_eq!(after.price_history.len(), HISTORY_WINDOW);
        assert_eq!(
            after.price_history.iter().take(HISTORY_WINDOW - 1).collect::<Vec<_>>(),
            before.price_history.iter().skip(1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let mut store = store();
        let before = store.assets().to_vec();

        let applied = store.apply_price_update(&PriceUpdate {
            id: 99,
            price: 1.0,
            percent_change_1h: 0.0,
            percent_change_24h: 0.0,
            volume_24h: 0.0,
        });

        assert!(!applied);
        assert_eq!(store.assets(), before.as_slice());
    }

    #[test]
    fn unknown_sort_field_is_stored_but_ignored() {
        let mut store = store();
        store.set_sort(SortConfig::descending("logo"));

        assert_eq!(store.current_sort().map(|s| s.field.as_str()), Some("logo"));
        assert_eq!(store.sort_field(), None);
        assert_eq!(view_ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn sort_then_clear() {
        let mut store = store();
        store.set_sort(SortConfig::ascending("price"));
        assert_eq!(view_ids(&store), vec![2, 3, 1]);

        store.set_sort(SortConfig::descending("price"));
        assert_eq!(view_ids(&store), vec![1, 3, 2]);

        store.clear_sort();
        assert_eq!(view_ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn filters_apply_before_sort() {
        let mut store = store();
        store.set_filters(FilterPatch::default().min_price(Some(60.0)));
        store.set_sort(SortConfig::ascending("price"));
        assert_eq!(view_ids(&store), vec![3, 1]);
    }

    #[test]
    fn set_filters_merges() {
        let mut store = store();
        store.set_filters(FilterPatch::default().search("o"));
        store.set_filters(FilterPatch::default().change(ChangeFilter::Positive));

        let filters = store.current_filters();
        assert_eq!(filters.search_text, "o");
        assert_eq!(filters.change_filter, ChangeFilter::Positive);
        assert_eq!(view_ids(&store), vec![1]);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut store = store();
        store.set_filters(
            FilterPatch::default()
                .search("zzz")
                .min_price(Some(1.0))
                .max_price(Some(2.0))
                .change(ChangeFilter::Negative),
        );
        assert!(view_ids(&store).is_empty());

        store.reset_filters();
        assert_eq!(store.current_filters(), &FilterConfig::default());
        assert_eq!(view_ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn replace_all_swaps_assets() {
        let mut store = store();
        store.replace_all(vec![asset(7, "Cardano", 0.7, 1.0)]);
        assert_eq!(view_ids(&store), vec![7]);
        assert!(store.asset(1).is_none());
    }

    #[test]
    fn select_view_does_not_mutate() {
        let mut store = store();
        store.set_sort(SortConfig::descending("percentChange24h"));
        let before = store.assets().to_vec();
        let _ = store.select_view();
        assert_eq!(store.assets(), before.as_slice());
    }
}
