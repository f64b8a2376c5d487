//! Filter configuration and the row predicate.

use crate::models::Asset;

/// Which side of the 24h change an asset must be on to stay visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChangeFilter {
    #[default]
    All,
    Positive,
    Negative,
}

impl ChangeFilter {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeFilter::All => "All",
            ChangeFilter::Positive => "Gainers",
            ChangeFilter::Negative => "Losers",
        }
    }

    /// Cycles All → Positive → Negative → All.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            ChangeFilter::All => ChangeFilter::Positive,
            ChangeFilter::Positive => ChangeFilter::Negative,
            ChangeFilter::Negative => ChangeFilter::All,
        }
    }

    fn admits(self, change_24h: f64) -> bool {
        match self {
            ChangeFilter::All => true,
            ChangeFilter::Positive => change_24h > 0.0,
            ChangeFilter::Negative => change_24h < 0.0,
        }
    }
}

/// Active filter state. The default admits every asset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterConfig {
    /// Case-insensitive substring matched against name and symbol.
    pub search_text: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub change_filter: ChangeFilter,
}

impl FilterConfig {
    /// Returns whether `asset` passes every active filter.
    pub fn matches(&self, asset: &Asset) -> bool {
        self.matches_search(asset)
            && self.min_price.is_none_or(|min| asset.price >= min)
            && self.max_price.is_none_or(|max| asset.price <= max)
            && self.change_filter.admits(asset.percent_change_24h)
    }

    /// Whether any filter differs from the default.
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    /// Overwrites the keys present in `patch` and keeps the rest.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search_text) = patch.search_text {
            self.search_text = search_text;
        }
        if let Some(min_price) = patch.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price {
            self.max_price = max_price;
        }
        if let Some(change_filter) = patch.change_filter {
            self.change_filter = change_filter;
        }
    }

    fn matches_search(&self, asset: &Asset) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        asset.name.to_lowercase().contains(&needle) || asset.symbol.to_lowercase().contains(&needle)
    }
}

/// A partial filter update. Unset keys leave the current value alone.
///
/// The price bounds are doubly optional: `None` keeps the bound,
/// `Some(None)` clears it, `Some(Some(x))` sets it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterPatch {
    pub search_text: Option<String>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub change_filter: Option<ChangeFilter>,
}

impl FilterPatch {
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn min_price(mut self, bound: Option<f64>) -> Self {
        self.min_price = Some(bound);
        self
    }

    #[must_use]
    pub fn max_price(mut self, bound: Option<f64>) -> Self {
        self.max_price = Some(bound);
        self
    }

    #[must_use]
    pub fn change(mut self, filter: ChangeFilter) -> Self {
        self.change_filter = Some(filter);
        self
    }
}
