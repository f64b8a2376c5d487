//! Sort configuration and typed field accessors.
//!
//! Callers name sort fields by string (the camelCase keys of [`Asset`]).
//! The store resolves the name once into a [`SortField`] and compares
//! through it, so an unknown name simply leaves the view unsorted.

use std::cmp::Ordering;

use crate::models::Asset;

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the active sort field.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Requested sort: a field name plus a direction.
///
/// The field is kept as given. Names that [`SortField`] does not know are
/// accepted and leave the view in filtered order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Asset fields the view can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Name,
    Symbol,
    Price,
    PercentChange1h,
    PercentChange24h,
    PercentChange7d,
    MarketCap,
    Volume24h,
    CirculatingSupply,
    MaxSupply,
}

impl SortField {
    /// Every sortable field, in column order.
    pub const ALL: [SortField; 11] = [
        SortField::Id,
        SortField::Name,
        SortField::Symbol,
        SortField::Price,
        SortField::PercentChange1h,
        SortField::PercentChange24h,
        SortField::PercentChange7d,
        SortField::MarketCap,
        SortField::Volume24h,
        SortField::CirculatingSupply,
        SortField::MaxSupply,
    ];

    /// Wire name, matching the serialized [`Asset`] key.
    pub fn key(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Symbol => "symbol",
            SortField::Price => "price",
            SortField::PercentChange1h => "percentChange1h",
            SortField::PercentChange24h => "percentChange24h",
            SortField::PercentChange7d => "percentChange7d",
            SortField::MarketCap => "marketCap",
            SortField::Volume24h => "volume24h",
            SortField::CirculatingSupply => "circulatingSupply",
            SortField::MaxSupply => "maxSupply",
        }
    }

    /// Column label.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Id => "#",
            SortField::Name => "Name",
            SortField::Symbol => "Symbol",
            SortField::Price => "Price",
            SortField::PercentChange1h => "1h %",
            SortField::PercentChange24h => "24h %",
            SortField::PercentChange7d => "7d %",
            SortField::MarketCap => "Market Cap",
            SortField::Volume24h => "Volume(24h)",
            SortField::CirculatingSupply => "Circulating Supply",
            SortField::MaxSupply => "Max Supply",
        }
    }

    /// Resolves a wire name. Unknown names return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Compares two assets by this field in ascending order.
    ///
    /// Numbers that cannot be ordered (NaN) compare equal. A missing max
    /// supply sorts before any value.
    pub fn compare(&self, a: &Asset, b: &Asset) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Symbol => a.symbol.cmp(&b.symbol),
            SortField::Price => cmp_f64(a.price, b.price),
            SortField::PercentChange1h => cmp_f64(a.percent_change_1h, b.percent_change_1h),
            SortField::PercentChange24h => cmp_f64(a.percent_change_24h, b.percent_change_24h),
            SortField::PercentChange7d => cmp_f64(a.percent_change_7d, b.percent_change_7d),
            SortField::MarketCap => cmp_f64(a.market_cap, b.market_cap),
            SortField::Volume24h => cmp_f64(a.volume_24h, b.volume_24h),
            SortField::CirculatingSupply => cmp_f64(a.circulating_supply, b.circulating_supply),
            SortField::MaxSupply => match (a.max_supply, b.max_supply) {
                (Some(x), Some(y)) => cmp_f64(x, y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable sort of `assets` by `field` in `direction`.
///
/// Descending reverses the comparison rather than the output, so ties keep
/// their incoming order either way.
pub fn sort_assets(assets: &mut [&Asset], field: SortField, direction: SortDirection) {
    assets.sort_by(|a, b| {
        let ordering = field.compare(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
