//! Price simulator that makes the board look live.
//!
//! Every tick the simulator picks one asset at random, nudges its price,
//! short-term changes and volume, and hands the result to the store as a
//! [`PriceUpdate`]. The store derives the matching history point with
//! [`next_history_point`]. The 7-day change, market cap and supply are
//! never touched.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::models::PriceUpdate;
use crate::store::Store;

/// Largest relative price move per tick (±1.5%).
const PRICE_JITTER: f64 = 0.015;

/// Largest additive move of the 1h change per tick, in percentage points.
const CHANGE_1H_JITTER: f64 = 0.2;

/// Largest additive move of the 24h change per tick, in percentage points.
const CHANGE_24H_JITTER: f64 = 0.3;

/// Largest relative volume move per tick (±2.5%).
const VOLUME_JITTER: f64 = 0.025;

/// History noise as a fraction of the new price.
const HISTORY_NOISE: f64 = 0.01;

/// History trend nudge as a fraction of the new price.
const HISTORY_TREND: f64 = 0.004;

/// Generates random price updates against a [`Store`].
pub struct PriceSimulator<R = StdRng> {
    rng: R,
}

impl PriceSimulator<StdRng> {
    /// Creates a simulator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a simulator whose sequence of updates is fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PriceSimulator<R> {
    /// Creates a simulator drawing from the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Derives the next update for one randomly chosen asset.
    ///
    /// Returns `None` when the store holds no assets.
    pub fn next_update(&mut self, store: &Store) -> Option<PriceUpdate> {
        let asset = store.assets().choose(&mut self.rng)?;

        let price = asset.price * (1.0 + self.jitter(PRICE_JITTER));
        let percent_change_1h = round2(asset.percent_change_1h + self.jitter(CHANGE_1H_JITTER));
        let percent_change_24h =
            round2(asset.percent_change_24h + self.jitter(CHANGE_24H_JITTER));
        let volume_24h = (asset.volume_24h * (1.0 + self.jitter(VOLUME_JITTER))).round();

        Some(PriceUpdate {
            id: asset.id,
            price,
            percent_change_1h,
            percent_change_24h,
            volume_24h,
        })
    }

    /// Derives an update and applies it to the store.
    ///
    /// Returns the update that was applied, or `None` when the store is empty.
    pub fn tick(&mut self, store: &mut Store) -> Option<PriceUpdate> {
        let update = self.next_update(store)?;
        store.apply_price_update(&update);
        Some(update)
    }

    /// Uniform sample in `[-magnitude, magnitude]`.
    fn jitter(&mut self, magnitude: f64) -> f64 {
        self.rng.random_range(-magnitude..=magnitude)
    }
}

impl Default for PriceSimulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the history point recorded alongside a new price.
///
/// The point is the new price plus up to ±1% noise, nudged 0.4% up when the
/// price rose above the previous point and 0.4% down otherwise, rounded to
/// cents.
pub fn next_history_point<R: Rng>(rng: &mut R, price: f64, last_point: f64) -> f64 {
    let noise = rng.random_range(-1.0..=1.0) * price * HISTORY_NOISE;
    let trend = if price > last_point {
        HISTORY_TREND
    } else {
        -HISTORY_TREND
    } * price;
    round2(price + noise + trend)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
