//! Starting asset set and history generation.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use rand::Rng;

use super::{Asset, HISTORY_WINDOW};
use crate::simulation::round2;

/// Static fields of one built-in asset plus the shape of its generated history.
struct SeedAsset {
    name: &'static str,
    symbol: &'static str,
    price: f64,
    change_1h: f64,
    change_24h: f64,
    change_7d: f64,
    market_cap: f64,
    volume_24h: f64,
    circulating_supply: f64,
    max_supply: Option<f64>,
    history_base: f64,
    volatility: f64,
}

const SEED_ASSETS: [SeedAsset; 6] = [
    SeedAsset {
        name: "Bitcoin",
        symbol: "BTC",
        price: 93_759.48,
        change_1h: 0.43,
        change_24h: 0.93,
        change_7d: 11.11,
        market_cap: 1_861_618_902_186.0,
        volume_24h: 43_874_950_947.0,
        circulating_supply: 19.85,
        max_supply: Some(21.0),
        history_base: 90_000.0,
        volatility: 0.05,
    },
    SeedAsset {
        name: "Ethereum",
        symbol: "ETH",
        price: 1_802.46,
        change_1h: 0.60,
        change_24h: 3.21,
        change_7d: 13.68,
        market_cap: 217_581_279_327.0,
        volume_24h: 23_547_469_307.0,
        circulating_supply: 120.71,
        max_supply: None,
        history_base: 1_750.0,
        volatility: 0.07,
    },
    SeedAsset {
        name: "Tether",
        symbol: "USDT",
        price: 1.00,
        change_1h: 0.00,
        change_24h: 0.00,
        change_7d: 0.04,
        market_cap: 145_320_022_085.0,
        volume_24h: 92_288_882_007.0,
        circulating_supply: 145.27,
        max_supply: None,
        history_base: 1.00,
        volatility: 0.003,
    },
    SeedAsset {
        name: "XRP",
        symbol: "XRP",
        price: 2.22,
        change_1h: 0.46,
        change_24h: 0.54,
        change_7d: 6.18,
        market_cap: 130_073_814_966.0,
        volume_24h: 5_131_481_491.0,
        circulating_supply: 58.39,
        max_supply: Some(100.0),
        history_base: 2.15,
        volatility: 0.08,
    },
    SeedAsset {
        name: "BNB",
        symbol: "BNB",
        price: 606.65,
        change_1h: 0.09,
        change_24h: -1.20,
        change_7d: 3.73,
        market_cap: 85_471_956_947.0,
        volume_24h: 1_874_281_784.0,
        circulating_supply: 140.89,
        max_supply: Some(200.0),
        history_base: 590.0,
        volatility: 0.06,
    },
    SeedAsset {
        name: "Solana",
        symbol: "SOL",
        price: 151.51,
        change_1h: 0.53,
        change_24h: 1.26,
        change_7d: 14.74,
        market_cap: 78_381_958_631.0,
        volume_24h: 4_881_674_486.0,
        circulating_supply: 517.31,
        max_supply: None,
        history_base: 140.0,
        volatility: 0.09,
    },
];

/// Builds the six built-in assets with freshly generated price histories.
///
/// Ids are assigned 1..=6 in table order.
pub fn seed_assets<R: Rng>(rng: &mut R) -> Vec<Asset> {
    SEED_ASSETS
        .iter()
        .zip(1u32..)
        .map(|(seed, id)| Asset {
            id,
            name: seed.name.to_string(),
            symbol: seed.symbol.to_string(),
            price: seed.price,
            percent_change_1h: seed.change_1h,
            percent_change_24h: seed.change_24h,
            percent_change_7d: seed.change_7d,
            market_cap: seed.market_cap,
            volume_24h: seed.volume_24h,
            circulating_supply: seed.circulating_supply,
            max_supply: seed.max_supply,
            price_history: generate_history(
                &mut *rng,
                seed.history_base,
                seed.volatility,
                HISTORY_WINDOW,
            ),
        })
        .collect()
}

/// Generates a plausible price path around `base`.
///
/// Each step mixes uniform noise of `volatility` with a slow sine trend and
/// never drops below 70% of `base`.
pub fn generate_history<R: Rng>(
    rng: &mut R,
    base: f64,
    volatility: f64,
    points: usize,
) -> VecDeque<f64> {
    let floor = base * 0.7;
    let mut current = base;
    let mut history = VecDeque::with_capacity(points);

    for i in 0..points {
        let trend = (i as f64 / 10.0).sin() * volatility * 0.5;
        let noise = rng.random_range(-1.0..=1.0) * volatility;
        current = (current + (noise + trend) * base).max(floor);
        history.push_back(round2(current));
    }

    history
}

/// Loads an asset list from a JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the assets
/// fail [`validate_assets`].
pub fn load_seed_file(path: &Path) -> crate::Result<Vec<Asset>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        crate::TickerboardError::Io(format!("failed to read {}: {e}", path.display()))
    })?;
    let assets: Vec<Asset> = serde_json::from_str(&contents)?;
    validate_assets(&assets)?;
    Ok(assets)
}

/// Checks the invariants the store relies on.
///
/// Ids must be unique and prices positive. Market cap, volume and
/// circulating supply must not be negative.
///
/// # Errors
///
/// Returns [`TickerboardError::InvalidSeed`](crate::TickerboardError::InvalidSeed)
/// naming the first offending asset.
pub fn validate_assets(assets: &[Asset]) -> crate::Result<()> {
    let mut seen = HashSet::with_capacity(assets.len());
    for asset in assets {
        let invalid = |reason: &str| {
            crate::TickerboardError::InvalidSeed(format!(
                "asset {} ({}): {reason}",
                asset.id, asset.symbol
            ))
        };

        if !seen.insert(asset.id) {
            return Err(invalid("duplicate id"));
        }
        if !(asset.price.is_finite() && asset.price > 0.0) {
            return Err(invalid("price must be positive"));
        }
        for (name, value) in [
            ("marketCap", asset.market_cap),
            ("volume24h", asset.volume_24h),
            ("circulatingSupply", asset.circulating_supply),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(&format!("{name} must not be negative")));
            }
        }
    }
    Ok(())
}
