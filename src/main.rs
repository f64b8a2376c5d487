use std::fs::OpenOptions;
use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{info, warn};

use tickerboard::TickerboardError;
use tickerboard::config::{AppConfig, fetch_config};
use tickerboard::feed::{FeedTick, UpdateFeed};
use tickerboard::format::{format_currency, format_percentage, format_supply};
use tickerboard::models::Asset;
use tickerboard::models::seed::{load_seed_file, seed_assets};
use tickerboard::simulation::PriceSimulator;
use tickerboard::store::Store;
use tickerboard::tui::components::asset_table::EMPTY_MESSAGE;
use tickerboard::tui::event::{spawn_event_reader, spawn_tick_timer};
use tickerboard::tui::{self, App, Message};

/// Redraw and housekeeping interval of the TUI.
const UI_TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<(), TickerboardError> {
    let app_config = fetch_config()?;
    let interactive = tui::is_interactive();
    init_logging(&app_config, interactive)?;

    let assets = load_assets(&app_config)?;
    let (store, simulator) = match app_config.feed.rng_seed {
        Some(seed) => (
            Store::with_seed(assets, seed),
            PriceSimulator::seeded(seed.wrapping_add(1)),
        ),
        None => (Store::new(assets), PriceSimulator::new()),
    };
    info!(assets = store.assets().len(), interactive, "board ready");

    if interactive {
        run_tui(App::new(store, simulator), &app_config).await
    } else {
        run_headless(store, simulator, &app_config).await
    }
}

/// Installs the fmt subscriber. The TUI owns the terminal, so in
/// interactive mode logs go to the configured file or nowhere.
fn init_logging(app_config: &AppConfig, interactive: bool) -> Result<(), TickerboardError> {
    let level = app_config.logging.level;

    match (&app_config.logging.file, interactive) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    TickerboardError::Io(format!("failed to open log file {}: {e}", path.display()))
                })?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, false) => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
        (None, true) => {}
    }
    Ok(())
}

fn load_assets(app_config: &AppConfig) -> Result<Vec<Asset>, TickerboardError> {
    match &app_config.seed_file {
        Some(path) => {
            let assets = load_seed_file(path)?;
            info!(path = %path.display(), count = assets.len(), "loaded seed file");
            Ok(assets)
        }
        None => {
            let mut rng = match app_config.feed.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            Ok(seed_assets(&mut rng))
        }
    }
}

async fn run_tui(mut app: App, app_config: &AppConfig) -> Result<(), TickerboardError> {
    let mut terminal = tui::setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app, app_config).await;

    // Restore even when the loop failed, then report the loop's error first.
    let restored = tui::restore_terminal(&mut terminal);
    result.and(restored)
}

async fn event_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    app_config: &AppConfig,
) -> Result<(), TickerboardError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), UI_TICK_MS);

    let mut feed = UpdateFeed::new(app_config.feed.tick_interval);
    feed.start(tx.clone());
    app.feed_status = tui::app::FeedStatus::Live;

    while !app.should_quit {
        terminal
            .draw(|frame| tui::render(frame, app))
            .map_err(|e| TickerboardError::Io(format!("failed to draw frame: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        tui::dispatch(app, &mut feed, &tx, message);

        // Drain whatever queued up while drawing before the next frame.
        while let Ok(message) = rx.try_recv() {
            tui::dispatch(app, &mut feed, &tx, message);
        }
    }

    feed.stop();
    Ok(())
}

/// Runs the feed for a fixed number of ticks and prints the final view.
async fn run_headless(
    mut store: Store,
    mut simulator: PriceSimulator,
    app_config: &AppConfig,
) -> Result<(), TickerboardError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FeedTick>();
    let mut feed = UpdateFeed::new(app_config.feed.tick_interval);
    feed.start(tx);

    let mut applied = 0;
    while applied < app_config.headless_ticks {
        let Some(tick) = rx.recv().await else {
            warn!("feed ended early");
            break;
        };
        if !feed.accepts(tick) {
            continue;
        }
        applied += 1;
        if let Some(update) = simulator.tick(&mut store)
            && let Some(asset) = store.asset(update.id)
        {
            info!(
                tick = applied,
                symbol = %asset.symbol,
                price = %format_currency(update.price),
                change_24h = %format_percentage(update.percent_change_24h),
                "applied update"
            );
        }
    }
    feed.stop();

    let view = store.select_view();
    if view.is_empty() {
        println!("{EMPTY_MESSAGE}");
    }
    for asset in view {
        println!("{}", plain_row(asset));
    }
    Ok(())
}

fn plain_row(asset: &Asset) -> String {
    format!(
        "{:>2}  {:<10} {:<5} {:>14} {:>8} {:>8} {:>8} {:>12} {:>12}  {}",
        asset.id,
        asset.name,
        asset.symbol,
        format_currency(asset.price),
        format_percentage(asset.percent_change_1h),
        format_percentage(asset.percent_change_24h),
        format_percentage(asset.percent_change_7d),
        format_currency(asset.market_cap),
        format_currency(asset.volume_24h),
        format_supply(asset.circulating_supply, &asset.symbol),
    )
}
