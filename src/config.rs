//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `TICKERBOARD_TICK_MS`: feed interval in milliseconds (default 1500)
//! - `TICKERBOARD_RNG_SEED`: fixed seed for reproducible runs
//! - `TICKERBOARD_SEED_FILE`: JSON array of assets replacing the built-in set
//! - `TICKERBOARD_LOG_FILE`: where logs go while the TUI owns the terminal
//! - `TICKERBOARD_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error`
//! - `TICKERBOARD_HEADLESS_TICKS`: ticks to run when stdout is not a TTY

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::Level;

/// Default feed interval.
const DEFAULT_TICK_MS: u64 = 1500;

/// Default number of ticks in headless mode.
const DEFAULT_HEADLESS_TICKS: u32 = 20;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub logging: LogConfig,
    /// Replaces the built-in seed assets when set.
    pub seed_file: Option<PathBuf>,
    /// Number of feed ticks to run in headless mode.
    pub headless_ticks: u32,
}

/// Simulated feed configuration.
#[derive(Debug)]
pub struct FeedConfig {
    pub tick_interval: Duration,
    pub rng_seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub level: Level,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`TickerboardError::Config`](crate::TickerboardError::Config) if
/// a variable is set but cannot be parsed, or if the tick interval is zero.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let tick_ms: u64 = parse_var("TICKERBOARD_TICK_MS")?.unwrap_or(DEFAULT_TICK_MS);
    if tick_ms == 0 {
        return Err(crate::TickerboardError::Config(
            "TICKERBOARD_TICK_MS must be greater than zero".to_string(),
        ));
    }

    let rng_seed = parse_var("TICKERBOARD_RNG_SEED")?;
    let level = parse_var("TICKERBOARD_LOG_LEVEL")?.unwrap_or(Level::INFO);
    let headless_ticks =
        parse_var("TICKERBOARD_HEADLESS_TICKS")?.unwrap_or(DEFAULT_HEADLESS_TICKS);

    Ok(AppConfig {
        feed: FeedConfig {
            tick_interval: Duration::from_millis(tick_ms),
            rng_seed,
        },
        logging: LogConfig {
            file: non_empty_var("TICKERBOARD_LOG_FILE").map(PathBuf::from),
            level,
        },
        seed_file: non_empty_var("TICKERBOARD_SEED_FILE").map(PathBuf::from),
        headless_ticks,
    })
}

/// Parses an environment variable if it is set and non-empty.
fn parse_var<T>(name: &str) -> crate::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    non_empty_var(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                crate::TickerboardError::Config(format!("invalid {name} value {raw:?}: {e}"))
            })
        })
        .transpose()
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Serializes env mutation across the tests in this module.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 6] = [
        "TICKERBOARD_TICK_MS",
        "TICKERBOARD_RNG_SEED",
        "TICKERBOARD_SEED_FILE",
        "TICKERBOARD_LOG_FILE",
        "TICKERBOARD_LOG_LEVEL",
        "TICKERBOARD_HEADLESS_TICKS",
    ];

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// Variables not listed in `vars` are cleared for the duration of `f`.
    ///
    /// # Safety
    ///
    /// Holds `ENV_LOCK` while the variables are modified. Nothing outside this
    /// module reads them.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> = ALL_VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        for k in ALL_VARS {
            let value = vars.iter().find(|(name, _)| *name == k).and_then(|(_, v)| *v);
            // SAFETY: ENV_LOCK is held and no other code reads these vars.
            unsafe {
                match value {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values, same single-threaded context.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.feed.tick_interval, Duration::from_millis(1500));
            assert!(config.feed.rng_seed.is_none());
            assert!(config.seed_file.is_none());
            assert!(config.logging.file.is_none());
            assert_eq!(config.logging.level, Level::INFO);
            assert_eq!(config.headless_ticks, DEFAULT_HEADLESS_TICKS);
        });
    }

    #[test]
    fn loads_values_from_env() {
        with_env(
            &[
                ("TICKERBOARD_TICK_MS", Some("250")),
                ("TICKERBOARD_RNG_SEED", Some("42")),
                ("TICKERBOARD_SEED_FILE", Some("/tmp/assets.json")),
                ("TICKERBOARD_LOG_FILE", Some("/tmp/tickerboard.log")),
                ("TICKERBOARD_LOG_LEVEL", Some("debug")),
                ("TICKERBOARD_HEADLESS_TICKS", Some("3")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.feed.tick_interval, Duration::from_millis(250));
                assert_eq!(config.feed.rng_seed, Some(42));
                assert_eq!(config.seed_file, Some(PathBuf::from("/tmp/assets.json")));
                assert_eq!(
                    config.logging.file,
                    Some(PathBuf::from("/tmp/tickerboard.log"))
                );
                assert_eq!(config.logging.level, Level::DEBUG);
                assert_eq!(config.headless_ticks, 3);
            },
        );
    }

    #[test]
    fn rejects_non_numeric_tick() {
        with_env(&[("TICKERBOARD_TICK_MS", Some("fast"))], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("TICKERBOARD_TICK_MS"));
        });
    }

    #[test]
    fn rejects_zero_tick() {
        with_env(&[("TICKERBOARD_TICK_MS", Some("0"))], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("greater than zero"));
        });
    }

    #[test]
    fn rejects_unknown_log_level() {
        with_env(&[("TICKERBOARD_LOG_LEVEL", Some("loud"))], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("TICKERBOARD_LOG_LEVEL"));
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("TICKERBOARD_TICK_MS", Some("")),
                ("TICKERBOARD_RNG_SEED", Some("")),
                ("TICKERBOARD_LOG_FILE", Some("")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.feed.tick_interval, Duration::from_millis(1500));
                assert!(config.feed.rng_seed.is_none());
                assert!(config.logging.file.is_none());
            },
        );
    }
}
