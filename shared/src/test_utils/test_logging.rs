use env_logger::Builder;
use log::LevelFilter;
use std::str::FromStr;
use std::sync::Once;

static INIT: Once = Once::new();

/// Installs an `env_logger` for tests, once per process.
///
/// `tracing` is built with its `log` feature, so events from the store and handlers reach this
/// logger as well. Output is quiet (errors only) unless `LOG_LEVEL` names another level.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let level_filter = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| LevelFilter::from_str(&level).ok())
            .unwrap_or(LevelFilter::Error);

        // try_init: another harness may already own the global logger
        let _ = Builder::from_default_env()
            .filter_level(level_filter)
            .is_test(true)
            .try_init();
    });
}
