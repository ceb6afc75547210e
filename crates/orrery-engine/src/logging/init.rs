use std::sync::Once;

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter in `env_logger` syntax, e.g. "info" or
    /// "orrery_engine=debug". `None` defers to `RUST_LOG`.
    pub env_filter: Option<String>,
    /// ANSI coloring.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Config with an explicit filter, overriding `RUST_LOG`.
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    fn resolved_filter(&self) -> Option<String> {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Call before the first frame is scheduled;
/// later calls are ignored.
///
/// Without an explicit filter or `RUST_LOG`, info-level and up is shown.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolved_filter() {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}
