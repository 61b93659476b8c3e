use std::sync::Once;

/// Logger configuration.
///
/// `verbose` is the container's debug switch (typically the driver's
/// `--verbose` CLI flag); it raises the default filter to debug level.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "nabu_runtime=debug"). A `RUST_LOG` value in the environment takes
/// precedence over both.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if config.verbose {
            builder.filter_level(log::LevelFilter::Debug);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}
