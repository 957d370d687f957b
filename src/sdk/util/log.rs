use env_logger::{Builder, Env};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the process-wide logger. Calling it a second time is a no-op.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_module_path(false)
        .try_init();
}
