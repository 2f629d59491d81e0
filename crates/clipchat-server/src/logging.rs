use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `level` (from the CLI) wins over `RUST_LOG`; the default is `info`.
pub fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
