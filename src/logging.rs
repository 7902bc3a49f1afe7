use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: &str = "warn";

/// `RUST_LOG` takes precedence over `--log-level`.
pub fn build_filter(cli_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli_level.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

pub fn init(cli_level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(cli_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
