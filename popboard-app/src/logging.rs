use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "popboard=info,popboard_json=info,tower_http=info";

/// Logs go to stderr so CLI output on stdout stays machine-readable.
/// `RUST_LOG` wins over the default filter when set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
