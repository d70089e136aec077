use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "jellyfin_notify=info,jellyfin_notifier=info";

/// Install the global subscriber. Output is JSON unless
/// `JELLYFIN_LOG_FORMAT=text`.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let text = std::env::var("JELLYFIN_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("text"));
    let registry = tracing_subscriber::registry().with(filter);
    if text {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    } else {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    }
}
