use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "prolink_schema";

/// `RUST_LOG` wins over the level chosen here.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{}={},info", CRATE_TARGET, level)))
}

pub fn init_cli_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}

/// Line-delimited JSON on stderr, for CI jobs that collect fixture reports.
pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false)
                .flatten_event(true),
        )
        .init();
}
