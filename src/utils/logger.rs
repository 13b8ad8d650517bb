use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise only this crate logs, at debug when verbose.
fn draw_filter(verbose: bool) -> EnvFilter {
    let default_directive = if verbose {
        "gift_draw=debug,info"
    } else {
        "gift_draw=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Human-readable logs for interactive runs. Logs go to stderr so stdout
/// only carries the draw and can be piped.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(draw_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}

/// JSON lines for `--log-json`, when the run is scripted and its logs are
/// collected by another tool.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(draw_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false),
        )
        .init();
}
