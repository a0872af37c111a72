use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
/// - Respects `RUST_LOG` if set, defaults to `info`
/// - Writes to stderr so stdout stays free for the cart listing
/// - `json` switches to structured JSON lines
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
