pub mod process;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize console logging.
///
/// `RUST_LOG` wins over `level`; `level` defaults to "info". Lines go to
/// stderr, which the kernel connects to the console.
pub fn init_logging(level: Option<&str>) {
    let level = level.unwrap_or(DEFAULT_LOG_LEVEL);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    register_to_tracing(std::io::stderr, env_filter);
}

/// Install a subscriber writing plain (no ANSI) lines with uptime stamps.
///
/// A second registration is ignored.
pub fn register_to_tracing<W>(writer: W, env_filter: EnvFilter)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_timer(fmt::time::uptime()),
        )
        .try_init();
}
