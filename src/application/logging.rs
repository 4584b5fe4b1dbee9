use tracing::dispatcher;
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Initialise le logging :
/// - journald si présent (/run/systemd/journal/socket, feature `journald`)
/// - sinon stderr (fmt) ; stdout reste réservé au rapport
pub fn init_logging() {
    if dispatcher::has_been_set() {
        return;
    }

    #[cfg(feature = "journald")]
    if std::path::Path::new("/run/systemd/journal/socket").exists() {
        if let Ok(layer) = tracing_journald::layer() {
            if tracing_subscriber::registry()
                .with(env_filter())
                .with(layer)
                .try_init()
                .is_ok()
            {
                return;
            }
        }
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
