//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the environment default unless `verbose` is set.
/// Local runs log human-readable text; dev and prod log JSON lines.
pub fn init_tracing(environment: Environment, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{},tower_http=debug",
                environment.default_log_level()
            ))
        })
    };

    let registry = tracing_subscriber::registry().with(filter);

    if environment.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
