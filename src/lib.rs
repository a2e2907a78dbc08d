pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod runtime;
pub mod token;

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable read for the log filter before falling back to
/// `RUST_LOG`.
pub const LOG_ENV: &str = "MYTHON_LOG";

static TRACING_INIT: Once = Once::new();

/// Installs a stderr subscriber filtered by `MYTHON_LOG` (or `RUST_LOG`).
///
/// Does nothing when neither variable is set, and is safe to call more than
/// once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_from_default_env());
        let Ok(filter) = filter else {
            return;
        };
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init();
    });
}
