use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global `tracing` subscriber once. Safe to call from every
/// test; later calls are no-ops. The filter honours `RUST_LOG` and defaults
/// to `info`.
pub fn setup_logger() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .init();
    });
}
