use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "fundscope_core=info";

static INIT: Once = Once::new();

/// Install the global fmt subscriber. Safe to call more than once;
/// only the first call has an effect.
pub fn setup_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}
