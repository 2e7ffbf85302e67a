//! Tracing subscriber setup

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INSTALLED: OnceCell<bool> = OnceCell::new();

/// Install a formatted `tracing` subscriber
///
/// `RUST_LOG` wins over `default_filter`. Only the first call has an effect;
/// later calls return the first outcome. Returns `false` if another global
/// subscriber was already set.
pub fn init_tracing(default_filter: &str) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(true))
            .try_init()
            .is_ok()
    })
}
