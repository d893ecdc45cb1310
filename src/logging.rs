use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, FmtSubscriber};

use crate::formatter::TickFormatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Installs the global tracing subscriber. Safe to call more than once.
///
/// `RUST_LOG` overrides the default filter of `warn` for dependencies and `info` for this crate.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", env!("CARGO_CRATE_NAME"))));

        let subscriber = FmtSubscriber::builder()
            .with_target(true)
            .event_format(TickFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        // A host may already have installed its own subscriber.
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("Global subscriber already set, keeping it");
        }
    });
}
