use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::formatter::CustomFormatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// The filter used when `RUST_LOG` is unset: our crate at info, everything else at warn.
pub fn default_filter() -> String {
    format!("warn,{}=info", env!("CARGO_CRATE_NAME"))
}

/// Configure and initialize logging for the application. Safe to call more than once.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

        let subscriber = tracing_subscriber::fmt()
            .with_ansi(true)
            .with_target(true)
            .event_format(CustomFormatter)
            .with_env_filter(filter)
            .finish()
            .with(ErrorLayer::default());

        if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Could not set global default subscriber: {error}");
        }
    });
}
