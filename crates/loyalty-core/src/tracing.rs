use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: service logs at info, query logs muted.
pub const DEFAULT_FILTER: &str = "info,sea_orm=warn,sqlx=warn";

/// Install the JSON stdout subscriber. Event fields are flattened into the line
/// so `user_id`, `token_id` and friends sit next to `message`.
///
/// Later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true).with_current_span(false))
        .try_init();
}
