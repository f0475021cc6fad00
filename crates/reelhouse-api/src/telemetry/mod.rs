//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing. `LOG_FORMAT=json` switches to JSON lines.
pub fn init_telemetry(json: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json());
    let console_layer = (!json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelhouse=debug,tower_http=debug".into()),
        )
        .with(json_layer)
        .with(console_layer)
        .try_init()?;

    tracing::info!(json, "Tracing initialized");
    Ok(())
}

pub fn json_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
