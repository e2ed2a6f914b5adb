//! Flood Watch: binary entrypoint.
//! Boots the Axum HTTP server: config, adapters, routes, metrics.

use flood_watch::{api, metrics::Metrics, AppConfig, AppState};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install our own subscriber when asked to, or in a dev environment:
///   - FLOODWATCH_LOG=1, or
///   - debug build / SHUTTLE_ENV in {local, development, dev}
/// FLOODWATCH_LOG_FORMAT=json switches to JSON lines.
/// `try_init` keeps this a no-op when Shuttle already installed one.
fn init_tracing() {
    let log_flag = std::env::var("FLOODWATCH_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(log_flag || is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("flood_watch=info,warn"));

    let json = std::env::var("FLOODWATCH_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::load_default()?;
    let state = AppState::from_config(&cfg)?;
    let metrics = Metrics::init()?;

    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
