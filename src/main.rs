//! Ranking service binary entrypoint.
//! Boots the Axum HTTP server with the seller/scheme ranking routes and `/metrics`.

use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agri_ranker::config::RankerConfig;
use agri_ranker::metrics::Metrics;
use agri_ranker::{router, RankingService};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - RANKER_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("RANKER_DEV_LOG")
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

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ranking=debug,warn"));

    // Shuttle may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = RankerConfig::load()?;
    info!(
        target: "ranking",
        sellers = %cfg.data.sellers_path.display(),
        schemes = %cfg.data.schemes_path.display(),
        recommender = cfg.recommender.active_url().unwrap_or("disabled"),
        "ranker config loaded"
    );

    let service = RankingService::from_config(&cfg)?;
    let metrics = Metrics::init()?;

    let app = router(service).merge(metrics.router());
    Ok(app.into())
}
