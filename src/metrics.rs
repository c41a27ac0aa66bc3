use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and describe the ranking series.
    /// Call once per process; without it the `metrics` macros are no-ops.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        describe_counter!("ranking_passes_total", "Ranking passes by kind.");
        describe_counter!(
            "scheme_selections_total",
            "Scheme selections by path (preferred, fallback, exhausted)."
        );
        describe_counter!(
            "recommender_errors_total",
            "Precomputed recommender calls that failed."
        );
        describe_histogram!("ranking_pass_ms", "Ranking pass time in milliseconds.");

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
