// src/service.rs
//! Request-scoped orchestration: snapshot the pool, run the pure ranking core.
//!
//! The only I/O happens here, before ranking starts. Sources and the recommender are
//! shared; nothing mutable is shared between concurrent passes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use metrics::{counter, histogram};
use tracing::{info, warn};

use crate::config::RankerConfig;
use crate::error::{RankError, Result};
use crate::model::{Seller, SchemeQuery, SellerQuery};
use crate::rank::{self, RankedSeller};
use crate::scheme::{
    self, DisabledRecommender, HttpRecommender, Preferred, SchemeOutcome, SchemeRecommender,
    SelectionPath,
};
use crate::sources::{JsonFile, SchemeSource, SellerSource};

#[derive(Clone)]
pub struct RankingService {
    sellers: Arc<dyn SellerSource>,
    schemes: Arc<dyn SchemeSource>,
    recommender: Arc<dyn SchemeRecommender>,
}

impl RankingService {
    pub fn new(
        sellers: Arc<dyn SellerSource>,
        schemes: Arc<dyn SchemeSource>,
        recommender: Arc<dyn SchemeRecommender>,
    ) -> Self {
        Self {
            sellers,
            schemes,
            recommender,
        }
    }

    /// JSON-file pools plus the HTTP recommender when configured.
    pub fn from_config(cfg: &RankerConfig) -> anyhow::Result<Self> {
        let recommender: Arc<dyn SchemeRecommender> = match cfg.recommender.active_url() {
            Some(url) => Arc::new(
                HttpRecommender::new(url, Duration::from_millis(cfg.recommender.timeout_ms))
                    .context("configuring scheme recommender")?,
            ),
            None => Arc::new(DisabledRecommender),
        };
        Ok(Self::new(
            Arc::new(JsonFile::new(&cfg.data.sellers_path)),
            Arc::new(JsonFile::new(&cfg.data.schemes_path)),
            recommender,
        ))
    }

    async fn seller_pool(&self) -> Result<Vec<Seller>> {
        self.sellers.fetch_sellers().await.map_err(|e| {
            warn!(target: "ranking", source = self.sellers.name(), error = %e, "seller pool fetch failed");
            RankError::PoolFetch(e)
        })
    }

    /// Rank the current seller pool for `query`.
    pub async fn rank_sellers(&self, query: &SellerQuery) -> Result<Vec<RankedSeller>> {
        let pool = self.seller_pool().await?;
        let started = Instant::now();
        let ranked = rank::rank_sellers(&pool, query);

        counter!("ranking_passes_total", "kind" => "sellers").increment(1);
        histogram!("ranking_pass_ms").record(started.elapsed().as_secs_f64() * 1000.0);
        info!(
            target: "ranking",
            query = %query_id(&query.lexical_text()),
            pool = pool.len(),
            returned = ranked.len(),
            "ranked sellers"
        );
        Ok(ranked)
    }

    /// Sellers registered in `state`; the state is required.
    pub async fn sellers_in_state(&self, state: &str) -> Result<Vec<Seller>> {
        if state.trim().is_empty() {
            return Err(RankError::invalid("state is required"));
        }
        let pool = self.seller_pool().await?;
        Ok(rank::sellers_in_state(&pool, state))
    }

    /// Preferred recommender first; the catalog is only fetched for the fallback.
    pub async fn select_scheme(&self, query: &SchemeQuery) -> Result<SchemeOutcome> {
        let res = self.recommender.recommend(query.crop(), query.state()).await;
        if let Err(e) = &res {
            counter!("recommender_errors_total").increment(1);
            warn!(
                target: "ranking",
                recommender = self.recommender.name(),
                error = %format!("{e:#}"),
                "scheme recommender failed; using fallback"
            );
        }

        if let Some(sel) = scheme::accept_preferred(Preferred::from_result(res), query) {
            counter!("scheme_selections_total", "path" => "preferred").increment(1);
            return Ok(SchemeOutcome::Selected(sel));
        }

        let catalog = self.schemes.fetch_schemes().await.map_err(|e| {
            warn!(target: "ranking", source = self.schemes.name(), error = %e, "scheme catalog fetch failed");
            RankError::PoolFetch(e)
        })?;
        let started = Instant::now();
        let outcome = scheme::select_fallback(&catalog, query);
        histogram!("ranking_pass_ms").record(started.elapsed().as_secs_f64() * 1000.0);
        counter!("ranking_passes_total", "kind" => "schemes").increment(1);

        let path = match &outcome {
            SchemeOutcome::Selected(s) if s.source == SelectionPath::Fallback => "fallback",
            SchemeOutcome::Selected(_) => "preferred",
            SchemeOutcome::NoneAvailable => "exhausted",
        };
        counter!("scheme_selections_total", "path" => path).increment(1);
        info!(
            target: "ranking",
            query = %query_id(&format!("{} {}", query.crop(), query.state())),
            catalog = catalog.len(),
            excluded = query.excluded_count(),
            path,
            "selected scheme"
        );
        Ok(outcome)
    }
}

/// Short anonymized id for log lines; raw query text is never logged.
pub(crate) fn query_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
