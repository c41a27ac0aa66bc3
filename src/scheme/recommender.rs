// src/scheme/recommender.rs
//! Precomputed single-result scheme recommenders.
//!
//! A recommender may return a scheme, have no opinion (`Ok(None)`), or fail. The
//! selector turns all three into a `Preferred` value; failures never abort selection.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::Scheme;

/// One scheme proposed by an external engine, with its own score if it reports one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub scheme: Scheme,
    #[serde(default)]
    pub score: Option<f64>,
}

#[async_trait]
pub trait SchemeRecommender: Send + Sync {
    async fn recommend(&self, crop: &str, state: &str) -> Result<Option<Recommendation>>;
    fn name(&self) -> &'static str;
}

/// Never has an opinion; every selection takes the rule-based path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRecommender;

#[async_trait]
impl SchemeRecommender for DisabledRecommender {
    async fn recommend(&self, _crop: &str, _state: &str) -> Result<Option<Recommendation>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Remote engine: `POST {url}` with `{"crop", "state"}`.
///
/// Accepts either a bare scheme object or `{"recommended_scheme": {...}}`;
/// a JSON `null` body or HTTP 204 means "no opinion".
pub struct HttpRecommender {
    http: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RecommendReq<'a> {
    crop: &'a str,
    state: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Wrapped { recommended_scheme: Recommendation },
    Bare(Recommendation),
}

impl HttpRecommender {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("agri-ranker/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .context("building recommender http client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SchemeRecommender for HttpRecommender {
    async fn recommend(&self, crop: &str, state: &str) -> Result<Option<Recommendation>> {
        let resp = self
            .http
            .post(&self.url)
            .json(&RecommendReq { crop, state })
            .send()
            .await
            .with_context(|| format!("calling scheme recommender at {}", self.url))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            bail!("scheme recommender returned HTTP {status}");
        }

        let body: Option<Envelope> = resp
            .json()
            .await
            .context("decoding scheme recommender response")?;
        Ok(body.map(|env| match env {
            Envelope::Wrapped { recommended_scheme } => recommended_scheme,
            Envelope::Bare(r) => r,
        }))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
