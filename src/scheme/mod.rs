// src/scheme/mod.rs
//! Scheme selection with exclusion.
//!
//! Two tiers, one invocation per call:
//! 1) a precomputed recommender's pick, used as-is unless it was already shown;
//! 2) a rule-based fallback over the catalog minus the exclusion set.
//!
//! Fallback score (integer, additive):
//! - authority names the state: +8000; national body: +3000; other region: -4000
//! - crop in scheme name +500, in description +300, in tags +200
//!
//! The constants are kept verbatim for output compatibility.

pub mod recommender;

use serde::Serialize;
use tracing::debug;

use crate::attributes::authority_match;
use crate::model::{Scheme, SchemeQuery};

pub use recommender::{DisabledRecommender, HttpRecommender, Recommendation, SchemeRecommender};

pub const CROP_IN_NAME: i64 = 500;
pub const CROP_IN_DESCRIPTION: i64 = 300;
pub const CROP_IN_TAGS: i64 = 200;

/// What the precomputed recommender produced for this call.
#[derive(Debug, Clone, PartialEq)]
pub enum Preferred {
    Found(Recommendation),
    /// No pick: the engine failed or had no opinion.
    Unavailable(String),
}

impl Preferred {
    pub fn from_result(res: anyhow::Result<Option<Recommendation>>) -> Self {
        match res {
            Ok(Some(r)) => Preferred::Found(r),
            Ok(None) => Preferred::Unavailable("no recommendation".to_string()),
            Err(e) => Preferred::Unavailable(format!("{e:#}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPath {
    Preferred,
    Fallback,
}

/// Selected scheme in wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeSelection {
    #[serde(flatten)]
    pub scheme: Scheme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub source: SelectionPath,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemeOutcome {
    Selected(SchemeSelection),
    /// Every catalog entry was excluded (or the catalog is empty).
    NoneAvailable,
}

/// Preferred pick if it exists and was not already shown.
pub fn accept_preferred(preferred: Preferred, query: &SchemeQuery) -> Option<SchemeSelection> {
    match preferred {
        Preferred::Found(r) if !query.is_excluded(&r.scheme.scheme_name) => Some(SchemeSelection {
            scheme: r.scheme,
            score: r.score,
            source: SelectionPath::Preferred,
        }),
        Preferred::Found(r) => {
            debug!(target: "ranking", scheme = %r.scheme.scheme_name, "preferred scheme already shown");
            None
        }
        Preferred::Unavailable(reason) => {
            debug!(target: "ranking", %reason, "preferred recommender unavailable");
            None
        }
    }
}

/// Integer fallback score of one scheme.
pub fn fallback_score(scheme: &Scheme, query: &SchemeQuery) -> i64 {
    let crop = query.crop();
    let mut score = authority_match(query.state(), &scheme.state_ministry).bonus();
    if scheme.scheme_name.to_lowercase().contains(crop) {
        score += CROP_IN_NAME;
    }
    if scheme.description.to_lowercase().contains(crop) {
        score += CROP_IN_DESCRIPTION;
    }
    if scheme.tags.to_lowercase().contains(crop) {
        score += CROP_IN_TAGS;
    }
    score
}

/// Non-excluded schemes with their fallback scores, best first; ties keep catalog order.
pub fn rank_fallback<'a>(catalog: &'a [Scheme], query: &SchemeQuery) -> Vec<(i64, &'a Scheme)> {
    let mut scored: Vec<(i64, &Scheme)> = catalog
        .iter()
        .filter(|s| !query.is_excluded(&s.scheme_name))
        .map(|s| (fallback_score(s, query), s))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
}

/// Rule-based tier only.
pub fn select_fallback(catalog: &[Scheme], query: &SchemeQuery) -> SchemeOutcome {
    match rank_fallback(catalog, query).first() {
        Some(&(score, scheme)) => SchemeOutcome::Selected(SchemeSelection {
            scheme: scheme.clone(),
            score: Some(score as f64),
            source: SelectionPath::Fallback,
        }),
        None => SchemeOutcome::NoneAvailable,
    }
}

/// Full two-tier selection.
pub fn select_scheme(preferred: Preferred, catalog: &[Scheme], query: &SchemeQuery) -> SchemeOutcome {
    match accept_preferred(preferred, query) {
        Some(sel) => SchemeOutcome::Selected(sel),
        None => select_fallback(catalog, query),
    }
}
