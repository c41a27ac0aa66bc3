// src/rank/mod.rs
//! Seller ranking pipeline: filter -> score -> normalize -> aggregate -> stable sort.
//!
//! Pure and request-scoped. The BM25 model is built over the whole pool snapshot for
//! this call only; rating, experience and lexical signals are normalized against the
//! commodity-matched subset, so scores are not comparable across calls.

pub mod weights;

use serde::Serialize;
use tracing::debug;

use crate::attributes::{category_score, geography_score, mentions_any};
use crate::lexical::Bm25;
use crate::model::{Seller, SellerQuery};
use crate::normalize::{scale_by_max, PoolRange};
use crate::text::{fold, tokenize};

pub use weights::{Dimensions, Weights, SELLER_WEIGHTS};

/// A seller with every intermediate score of one ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSeller {
    pub seller: Seller,
    /// Raw signals (rating/experience on their own scale, BM25 unbounded).
    pub raw: Dimensions,
    /// Signals on [0,1] as fed to the weight vector.
    pub normalized: Dimensions,
    pub final_score: f64,
}

/// Wire shape of one ranked seller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSeller {
    #[serde(rename = "fpc_id")]
    pub id: String,
    #[serde(rename = "FPC_Name")]
    pub name: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Commodities")]
    pub commodities: String,
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "Years_of_Experience")]
    pub experience: f64,
    #[serde(rename = "Contact_Phone")]
    pub contact_phone: String,
    #[serde(rename = "Address")]
    pub address: String,
    pub match_percentage: f64,
}

impl From<ScoredSeller> for RankedSeller {
    fn from(s: ScoredSeller) -> Self {
        let match_percentage = match_percentage(s.final_score);
        let seller = s.seller;
        Self {
            id: seller.id,
            name: seller.name,
            district: seller.district,
            commodities: seller.commodities,
            rating: seller.rating,
            experience: seller.experience,
            contact_phone: seller.contact_phone,
            address: seller.address,
            match_percentage,
        }
    }
}

/// `round(score * 100, 1)`
pub fn match_percentage(final_score: f64) -> f64 {
    (final_score * 1000.0).round() / 10.0
}

/// Score and order the pool for `query`. Empty pool or no commodity match -> empty.
pub fn score_sellers(pool: &[Seller], query: &SellerQuery) -> Vec<ScoredSeller> {
    if pool.is_empty() {
        return Vec::new();
    }

    let matched: Vec<usize> = (0..pool.len())
        .filter(|&i| mentions_any(&query.crop, &pool[i].commodities))
        .collect();
    if matched.is_empty() {
        debug!(target: "ranking", pool = pool.len(), "no seller matches the commodity filter");
        return Vec::new();
    }

    // Lexical model over the whole pool, not only the matched subset.
    let corpus: Vec<Vec<String>> = pool.iter().map(|s| tokenize(&s.document())).collect();
    let lexical = match Bm25::build(&corpus) {
        Some(model) => model.score(&tokenize(&query.lexical_text())),
        None => vec![0.0; pool.len()],
    };

    let raw: Vec<Dimensions> = matched
        .iter()
        .map(|&i| {
            let s = &pool[i];
            Dimensions {
                rating: s.rating,
                geography: geography_score(&query.district, &s.district),
                category: category_score(&query.crop, &s.commodities),
                experience: s.experience,
                lexical: lexical.get(i).copied().unwrap_or(0.0),
            }
        })
        .collect();

    let (Some(rating_range), Some(exp_range)) = (
        PoolRange::of(raw.iter().map(|d| d.rating)),
        PoolRange::of(raw.iter().map(|d| d.experience)),
    ) else {
        return Vec::new();
    };
    let lexical_max = raw
        .iter()
        .map(|d| d.lexical)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut scored: Vec<ScoredSeller> = matched
        .iter()
        .zip(raw)
        .map(|(&i, raw)| {
            let normalized = Dimensions {
                rating: rating_range.normalize(raw.rating),
                geography: raw.geography,
                category: raw.category,
                experience: exp_range.normalize(raw.experience),
                lexical: scale_by_max(raw.lexical, lexical_max),
            };
            ScoredSeller {
                seller: pool[i].clone(),
                raw,
                normalized,
                final_score: SELLER_WEIGHTS.combine(&normalized),
            }
        })
        .collect();

    // Stable: equal scores keep pool order.
    scored.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        target: "ranking",
        pool = pool.len(),
        matched = scored.len(),
        top = scored.first().map(|s| s.final_score).unwrap_or_default(),
        "seller ranking pass"
    );
    scored
}

/// `score_sellers` projected onto the wire shape.
pub fn rank_sellers(pool: &[Seller], query: &SellerQuery) -> Vec<RankedSeller> {
    score_sellers(pool, query)
        .into_iter()
        .map(RankedSeller::from)
        .collect()
}

/// Sellers registered in `state` (case-insensitive), pool order, unscored.
pub fn sellers_in_state(pool: &[Seller], state: &str) -> Vec<Seller> {
    let wanted = fold(state);
    pool.iter()
        .filter(|s| !wanted.is_empty() && fold(&s.state) == wanted)
        .cloned()
        .collect()
}
