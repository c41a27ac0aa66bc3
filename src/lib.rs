// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod attributes;
pub mod config;
pub mod error;
pub mod lexical;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod sources;
pub mod text;

// Ranking core: seller pipeline and scheme selection.
pub mod rank;
pub mod scheme;

pub mod service;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::error::{RankError, Result};
pub use crate::model::{Scheme, SchemeQuery, Seller, SellerQuery};
pub use crate::rank::{rank_sellers, RankedSeller};
pub use crate::scheme::{select_scheme, Preferred, SchemeOutcome, SchemeSelection};
pub use crate::service::RankingService;
