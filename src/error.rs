// src/error.rs
//! Error taxonomy of the ranking core.
//!
//! Empty results are not errors: an empty seller list and
//! `SchemeOutcome::NoneAvailable` are ordinary outcomes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Debug, Error)]
pub enum RankError {
    /// Missing or malformed query field; nothing was ranked.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The candidate pool could not be read; no partial ranking is attempted.
    #[error("candidate pool unavailable: {0:#}")]
    PoolFetch(anyhow::Error),
}

impl RankError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        RankError::InvalidQuery(msg.into())
    }
}
