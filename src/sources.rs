// src/sources.rs
//! Candidate pool fetches.
//!
//! Each fetch must return the whole pool (no pagination): min/max normalization and
//! the lexical model both need every candidate. A failed fetch fails the call.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::model::{Scheme, Seller, SellerRecord};

#[async_trait]
pub trait SellerSource: Send + Sync {
    async fn fetch_sellers(&self) -> Result<Vec<Seller>>;
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait SchemeSource: Send + Sync {
    async fn fetch_schemes(&self) -> Result<Vec<Scheme>>;
    fn name(&self) -> &'static str;
}

/// JSON array file, re-read on every fetch so each call sees a fresh snapshot.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))
    }
}

/// Seller records from a JSON array; non-seller roles are skipped.
///
/// Only a file that is not a JSON array fails. A single record that does not resolve
/// is logged and dropped.
pub fn parse_sellers(json: &str) -> Result<Vec<Seller>> {
    let raw: Vec<Value> = serde_json::from_str(json).context("parsing seller records")?;
    Ok(raw
        .iter()
        .enumerate()
        .filter_map(|(index, v)| {
            let record = SellerRecord::from_json(v);
            if record.is_none() {
                warn!(target: "ranking", index, "skipping seller record without an id");
            }
            record
        })
        .filter(SellerRecord::is_seller)
        .map(Seller::from)
        .collect())
}

pub fn parse_schemes(json: &str) -> Result<Vec<Scheme>> {
    serde_json::from_str(json).context("parsing scheme catalog")
}

#[async_trait]
impl SellerSource for JsonFile {
    async fn fetch_sellers(&self) -> Result<Vec<Seller>> {
        let raw = self.read().await?;
        parse_sellers(&raw).with_context(|| format!("in {}", self.path.display()))
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

#[async_trait]
impl SchemeSource for JsonFile {
    async fn fetch_schemes(&self) -> Result<Vec<Scheme>> {
        let raw = self.read().await?;
        parse_schemes(&raw).with_context(|| format!("in {}", self.path.display()))
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

/// Fixed in-process pool (tests, embedding).
#[derive(Debug, Clone, Default)]
pub struct InMemory<T> {
    items: Vec<T>,
}

impl<T> InMemory<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl SellerSource for InMemory<Seller> {
    async fn fetch_sellers(&self) -> Result<Vec<Seller>> {
        Ok(self.items.clone())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

#[async_trait]
impl SchemeSource for InMemory<Scheme> {
    async fn fetch_schemes(&self) -> Result<Vec<Scheme>> {
        Ok(self.items.clone())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
