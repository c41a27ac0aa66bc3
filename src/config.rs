// src/config.rs
//! Service configuration from `config/ranker.toml` with env overrides.
//!
//! ```toml
//! [data]
//! sellers_path = "data/sellers.json"
//! schemes_path = "data/schemes.json"
//!
//! [recommender]
//! enabled = false
//! url = "http://localhost:8001/recommend"
//! timeout_ms = 3000
//! ```
//!
//! Weights are not configurable; see `rank::weights`.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/ranker.toml";

pub const ENV_CONFIG_PATH: &str = "RANKER_CONFIG_PATH";
pub const ENV_SELLERS_PATH: &str = "RANKER_SELLERS_PATH";
pub const ENV_SCHEMES_PATH: &str = "RANKER_SCHEMES_PATH";
pub const ENV_RECOMMENDER_URL: &str = "RANKER_RECOMMENDER_URL";

fn default_sellers_path() -> PathBuf {
    PathBuf::from("data/sellers.json")
}
fn default_schemes_path() -> PathBuf {
    PathBuf::from("data/schemes.json")
}
fn default_timeout_ms() -> u64 {
    3_000
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankerConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub recommender: RecommenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_sellers_path")]
    pub sellers_path: PathBuf,
    #[serde(default = "default_schemes_path")]
    pub schemes_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sellers_path: default_sellers_path(),
            schemes_path: default_schemes_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl RecommenderConfig {
    /// URL to call, if the remote recommender is switched on.
    pub fn active_url(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

impl RankerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing ranker config")
    }

    /// Resolve and load the config, then apply env overrides.
    ///
    /// `RANKER_CONFIG_PATH` must point at an existing file. Without it, a missing
    /// `config/ranker.toml` means built-in defaults.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let path = PathBuf::from(p);
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    anyhow!("Failed to read ranker config at {}: {}", path.display(), e)
                })?;
                Self::from_toml_str(&content)?
            }
            Err(_) => match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(content) => Self::from_toml_str(&content)?,
                Err(_) => Self::default(),
            },
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(p) = non_empty_env(ENV_SELLERS_PATH) {
            self.data.sellers_path = PathBuf::from(p);
        }
        if let Some(p) = non_empty_env(ENV_SCHEMES_PATH) {
            self.data.schemes_path = PathBuf::from(p);
        }
        if let Some(url) = non_empty_env(ENV_RECOMMENDER_URL) {
            self.recommender.url = Some(url);
            self.recommender.enabled = true;
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
