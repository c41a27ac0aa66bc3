// src/model.rs
//! Candidate records and queries.
//!
//! Source records arrive with optional and aliased fields (`fpcName` vs `fpc_name`,
//! `Rating` vs `rating`, lists vs comma text). They are parsed into explicit
//! optional-field records and then resolved into the canonical `Seller` / `Scheme`
//! with the documented defaults.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{RankError, Result};

/// Rating / experience used when the source value is absent, zero or unparsable.
pub const DEFAULT_RATING: f64 = 5.0;
pub const DEFAULT_EXPERIENCE: f64 = 5.0;

/// Either a scalar text or a list of texts; lists are joined with ", ".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TextOrList {
    Text(String),
    List(Vec<Option<String>>),
}

impl TextOrList {
    fn into_text(self) -> String {
        match self {
            TextOrList::Text(s) => s,
            TextOrList::List(items) => items
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn text_or_list<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<TextOrList>::deserialize(d)?
        .map(TextOrList::into_text)
        .unwrap_or_default())
}

/// Source keys per field, in lookup order. The first non-empty value wins.
const ID_KEYS: &[&str] = &["_id", "fpc_id", "id"];
const NAME_KEYS: &[&str] = &["fpcName", "fpc_name", "FPC_Name"];
const DISTRICT_KEYS: &[&str] = &["district", "District"];
const STATE_KEYS: &[&str] = &["state", "State"];
const COMMODITY_KEYS: &[&str] = &["commodities", "Commodities"];
const RATING_KEYS: &[&str] = &["rating", "Rating"];
const EXPERIENCE_KEYS: &[&str] = &["experience", "years_of_experience", "Years_of_Experience"];
const PHONE_KEYS: &[&str] = &["contact_phone", "Contact_Phone"];
const ADDRESS_KEYS: &[&str] = &["address", "Address"];

/// null, false, 0, blank text and empty containers carry no value.
fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn first<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !is_blank(v))
}

/// Scalars as text; containers have no text form.
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first(obj, keys).and_then(scalar_text)
}

/// Lists are joined with ", " (blank items dropped); scalars pass through.
fn list_text(v: &Value) -> String {
    match v {
        Value::Array(items) => items
            .iter()
            .filter(|x| !is_blank(x))
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other).unwrap_or_default(),
    }
}

/// Number or numeric string; anything else (or non-finite) is `None`.
fn numeric(v: &Value) -> Option<f64> {
    let x = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    x.is_finite().then_some(x)
}

/// Seller record as read from the data store, aliased spellings resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerRecord {
    pub id: String,
    pub fpc_name: Option<String>,
    pub role: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub commodities: String,
    /// Zero counts as missing, like any other empty value.
    pub rating: Option<f64>,
    pub experience: Option<f64>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

impl SellerRecord {
    /// Resolve one raw record. `None` when it is not an object or has no usable id.
    pub fn from_json(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        Some(Self {
            id: first_text(obj, ID_KEYS)?,
            fpc_name: first_text(obj, NAME_KEYS),
            role: first_text(obj, &["role"]),
            district: first_text(obj, DISTRICT_KEYS),
            state: first_text(obj, STATE_KEYS),
            commodities: first(obj, COMMODITY_KEYS)
                .map(list_text)
                .unwrap_or_default(),
            rating: first(obj, RATING_KEYS).and_then(numeric),
            experience: first(obj, EXPERIENCE_KEYS).and_then(numeric),
            contact_phone: first_text(obj, PHONE_KEYS),
            address: first_text(obj, ADDRESS_KEYS),
        })
    }

    /// Records without a role are treated as sellers.
    pub fn is_seller(&self) -> bool {
        self.role
            .as_deref()
            .map_or(true, |r| r.trim().eq_ignore_ascii_case("seller"))
    }
}

/// Canonical seller candidate with defaults resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
    pub district: String,
    pub state: String,
    pub commodities: String,
    pub rating: f64,
    pub experience: f64,
    pub contact_phone: String,
    pub address: String,
}

impl From<SellerRecord> for Seller {
    fn from(r: SellerRecord) -> Self {
        let rating = r.rating.unwrap_or(DEFAULT_RATING);
        let experience = r.experience.unwrap_or(DEFAULT_EXPERIENCE);
        let name = r
            .fpc_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| r.id.clone());
        Self {
            id: r.id,
            name,
            district: r.district.unwrap_or_default(),
            state: r.state.unwrap_or_default(),
            commodities: r.commodities,
            rating,
            experience,
            contact_phone: r.contact_phone.unwrap_or_default(),
            address: r.address.unwrap_or_default(),
        }
    }
}

impl Seller {
    /// Text indexed by the lexical model.
    pub fn document(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.district, self.commodities, self.address
        )
    }
}

/// Support scheme. `scheme_name` is both identity and exclusion key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub scheme_name: String,
    #[serde(default, alias = "authority", alias = "ministry")]
    pub state_ministry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_list")]
    pub tags: String,
    #[serde(default, alias = "link")]
    pub scheme_link: String,
}

/// Buyer query for seller ranking. All fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerQuery {
    /// Comma-separated commodities.
    pub crop: String,
    pub district: String,
    pub state: String,
}

impl SellerQuery {
    pub fn new(crop: &str, district: &str, state: &str) -> Self {
        Self {
            crop: crop.trim().to_string(),
            district: district.trim().to_string(),
            state: state.trim().to_string(),
        }
    }

    /// Use `region` when no district was given.
    pub fn with_region_fallback(mut self, region: Option<&str>) -> Self {
        if self.district.is_empty() {
            if let Some(r) = region {
                self.district = r.trim().to_string();
            }
        }
        self
    }

    /// Free text handed to the lexical scorer.
    pub fn lexical_text(&self) -> String {
        format!("{} {} {}", self.crop, self.district, self.state)
            .trim()
            .to_string()
    }
}

/// Scheme selection query. Crop and state are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeQuery {
    crop: String,
    state: String,
    excluded: HashSet<String>,
}

impl SchemeQuery {
    pub fn new<I, S>(crop: &str, state: &str, excluded: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let crop = crop.trim().to_lowercase();
        let state = state.trim().to_lowercase();
        if crop.is_empty() {
            return Err(RankError::invalid("crop is required"));
        }
        if state.is_empty() {
            return Err(RankError::invalid("state is required"));
        }
        Ok(Self {
            crop,
            state,
            excluded: excluded.into_iter().map(Into::into).collect(),
        })
    }

    /// Lower-cased crop.
    pub fn crop(&self) -> &str {
        &self.crop
    }

    /// Lower-cased state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Exact match on the scheme name.
    pub fn is_excluded(&self, scheme_name: &str) -> bool {
        self.excluded.contains(scheme_name)
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}
