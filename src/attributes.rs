// src/attributes.rs
//! Closed-form attribute scorers: geography, commodity overlap, region authority.
//!
//! All comparisons are case-insensitive on trimmed text. None of these touch the pool;
//! they score one (query, candidate) pair at a time.

use crate::text::{fold, split_terms};

pub const GEO_EXACT: f64 = 1.0;
pub const GEO_PARTIAL: f64 = 0.7;
pub const GEO_NONE: f64 = 0.3;

/// Neutral category score when the query names no commodity.
pub const CATEGORY_NEUTRAL: f64 = 0.5;

/// Geographic proximity ladder: exact 1.0, substring either way 0.7, otherwise 0.3.
/// A missing side is never a match.
pub fn geography_score(query_region: &str, candidate_region: &str) -> f64 {
    let q = fold(query_region);
    let c = fold(candidate_region);
    if q.is_empty() || c.is_empty() {
        return GEO_NONE;
    }
    if q == c {
        return GEO_EXACT;
    }
    if q.contains(&c) || c.contains(&q) {
        return GEO_PARTIAL;
    }
    GEO_NONE
}

/// Share of comma-separated query terms found (as substrings) in the candidate text.
pub fn category_score(query_csv: &str, candidate_text: &str) -> f64 {
    let terms = split_terms(query_csv);
    if terms.is_empty() {
        return CATEGORY_NEUTRAL;
    }
    let haystack = candidate_text.to_lowercase();
    let hits = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
    (hits as f64 / terms.len() as f64).min(1.0)
}

/// True when at least one query term appears in the candidate text, or the query is empty.
pub fn mentions_any(query_csv: &str, candidate_text: &str) -> bool {
    let terms = split_terms(query_csv);
    if terms.is_empty() {
        return true;
    }
    let haystack = candidate_text.to_lowercase();
    terms.iter().any(|t| haystack.contains(t.as_str()))
}

const NATIONAL_PREFIX: &str = "ministry of";
const NATIONAL_PHRASE: &str = "government of india";

/// National-level body: starts with "ministry of" or mentions "government of india".
pub fn is_national_authority(authority: &str) -> bool {
    let a = authority.to_lowercase();
    a.starts_with(NATIONAL_PREFIX) || a.contains(NATIONAL_PHRASE)
}

/// How a scheme's owning authority relates to the target region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityMatch {
    /// Authority text names the target region.
    Region,
    /// National body; applies everywhere.
    National,
    /// Some other region's body.
    Foreign,
}

impl AuthorityMatch {
    pub fn bonus(self) -> i64 {
        match self {
            AuthorityMatch::Region => 8000,
            AuthorityMatch::National => 3000,
            AuthorityMatch::Foreign => -4000,
        }
    }
}

/// Classify `authority` against `region`. Region wins over national.
pub fn authority_match(region: &str, authority: &str) -> AuthorityMatch {
    let region = fold(region);
    let authority_lc = authority.to_lowercase();
    if authority_lc.contains(&region) {
        AuthorityMatch::Region
    } else if is_national_authority(&authority_lc) {
        AuthorityMatch::National
    } else {
        AuthorityMatch::Foreign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geography_ladder() {
        assert_eq!(geography_score("Pune", "Pune"), 1.0);
        assert_eq!(geography_score("Pune", "Pune Rural"), 0.7);
        assert_eq!(geography_score("Pune Rural", "pune"), 0.7);
        assert_eq!(geography_score("Pune", "Nashik"), 0.3);
        assert_eq!(geography_score("", "Pune"), 0.3);
        assert_eq!(geography_score("Pune", "   "), 0.3);
    }

    #[test]
    fn geography_ignores_case_and_padding() {
        assert_eq!(geography_score("  PUNE ", "pune"), 1.0);
    }

    #[test]
    fn category_partial_overlap() {
        assert_eq!(category_score("wheat,rice", "we sell wheat and maize"), 0.5);
        assert_eq!(category_score("Wheat, RICE", "Rice, Wheat"), 1.0);
        assert_eq!(category_score("onion", "wheat"), 0.0);
    }

    #[test]
    fn category_without_terms_is_neutral() {
        assert_eq!(category_score("", "wheat"), CATEGORY_NEUTRAL);
        assert_eq!(category_score(" , ,", "wheat"), CATEGORY_NEUTRAL);
    }

    #[test]
    fn mentions_any_filter() {
        assert!(mentions_any("wheat,rice", "Rice, Maize"));
        assert!(!mentions_any("onion", "Rice, Maize"));
        assert!(mentions_any("", "anything"));
    }

    #[test]
    fn national_authorities() {
        assert!(is_national_authority("Ministry of Agriculture & Farmers Welfare"));
        assert!(is_national_authority("Department of Fisheries, Government of India"));
        assert!(!is_national_authority("Agriculture Department, Punjab"));
    }

    #[test]
    fn authority_classification_and_bonus() {
        assert_eq!(
            authority_match("Maharashtra", "Government of Maharashtra"),
            AuthorityMatch::Region
        );
        assert_eq!(
            authority_match("maharashtra", "Ministry of Agriculture"),
            AuthorityMatch::National
        );
        assert_eq!(
            authority_match("Maharashtra", "Government of Punjab"),
            AuthorityMatch::Foreign
        );
        assert_eq!(AuthorityMatch::Region.bonus(), 8000);
        assert_eq!(AuthorityMatch::National.bonus(), 3000);
        assert_eq!(AuthorityMatch::Foreign.bonus(), -4000);
    }
}
