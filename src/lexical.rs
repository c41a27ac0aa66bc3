// src/lexical.rs
//! BM25 (Okapi) relevance over a small, per-call corpus.
//!
//! The model is rebuilt from the current candidate pool on every ranking pass;
//! there is no incremental update and nothing is persisted.
//!
//! idf(t) = ln(N - df + 0.5) - ln(df + 0.5). Terms that appear in more than half
//! of the corpus get a negative idf; those are floored to `EPSILON * mean(idf)`.

use std::collections::{BTreeMap, HashMap};

/// Term-frequency saturation.
pub const K1: f64 = 1.5;
/// Document-length normalization.
pub const B: f64 = 0.75;
/// Floor factor for negative idf values.
pub const EPSILON: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct Bm25 {
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lens: Vec<f64>,
    avgdl: f64,
    // BTreeMap keeps the idf mean independent of hash order.
    idf: BTreeMap<String, f64>,
}

impl Bm25 {
    /// Build a model over tokenized documents. `None` for an empty corpus.
    pub fn build(corpus: &[Vec<String>]) -> Option<Self> {
        if corpus.is_empty() {
            return None;
        }

        let mut term_freqs = Vec::with_capacity(corpus.len());
        let mut doc_lens = Vec::with_capacity(corpus.len());
        let mut doc_freq: BTreeMap<String, u32> = BTreeMap::new();
        let mut total_len = 0usize;

        for doc in corpus {
            let mut tf: HashMap<String, u32> = HashMap::new();
            for tok in doc {
                *tf.entry(tok.clone()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            total_len += doc.len();
            doc_lens.push(doc.len() as f64);
            term_freqs.push(tf);
        }

        let n = corpus.len() as f64;
        let avgdl = total_len as f64 / n;
        let idf = compute_idf(&doc_freq, n);

        Some(Self {
            term_freqs,
            doc_lens,
            avgdl,
            idf,
        })
    }

    fn len(&self) -> usize {
        self.doc_lens.len()
    }

    pub fn idf(&self, term: &str) -> f64 {
        self.idf.get(term).copied().unwrap_or(0.0)
    }

    /// One score per document, in corpus order. Repeated query tokens count repeatedly.
    pub fn score(&self, query: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0; self.len()];
        for q in query {
            let Some(&idf) = self.idf.get(q) else {
                continue;
            };
            for (i, tf_map) in self.term_freqs.iter().enumerate() {
                let tf = tf_map.get(q).copied().unwrap_or(0) as f64;
                if tf == 0.0 {
                    continue;
                }
                let len_norm = 1.0 - B + B * self.doc_lens[i] / self.avgdl;
                scores[i] += idf * (tf * (K1 + 1.0)) / (tf + K1 * len_norm);
            }
        }
        scores
    }
}

fn compute_idf(doc_freq: &BTreeMap<String, u32>, n: f64) -> BTreeMap<String, f64> {
    let mut idf = BTreeMap::new();
    let mut idf_sum = 0.0;
    let mut negative = Vec::new();

    for (term, &df) in doc_freq {
        let df = df as f64;
        let v = (n - df + 0.5).ln() - (df + 0.5).ln();
        idf_sum += v;
        if v < 0.0 {
            negative.push(term.clone());
        }
        idf.insert(term.clone(), v);
    }

    if !idf.is_empty() {
        let floor = EPSILON * idf_sum / idf.len() as f64;
        for term in negative {
            idf.insert(term, floor);
        }
    }
    idf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tokenize;

    fn corpus(docs: &[&str]) -> Vec<Vec<String>> {
        docs.iter().map(|d| tokenize(d)).collect()
    }

    #[test]
    fn empty_corpus_has_no_model() {
        assert!(Bm25::build(&[]).is_none());
    }

    #[test]
    fn only_documents_with_the_term_score() {
        let bm = Bm25::build(&corpus(&["wheat", "rice", "onion", "tomato"])).unwrap();
        let s = bm.score(&tokenize("wheat"));
        assert_eq!(s.len(), 4);
        assert!(s[0] > 0.0);
        assert!(s[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn unknown_terms_score_zero() {
        let bm = Bm25::build(&corpus(&["wheat", "rice"])).unwrap();
        assert_eq!(bm.score(&tokenize("sugarcane")), vec![0.0, 0.0]);
        assert_eq!(bm.score(&[]), vec![0.0, 0.0]);
    }

    #[test]
    fn shorter_document_wins_at_equal_tf() {
        let bm = Bm25::build(&corpus(&[
            "wheat",
            "wheat rice maize pune",
            "onion",
            "tomato",
            "garlic",
        ]))
        .unwrap();
        let s = bm.score(&tokenize("wheat"));
        assert!(s[0] > s[1], "{s:?}");
        assert!(s[1] > 0.0);
    }

    #[test]
    fn idf_matches_okapi_formula() {
        let bm = Bm25::build(&corpus(&["wheat", "rice", "onion", "tomato"])).unwrap();
        let expected = (4.0f64 - 1.0 + 0.5).ln() - (1.0f64 + 0.5).ln();
        assert!((bm.idf("wheat") - expected).abs() < 1e-12);
    }

    #[test]
    fn common_terms_are_floored_to_epsilon_mean() {
        // "pune" is in 3 of 4 docs -> negative raw idf.
        let bm = Bm25::build(&corpus(&["wheat pune", "rice pune", "onion pune", "tomato"])).unwrap();
        let raw = |df: f64| (4.0 - df + 0.5f64).ln() - (df + 0.5f64).ln();
        let mean = (raw(1.0) * 4.0 + raw(3.0)) / 5.0;
        assert!((bm.idf("pune") - EPSILON * mean).abs() < 1e-12);
    }

    #[test]
    fn repeated_query_tokens_accumulate() {
        let bm = Bm25::build(&corpus(&["wheat", "rice", "onion", "tomato"])).unwrap();
        let once = bm.score(&tokenize("wheat"))[0];
        let twice = bm.score(&tokenize("wheat wheat"))[0];
        assert!((twice - 2.0 * once).abs() < 1e-12);
    }
}
