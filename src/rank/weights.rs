//! Fixed weight vector for seller ranking.
//!
//! These are a design constant, not configuration: output ordering is only
//! compatible with other deployments when the weights match exactly.

use serde::Serialize;

/// Per-dimension scores, each already on [0,1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Dimensions {
    pub rating: f64,
    pub geography: f64,
    pub category: f64,
    pub experience: f64,
    pub lexical: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub rating: f64,
    pub geography: f64,
    pub category: f64,
    pub experience: f64,
    pub lexical: f64,
}

pub const SELLER_WEIGHTS: Weights = Weights {
    rating: 0.40,
    geography: 0.25,
    category: 0.20,
    experience: 0.10,
    lexical: 0.05,
};

impl Weights {
    /// Linear combination; no renormalization (the seller vector sums to 1.0).
    pub fn combine(&self, d: &Dimensions) -> f64 {
        d.rating * self.rating
            + d.geography * self.geography
            + d.category * self.category
            + d.experience * self.experience
            + d.lexical * self.lexical
    }

    pub fn total(&self) -> f64 {
        self.rating + self.geography + self.category + self.experience + self.lexical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seller_weights_sum_to_one() {
        assert!((SELLER_WEIGHTS.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn combine_is_dot_product() {
        let d = Dimensions {
            rating: 1.0,
            geography: 0.7,
            category: 0.5,
            experience: 0.0,
            lexical: 1.0,
        };
        let expected = 0.40 + 0.25 * 0.7 + 0.20 * 0.5 + 0.05;
        assert!((SELLER_WEIGHTS.combine(&d) - expected).abs() < 1e-12);
    }

    #[test]
    fn all_ones_gives_one() {
        let d = Dimensions {
            rating: 1.0,
            geography: 1.0,
            category: 1.0,
            experience: 1.0,
            lexical: 1.0,
        };
        assert!((SELLER_WEIGHTS.combine(&d) - 1.0).abs() < 1e-12);
    }
}
