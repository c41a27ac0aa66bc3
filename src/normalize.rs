// src/normalize.rs
//! Min/max rescaling onto [0,1] against the current candidate pool.

/// Neutral midpoint used when the pool has no spread.
pub const NEUTRAL: f64 = 0.5;

/// `(value - min) / (max - min)`; exactly 0.5 for zero spread or a non-finite result.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return NEUTRAL;
    }
    let v = (value - min) / (max - min);
    if v.is_finite() {
        v
    } else {
        NEUTRAL
    }
}

/// Observed bounds of one signal across a pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolRange {
    pub min: f64,
    pub max: f64,
}

impl PoolRange {
    /// Bounds over `values`; `None` for an empty pool.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(r) => Some(Self {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }
}

/// Divide by the pool maximum (1.0 when it is not positive), clamped to [0,1].
/// All-zero pools collapse to 0.
pub fn scale_by_max(value: f64, pool_max: f64) -> f64 {
    let divisor = if pool_max > 0.0 { pool_max } else { 1.0 };
    (value / divisor).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_between_bounds() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn zero_spread_is_neutral() {
        assert_eq!(normalize(4.2, 4.2, 4.2), NEUTRAL);
        let single = PoolRange::of([7.0]).unwrap();
        assert_eq!(single.normalize(7.0), NEUTRAL);
    }

    #[test]
    fn non_finite_is_neutral() {
        assert_eq!(normalize(f64::NAN, 0.0, 1.0), NEUTRAL);
        assert_eq!(normalize(1.0, f64::NEG_INFINITY, f64::INFINITY), NEUTRAL);
    }

    #[test]
    fn pool_range_bounds() {
        assert_eq!(PoolRange::of(Vec::<f64>::new()), None);
        let r = PoolRange::of([3.0, 9.0, 1.0]).unwrap();
        assert_eq!((r.min, r.max), (1.0, 9.0));
    }

    #[test]
    fn scale_by_max_handles_zero_pool() {
        assert_eq!(scale_by_max(0.0, 0.0), 0.0);
        assert_eq!(scale_by_max(2.0, 4.0), 0.5);
        assert_eq!(scale_by_max(-1.0, 4.0), 0.0);
    }
}
