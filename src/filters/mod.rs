//! Signal filtering algorithms for smoothing cursor positions.
//!
//! This module provides jitter-rejecting smoothers for the mapped cursor
//! point. The One-Euro filter is the default; the others exist for
//! comparison and tuning.

/// One-Euro filter: adaptive low-pass with speed-dependent cutoff
pub mod one_euro;

/// Exponential filter with a fixed smoothing factor
pub mod exponential;

use crate::constants::{DEFAULT_BETA, DEFAULT_D_CUTOFF, DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MIN_CUTOFF};
use crate::Result;

/// Trait for all cursor point filters
pub trait PointFilter: Send + Sync {
    /// Apply filter to a point sampled at time `t` (seconds)
    fn apply(&mut self, x: f64, y: f64, t: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl PointFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64, _t: f64) -> (f64, f64) {
        (x, y)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a point filter by type name
pub fn create_filter(filter_type: &str) -> Result<Box<dyn PointFilter>> {
    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "one_euro" | "oneeuro" => Ok(Box::new(one_euro::OneEuroFilter2D::new(
            DEFAULT_MIN_CUTOFF,
            DEFAULT_BETA,
            DEFAULT_D_CUTOFF,
        ))),
        "exponential" => Ok(Box::new(exponential::ExponentialFilter::new(DEFAULT_EXPONENTIAL_ALPHA))),
        _ => Err(crate::Error::Filter(format!("Unknown filter type: {filter_type}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter() {
        let mut filter = NoFilter;
        let (x, y) = filter.apply(10.0, 20.0, 0.0);
        assert_eq!(x, 10.0);
        assert_eq!(y, 20.0);
    }

    #[test]
    fn test_create_filter() {
        assert!(create_filter("none").is_ok());
        assert!(create_filter("one_euro").is_ok());
        assert!(create_filter("exponential").is_ok());
        assert!(create_filter("unknown").is_err());
    }
}
