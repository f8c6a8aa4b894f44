//! One-Euro filter for low-latency cursor smoothing.
//!
//! Adaptive low-pass filter whose cutoff frequency rises with estimated
//! signal speed: heavy smoothing while the head is near-still, low lag
//! during deliberate motion. Based on the paper "1€ Filter: A Simple
//! Speed-based Low-pass Filter for Noisy Input in Interactive Systems".

use super::PointFilter;

/// One-Euro filter for a single scalar signal
pub struct OneEuroFilter {
    min_cutoff: f64,
    beta: f64,
    d_cutoff: f64,
    x_prev: Option<f64>,
    dx_prev: f64,
    t_prev: Option<f64>,
}

impl OneEuroFilter {
    /// Create a new filter.
    ///
    /// `min_cutoff` sets the baseline smoothing strength, `beta` the
    /// speed sensitivity, `d_cutoff` the smoothing of the derivative
    /// estimate itself.
    ///
    /// # Panics
    ///
    /// Panics if `min_cutoff` or `d_cutoff` is not positive, or `beta`
    /// is negative
    #[must_use]
    pub fn new(min_cutoff: f64, beta: f64, d_cutoff: f64) -> Self {
        assert!(min_cutoff > 0.0, "min_cutoff must be positive");
        assert!(beta >= 0.0, "beta must be non-negative");
        assert!(d_cutoff > 0.0, "d_cutoff must be positive");
        Self {
            min_cutoff,
            beta,
            d_cutoff,
            x_prev: None,
            dx_prev: 0.0,
            t_prev: None,
        }
    }

    fn smoothing_factor(te: f64, cutoff: f64) -> f64 {
        let r = 2.0 * std::f64::consts::PI * cutoff * te;
        r / (r + 1.0)
    }

    fn exponential_smoothing(a: f64, x: f64, x_prev: f64) -> f64 {
        a.mul_add(x - x_prev, x_prev)
    }

    /// Filter a sample taken at time `t` (seconds).
    ///
    /// The first call returns `x` unchanged and seeds the state. A
    /// non-monotonic or duplicate timestamp (`t <= t_prev`) returns the
    /// previous output unchanged.
    pub fn filter(&mut self, x: f64, t: f64) -> f64 {
        let (Some(x_prev), Some(t_prev)) = (self.x_prev, self.t_prev) else {
            self.x_prev = Some(x);
            self.t_prev = Some(t);
            return x;
        };

        let te = t - t_prev;
        if te <= 0.0 {
            return x_prev;
        }

        // Estimate velocity and smooth it
        let dx = (x - x_prev) / te;
        let a_d = Self::smoothing_factor(te, self.d_cutoff);
        let dx_hat = Self::exponential_smoothing(a_d, dx, self.dx_prev);

        // Speed-adaptive cutoff
        let cutoff = self.beta.mul_add(dx_hat.abs(), self.min_cutoff);

        let a = Self::smoothing_factor(te, cutoff);
        let x_hat = Self::exponential_smoothing(a, x, x_prev);

        self.x_prev = Some(x_hat);
        self.dx_prev = dx_hat;
        self.t_prev = Some(t);

        x_hat
    }

    /// Clear all state. Required whenever calibration restarts or
    /// tracking resumes, so smoothing never bridges a discontinuity.
    pub fn reset(&mut self) {
        self.x_prev = None;
        self.dx_prev = 0.0;
        self.t_prev = None;
    }
}

/// Two independent One-Euro filters for the X and Y axes
pub struct OneEuroFilter2D {
    filter_x: OneEuroFilter,
    filter_y: OneEuroFilter,
}

impl OneEuroFilter2D {
    /// Create a 2-D filter; both axes share the same parameters
    #[must_use]
    pub fn new(min_cutoff: f64, beta: f64, d_cutoff: f64) -> Self {
        Self {
            filter_x: OneEuroFilter::new(min_cutoff, beta, d_cutoff),
            filter_y: OneEuroFilter::new(min_cutoff, beta, d_cutoff),
        }
    }

    /// Filter a 2-D point sampled at time `t` (seconds)
    pub fn filter(&mut self, x: f64, y: f64, t: f64) -> (f64, f64) {
        (self.filter_x.filter(x, t), self.filter_y.filter(y, t))
    }

    /// Reset both axes
    pub fn reset(&mut self) {
        self.filter_x.reset();
        self.filter_y.reset();
    }
}

impl PointFilter for OneEuroFilter2D {
    fn apply(&mut self, x: f64, y: f64, t: f64) -> (f64, f64) {
        self.filter(x, y, t)
    }

    fn reset(&mut self) {
        self.filter_x.reset();
        self.filter_y.reset();
    }

    fn name(&self) -> &str {
        "OneEuroFilter2D"
    }
}
