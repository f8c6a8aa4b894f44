use super::PointFilter;

/// Exponential smoothing filter with a fixed alpha
pub struct ExponentialFilter {
    alpha: f64,
    last_x: Option<f64>,
    last_y: Option<f64>,
}

impl ExponentialFilter {
    /// Create a new exponential filter
    ///
    /// # Panics
    ///
    /// Panics if alpha is not in the range (0, 1]
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self {
            alpha,
            last_x: None,
            last_y: None,
        }
    }
}

impl PointFilter for ExponentialFilter {
    fn apply(&mut self, x: f64, y: f64, _t: f64) -> (f64, f64) {
        let filtered_x = match self.last_x {
            Some(last) => self.alpha * x + (1.0 - self.alpha) * last,
            None => x,
        };

        let filtered_y = match self.last_y {
            Some(last) => self.alpha * y + (1.0 - self.alpha) * last,
            None => y,
        };

        self.last_x = Some(filtered_x);
        self.last_y = Some(filtered_y);

        (filtered_x, filtered_y)
    }

    fn reset(&mut self) {
        self.last_x = None;
        self.last_y = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::new(0.5);

        // First value passes through
        let (x1, y1) = filter.apply(10.0, 20.0, 0.0);
        assert_eq!(x1, 10.0);
        assert_eq!(y1, 20.0);

        // Second value is smoothed
        let (x2, y2) = filter.apply(20.0, 30.0, 0.1);
        assert_eq!(x2, 15.0); // 0.5 * 20 + 0.5 * 10
        assert_eq!(y2, 25.0);
    }

    #[test]
    fn test_alpha_bounds() {
        // High alpha = less smoothing
        let mut filter1 = ExponentialFilter::new(0.9);
        filter1.apply(10.0, 20.0, 0.0);
        let (x, _y) = filter1.apply(20.0, 30.0, 0.1);
        assert!((x - 19.0).abs() < 0.001);

        // Low alpha = more smoothing
        let mut filter2 = ExponentialFilter::new(0.1);
        filter2.apply(10.0, 20.0, 0.0);
        let (x, _y) = filter2.apply(20.0, 30.0, 0.1);
        assert!((x - 11.0).abs() < 0.001);
    }
}
