//! Gesture detectors: continuous ratios in, discrete debounced events out.
//!
//! Both detectors are edge-triggered. The mouth detector fires once on
//! the closed-to-open transition; the blink detector fires on the
//! closed-to-open transition only when the closed duration falls inside
//! the blink window, rejecting both detector flicker and deliberate
//! prolonged eye closure.

use serde::{Deserialize, Serialize};

/// Which gesture detectors are evaluated for clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickMethod {
    /// Mouth-open gesture only
    Mouth,
    /// Blink gesture only
    Blink,
    /// Either gesture, sharing the click cooldown
    Both,
}

impl Default for ClickMethod {
    fn default() -> Self {
        Self::Both
    }
}

/// Kind of discrete gesture event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Mouth crossed the calibrated open threshold
    MouthOpened,
    /// A blink completed inside the duration window
    BlinkCompleted,
}

/// A discrete gesture event at the coordinate where it was detected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    /// Cursor (or reference) position at detection time
    pub x: f64,
    pub y: f64,
    /// Seconds timestamp of the detection
    pub timestamp: f64,
}

/// Mouth-open edge detector.
///
/// Fires on the closed-to-open transition only, never while held open.
#[derive(Debug, Default)]
pub struct MouthOpenDetector {
    was_open: bool,
}

impl MouthOpenDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with the current mouth ratio; returns true when the mouth
    /// just crossed the threshold from closed to open.
    pub fn update(&mut self, ratio: f64, threshold: f64) -> bool {
        let open = ratio > threshold;
        let fired = open && !self.was_open;
        self.was_open = open;
        fired
    }

    /// Whether the mouth was open at the last update
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.was_open
    }

    /// Clear edge state
    pub fn reset(&mut self) {
        self.was_open = false;
    }
}

/// Blink detector with a closed-duration acceptance window.
#[derive(Debug)]
pub struct BlinkDetector {
    min_duration: f64,
    max_duration: f64,
    closed_since: Option<f64>,
}

impl BlinkDetector {
    /// Create a detector accepting closed durations in
    /// `[min_duration, max_duration]` seconds, inclusive.
    #[must_use]
    pub fn new(min_duration: f64, max_duration: f64) -> Self {
        Self {
            min_duration,
            max_duration,
            closed_since: None,
        }
    }

    /// Update with the current eye openness at time `now` (seconds);
    /// returns true when a completed closure qualifies as a blink.
    pub fn update(&mut self, eye_openness: f64, threshold: f64, now: f64) -> bool {
        let closed = eye_openness < threshold;
        match (closed, self.closed_since) {
            (true, None) => {
                self.closed_since = Some(now);
                false
            }
            (true, Some(_)) => false,
            (false, Some(start)) => {
                self.closed_since = None;
                let duration = now - start;
                duration >= self.min_duration && duration <= self.max_duration
            }
            (false, None) => false,
        }
    }

    /// Whether the eyes were closed at the last update
    #[must_use]
    pub const fn eyes_closed(&self) -> bool {
        self.closed_since.is_some()
    }

    /// Clear closure state
    pub fn reset(&mut self) {
        self.closed_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 0.1;
    const MAX: f64 = 0.4;

    #[test]
    fn test_mouth_fires_on_edge_only() {
        let mut detector = MouthOpenDetector::new();
        assert!(!detector.update(0.1, 0.35));
        assert!(detector.update(0.5, 0.35));
        // Held open: no repeat fire
        assert!(!detector.update(0.6, 0.35));
        assert!(!detector.update(0.1, 0.35));
        assert!(detector.update(0.5, 0.35));
    }

    #[test]
    fn test_mouth_reset_clears_edge() {
        let mut detector = MouthOpenDetector::new();
        detector.update(0.5, 0.35);
        detector.reset();
        assert!(detector.update(0.5, 0.35));
    }

    #[test]
    fn test_blink_window_boundaries() {
        // Exactly min and max durations fire
        for duration in [MIN, MAX] {
            let mut detector = BlinkDetector::new(MIN, MAX);
            assert!(!detector.update(0.1, 0.5, 1.0));
            assert!(detector.update(1.0, 0.5, 1.0 + duration));
        }
        // Just outside the window does not
        for duration in [MIN - 0.001, MAX + 0.001] {
            let mut detector = BlinkDetector::new(MIN, MAX);
            assert!(!detector.update(0.1, 0.5, 1.0));
            assert!(!detector.update(1.0, 0.5, 1.0 + duration));
        }
    }

    #[test]
    fn test_blink_rejection_resets_state() {
        let mut detector = BlinkDetector::new(MIN, MAX);
        // Over-long closure rejected, state cleared for the next cycle
        detector.update(0.1, 0.5, 0.0);
        assert!(!detector.update(1.0, 0.5, 1.0));
        assert!(!detector.eyes_closed());
        detector.update(0.1, 0.5, 2.0);
        assert!(detector.update(1.0, 0.5, 2.2));
    }

    #[test]
    fn test_blink_open_eyes_no_event() {
        let mut detector = BlinkDetector::new(MIN, MAX);
        for i in 0..10 {
            assert!(!detector.update(1.0, 0.5, f64::from(i) * 0.033));
        }
    }
}
