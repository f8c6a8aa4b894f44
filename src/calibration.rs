//! Two-step guided calibration.
//!
//! Step 1 captures the neutral head pose and the resting eye openness
//! while the user looks straight ahead; step 2 captures the mouth-open
//! extremum. Completing a step derives the runtime thresholds consumed
//! by the gesture detectors and the coordinate mapper.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{
    BLINK_THRESHOLD_FRACTION, DEFAULT_BLINK_THRESHOLD, DEFAULT_MOUTH_THRESHOLD, DEFAULT_SENSITIVITY_X,
    DEFAULT_SENSITIVITY_Y, MOUTH_THRESHOLD_FRACTION,
};

/// Calibrated mapping and gesture thresholds.
///
/// Created with defaults at session start, mutated only by calibration
/// step completion, read-only during live tracking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationData {
    /// Neutral yaw in degrees
    pub center_yaw: f64,
    /// Neutral pitch in degrees
    pub center_pitch: f64,
    /// Horizontal sensitivity, pixels per degree
    pub sensitivity_x: f64,
    /// Vertical sensitivity, pixels per degree
    pub sensitivity_y: f64,
    /// Mouth-open ratio above which the mouth counts as open
    pub mouth_threshold: f64,
    /// Eye height below which the eyes count as closed
    pub blink_threshold: f64,
}

impl Default for CalibrationData {
    fn default() -> Self {
        Self {
            center_yaw: 0.0,
            center_pitch: 0.0,
            sensitivity_x: DEFAULT_SENSITIVITY_X,
            sensitivity_y: DEFAULT_SENSITIVITY_Y,
            mouth_threshold: DEFAULT_MOUTH_THRESHOLD,
            blink_threshold: DEFAULT_BLINK_THRESHOLD,
        }
    }
}

/// Current calibration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStep {
    /// Not calibrating
    Idle,
    /// Step 1: capture neutral pose and resting eye openness
    CaptureCenter,
    /// Step 2: capture the mouth-open extremum
    CaptureMouth,
}

/// Result of advancing the calibration sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationAdvance {
    /// Moved on to the next capture step
    InProgress,
    /// Final step completed; tracking may be armed
    Finished,
    /// Advance called while not calibrating
    NotCalibrating,
}

/// State machine driving the two-step capture sequence
#[derive(Debug, Default)]
pub struct Calibrator {
    step: Option<CalibrationStep>,
    yaw_samples: Vec<f64>,
    pitch_samples: Vec<f64>,
    eye_samples: Vec<f64>,
    mouth_samples: Vec<f64>,
}

impl Calibrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or restart) the sequence from step 1, clearing buffers
    pub fn start(&mut self) {
        info!("Calibration started");
        self.clear_buffers();
        self.step = Some(CalibrationStep::CaptureCenter);
    }

    /// Record one frame's readings into the active step's buffers.
    /// No thresholding happens here; this is pure data collection.
    pub fn record(&mut self, yaw_deg: f64, pitch_deg: f64, mouth_ratio: f64, eye_openness: f64) {
        match self.step {
            Some(CalibrationStep::CaptureCenter) => {
                self.yaw_samples.push(yaw_deg);
                self.pitch_samples.push(pitch_deg);
                self.eye_samples.push(eye_openness);
            }
            Some(CalibrationStep::CaptureMouth) => {
                self.mouth_samples.push(mouth_ratio);
            }
            Some(CalibrationStep::Idle) | None => {}
        }
    }

    /// Complete the active step, deriving thresholds into `data`.
    ///
    /// A step completed with zero collected samples leaves the prior
    /// values untouched, so an aborted capture never writes NaN.
    pub fn advance(&mut self, data: &mut CalibrationData) -> CalibrationAdvance {
        match self.step {
            Some(CalibrationStep::CaptureCenter) => {
                if !self.yaw_samples.is_empty() {
                    data.center_yaw = mean(&self.yaw_samples);
                    data.center_pitch = mean(&self.pitch_samples);
                }
                if !self.eye_samples.is_empty() {
                    data.blink_threshold = BLINK_THRESHOLD_FRACTION * mean(&self.eye_samples);
                }
                debug!(
                    "Center captured: yaw={:.2} pitch={:.2} blink_threshold={:.3}",
                    data.center_yaw, data.center_pitch, data.blink_threshold
                );
                self.clear_buffers();
                self.step = Some(CalibrationStep::CaptureMouth);
                CalibrationAdvance::InProgress
            }
            Some(CalibrationStep::CaptureMouth) => {
                if let Some(peak) = self.mouth_samples.iter().copied().fold(None, max_sample) {
                    data.mouth_threshold = MOUTH_THRESHOLD_FRACTION * peak;
                }
                info!("Calibration complete: mouth_threshold={:.3}", data.mouth_threshold);
                self.clear_buffers();
                self.step = None;
                CalibrationAdvance::Finished
            }
            Some(CalibrationStep::Idle) | None => CalibrationAdvance::NotCalibrating,
        }
    }

    /// Whether a capture step is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self.step,
            Some(CalibrationStep::CaptureCenter | CalibrationStep::CaptureMouth)
        )
    }

    /// Step number reported to the presentation layer: 0 when idle,
    /// 1 during center capture, 2 during mouth capture
    #[must_use]
    pub fn step_number(&self) -> u8 {
        match self.step {
            Some(CalibrationStep::CaptureCenter) => 1,
            Some(CalibrationStep::CaptureMouth) => 2,
            Some(CalibrationStep::Idle) | None => 0,
        }
    }

    fn clear_buffers(&mut self) {
        self.yaw_samples.clear();
        self.pitch_samples.clear();
        self.eye_samples.clear();
        self.mouth_samples.clear();
    }
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn max_sample(acc: Option<f64>, x: f64) -> Option<f64> {
    Some(acc.map_or(x, |m| m.max(x)))
}
