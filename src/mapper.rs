//! Coordinate mapper: head rotation into cursor points or scroll commands.
//!
//! Pure functions; all tuning constants come from configuration so the
//! "feel" can be adjusted without code changes.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationData;
use crate::constants::{DEFAULT_DEAD_ZONE_DEG, DEFAULT_SCROLL_SPEED};

/// Which branch of the mapper runs each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Head rotation moves an absolute on-screen cursor
    Cursor,
    /// Head pitch scrolls the page
    Scroll,
}

impl Default for ControlMode {
    fn default() -> Self {
        Self::Cursor
    }
}

impl ControlMode {
    /// The other mode, for user toggling
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cursor => Self::Scroll,
            Self::Scroll => Self::Cursor,
        }
    }
}

/// Direction of an issued scroll command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    None,
}

/// Mapper tuning knobs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Pitch dead-zone in degrees around the calibrated center
    pub dead_zone_deg: f64,
    /// Scroll pixels per degree of pitch beyond the dead-zone
    pub scroll_speed: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            dead_zone_deg: DEFAULT_DEAD_ZONE_DEG,
            scroll_speed: DEFAULT_SCROLL_SPEED,
        }
    }
}

/// Map head rotation to an absolute screen point, clamped to the
/// viewport. Offsets from the calibrated center are scaled by the
/// per-axis sensitivities and applied around the viewport center.
#[must_use]
pub fn map_cursor(
    yaw_deg: f64,
    pitch_deg: f64,
    calibration: &CalibrationData,
    viewport: (f64, f64),
) -> (f64, f64) {
    let (width, height) = viewport;
    let raw_x = (yaw_deg - calibration.center_yaw).mul_add(calibration.sensitivity_x, width / 2.0);
    let raw_y = (pitch_deg - calibration.center_pitch).mul_add(calibration.sensitivity_y, height / 2.0);
    (raw_x.clamp(0.0, width), raw_y.clamp(0.0, height))
}

/// Map head pitch to a scroll command.
///
/// Inside the dead-zone no scroll is issued and the direction is
/// `None`. Outside it, magnitude scales with how far pitch exceeds the
/// dead-zone; positive pitch delta scrolls down. The returned amount is
/// signed: positive means down.
#[must_use]
pub fn map_scroll(pitch_deg: f64, calibration: &CalibrationData, config: &MapperConfig) -> (ScrollDirection, f64) {
    let delta = pitch_deg - calibration.center_pitch;
    if delta.abs() <= config.dead_zone_deg {
        return (ScrollDirection::None, 0.0);
    }

    let excess = delta.abs() - config.dead_zone_deg;
    let amount = excess * config.scroll_speed;
    if delta > 0.0 {
        (ScrollDirection::Down, amount)
    } else {
        (ScrollDirection::Up, -amount)
    }
}
