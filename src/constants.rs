//! Constants used throughout the library

/// Requested camera capture width in pixels
pub const DEFAULT_CAMERA_WIDTH: u32 = 640;

/// Requested camera capture height in pixels
pub const DEFAULT_CAMERA_HEIGHT: u32 = 480;

/// Default horizontal cursor sensitivity (pixels per degree of yaw)
pub const DEFAULT_SENSITIVITY_X: f64 = 400.0;

/// Default vertical cursor sensitivity (pixels per degree of pitch)
pub const DEFAULT_SENSITIVITY_Y: f64 = 300.0;

/// Default mouth-open ratio threshold before calibration
pub const DEFAULT_MOUTH_THRESHOLD: f64 = 0.35;

/// Default eye-height threshold below which the eyes count as closed
pub const DEFAULT_BLINK_THRESHOLD: f64 = 0.5;

/// Fraction of calibrated resting eye openness that declares a blink
pub const BLINK_THRESHOLD_FRACTION: f64 = 0.4;

/// Fraction of the calibrated mouth-open peak that declares a click
pub const MOUTH_THRESHOLD_FRACTION: f64 = 0.7;

/// Eye openness reported when eye landmarks are unavailable.
/// Fails toward "eyes open" so degraded detection never fakes blinks.
pub const EYES_OPEN_SENTINEL: f64 = 1.0;

/// Minimum eyes-closed duration that counts as a deliberate blink
pub const BLINK_MIN_MS: u64 = 100;

/// Maximum eyes-closed duration that counts as a deliberate blink
pub const BLINK_MAX_MS: u64 = 400;

/// Global cooldown between accepted gesture clicks, shared across
/// gesture kinds and control modes
pub const CLICK_COOLDOWN_MS: u64 = 800;

/// How long the transient click indicator stays visible
pub const GESTURE_INDICATOR_MS: u64 = 200;

/// Pitch dead-zone in degrees around the calibrated center in scroll mode
pub const DEFAULT_DEAD_ZONE_DEG: f64 = 3.0;

/// Scroll magnitude in pixels per degree of pitch beyond the dead-zone
pub const DEFAULT_SCROLL_SPEED: f64 = 10.0;

/// Default One-Euro filter parameters
pub const DEFAULT_MIN_CUTOFF: f64 = 0.5;
pub const DEFAULT_BETA: f64 = 0.5;
pub const DEFAULT_D_CUTOFF: f64 = 1.0;

/// Default alpha for the exponential comparison filter
pub const DEFAULT_EXPONENTIAL_ALPHA: f64 = 0.5;
