//! Configuration management for the head-cursor pipeline

use crate::constants::{
    BLINK_MAX_MS, BLINK_MIN_MS, CLICK_COOLDOWN_MS, DEFAULT_BETA, DEFAULT_CAMERA_HEIGHT, DEFAULT_CAMERA_WIDTH,
    DEFAULT_D_CUTOFF, DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MIN_CUTOFF, GESTURE_INDICATOR_MS,
};
use crate::filters::{create_filter, exponential::ExponentialFilter, one_euro::OneEuroFilter2D, PointFilter};
use crate::gestures::ClickMethod;
use crate::mapper::{ControlMode, MapperConfig};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera capture configuration
    pub camera: CameraConfig,

    /// Cursor smoothing filter configuration
    pub filter: FilterConfig,

    /// Coordinate mapper tuning
    pub mapper: MapperConfig,

    /// Gesture timing configuration
    pub gesture: GestureConfig,

    /// Initial control mode
    pub control_mode: ControlMode,

    /// Initial click method
    pub click_method: ClickMethod,
}

/// Camera capture parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Requested capture width in pixels
    pub width: u32,

    /// Requested capture height in pixels
    pub height: u32,

    /// Prefer a user-facing camera when several are available
    pub prefer_front: bool,
}

/// Filter selection and parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Filter type: "one_euro", "exponential" or "none"
    pub kind: String,

    /// One-Euro baseline smoothing strength
    pub min_cutoff: f64,

    /// One-Euro speed-sensitivity coefficient
    pub beta: f64,

    /// One-Euro derivative smoothing cutoff
    pub d_cutoff: f64,

    /// Exponential filter alpha value
    pub exponential_alpha: f64,
}

/// Gesture timing windows, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum eyes-closed duration that counts as a blink
    pub blink_min_ms: u64,

    /// Maximum eyes-closed duration that counts as a blink
    pub blink_max_ms: u64,

    /// Global cooldown between accepted gesture clicks
    pub click_cooldown_ms: u64,

    /// How long the transient click indicator stays set
    pub indicator_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            filter: FilterConfig::default(),
            mapper: MapperConfig::default(),
            gesture: GestureConfig::default(),
            control_mode: ControlMode::default(),
            click_method: ClickMethod::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CAMERA_WIDTH,
            height: DEFAULT_CAMERA_HEIGHT,
            prefer_front: true,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: "one_euro".to_string(),
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: DEFAULT_BETA,
            d_cutoff: DEFAULT_D_CUTOFF,
            exponential_alpha: DEFAULT_EXPONENTIAL_ALPHA,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            blink_min_ms: BLINK_MIN_MS,
            blink_max_ms: BLINK_MAX_MS,
            click_cooldown_ms: CLICK_COOLDOWN_MS,
            indicator_ms: GESTURE_INDICATOR_MS,
        }
    }
}

impl GestureConfig {
    /// Blink acceptance window lower bound in seconds
    #[must_use]
    pub fn blink_min_s(&self) -> f64 {
        self.blink_min_ms as f64 / 1000.0
    }

    /// Blink acceptance window upper bound in seconds
    #[must_use]
    pub fn blink_max_s(&self) -> f64 {
        self.blink_max_ms as f64 / 1000.0
    }

    /// Click cooldown in seconds
    #[must_use]
    pub fn click_cooldown_s(&self) -> f64 {
        self.click_cooldown_ms as f64 / 1000.0
    }

    /// Indicator lifetime in seconds
    #[must_use]
    pub fn indicator_s(&self) -> f64 {
        self.indicator_ms as f64 / 1000.0
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create the cursor filter described by this configuration
    pub fn create_filter(&self) -> Result<Box<dyn PointFilter>> {
        match self.filter.kind.as_str() {
            "one_euro" => Ok(Box::new(OneEuroFilter2D::new(
                self.filter.min_cutoff,
                self.filter.beta,
                self.filter.d_cutoff,
            ))),
            "exponential" => Ok(Box::new(ExponentialFilter::new(self.filter.exponential_alpha))),
            name => create_filter(name),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(Error::Config("Camera resolution must be non-zero".to_string()));
        }

        if self.filter.min_cutoff <= 0.0 || self.filter.d_cutoff <= 0.0 {
            return Err(Error::Config(
                "Filter cutoff frequencies must be greater than 0".to_string(),
            ));
        }
        if self.filter.beta < 0.0 {
            return Err(Error::Config("Filter beta must not be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.filter.exponential_alpha) || self.filter.exponential_alpha == 0.0 {
            return Err(Error::Config("Exponential alpha must be in (0, 1]".to_string()));
        }

        if self.mapper.dead_zone_deg < 0.0 {
            return Err(Error::Config("Dead-zone must not be negative".to_string()));
        }
        if self.mapper.scroll_speed <= 0.0 {
            return Err(Error::Config("Scroll speed must be greater than 0".to_string()));
        }

        if self.gesture.blink_min_ms >= self.gesture.blink_max_ms {
            return Err(Error::Config(
                "Blink window minimum must be below its maximum".to_string(),
            ));
        }
        if self.gesture.click_cooldown_ms == 0 {
            return Err(Error::Config("Click cooldown must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head-cursor configuration

# Camera capture
camera:
  width: 640
  height: 480
  prefer_front: true

# Cursor smoothing
filter:
  kind: "one_euro"
  min_cutoff: 0.5
  beta: 0.5
  d_cutoff: 1.0
  exponential_alpha: 0.5

# Mapper tuning
mapper:
  dead_zone_deg: 3.0
  scroll_speed: 10.0

# Gesture timing (milliseconds)
gesture:
  blink_min_ms: 100
  blink_max_ms: 400
  click_cooldown_ms: 800
  indicator_ms: 200

control_mode: cursor
click_method: both
"#;
