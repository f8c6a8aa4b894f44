//! Hands-free pointer input from head pose and facial gestures.
//!
//! This library turns webcam face tracking into a page-level input
//! device: head yaw/pitch drives an on-screen cursor (or scrolls the
//! page), and mouth-open / blink gestures trigger clicks. The pipeline:
//!
//! 1. Capture a frame from the camera (a [`session::VideoSource`])
//! 2. Detect face landmarks (a [`session::LandmarkDetector`])
//! 3. Reduce the mesh to mouth / eye ratios ([`geometry`])
//! 4. Map rotation to a cursor point or scroll command ([`mapper`])
//! 5. Smooth the point with a One-Euro filter ([`filters`])
//! 6. Turn ratio streams into debounced click events ([`gestures`])
//!
//! The camera, the landmark network and the click surface are external
//! collaborators behind traits, so the whole controller runs in tests
//! without hardware.
//!
//! # Examples
//!
//! ```no_run
//! use head_cursor::config::Config;
//! use head_cursor::session::TrackingController;
//!
//! # fn open_camera() -> head_cursor::session::SourceFactory { unimplemented!() }
//! # fn load_detector() -> head_cursor::session::DetectorFactory { unimplemented!() }
//! # fn surface() -> Box<dyn head_cursor::session::TargetSurface> { unimplemented!() }
//! # fn main() -> head_cursor::Result<()> {
//! let mut controller = TrackingController::new(Config::default(), surface(), open_camera(), load_detector())?;
//! controller.initialize()?;
//!
//! // Guided calibration: look straight ahead, then open wide
//! controller.start_calibration();
//! for i in 0..30 {
//!     controller.process_frame(f64::from(i) / 30.0);
//! }
//! controller.advance_calibration_step();
//! for i in 30..60 {
//!     controller.process_frame(f64::from(i) / 30.0);
//! }
//! controller.advance_calibration_step(); // auto-arms tracking
//!
//! // Live tracking: the host ticks once per displayed frame
//! let snapshot = controller.process_frame(2.0);
//! println!("cursor at {:?}", snapshot.cursor_position);
//!
//! controller.cleanup();
//! # Ok(())
//! # }
//! ```

/// Jitter-rejecting smoothers for the mapped cursor point
pub mod filters;

/// Face-mesh geometry: mouth-open ratio and eye openness
pub mod geometry;

/// Edge-triggered gesture detectors with debounce windows
pub mod gestures;

/// Two-step calibration state machine and calibrated thresholds
pub mod calibration;

/// Head rotation to cursor point / scroll command mapping
pub mod mapper;

/// Session controller: frame loop, lifecycle, collaborator traits
pub mod session;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
