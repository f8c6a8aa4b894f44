//! Tracking session controller: the per-frame cycle and its lifecycle.
//!
//! One `TrackingController` owns the camera, the landmark detector, the
//! cursor filter, the calibration state and the gesture detectors. All
//! mutable state is mutated either from `process_frame` or from the
//! explicit control calls; there is no cross-thread mutation and no
//! locking. The camera and detector are collaborators behind traits so
//! the whole state machine is testable without hardware.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::calibration::{CalibrationAdvance, CalibrationData, Calibrator};
use crate::config::Config;
use crate::filters::PointFilter;
use crate::geometry;
use crate::gestures::{BlinkDetector, ClickMethod, GestureEvent, GestureKind, MouthOpenDetector};
use crate::mapper::{self, ControlMode, ScrollDirection};
use crate::Result;

/// A captured camera frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Packed RGB pixel data
    pub data: Vec<u8>,
}

/// One detected face: the landmark mesh and the rotation estimate
#[derive(Debug, Clone)]
pub struct DetectedFace {
    /// Ordered 3-D landmark points
    pub mesh: Vec<geometry::MeshPoint>,
    /// Head yaw in radians
    pub yaw_rad: f64,
    /// Head pitch in radians
    pub pitch_rad: f64,
}

/// Live camera stream supplying frames on demand
pub trait VideoSource: Send {
    /// Read the current frame; `None` means no frame was available yet
    fn read(&mut self) -> Result<Option<Frame>>;

    /// Stop capture. Called exactly once during teardown.
    fn release(&mut self);
}

/// External face landmark detector
pub trait LandmarkDetector: Send {
    /// Detect zero or more faces in a frame
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>>;

    /// Release the model handle. Called exactly once during teardown.
    fn release(&mut self);
}

/// Opaque handle to an element on the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Result of a point hit-test against the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHit {
    /// The element directly under the point
    pub element: ElementId,
    /// The nearest enclosing interactive ancestor (link or button),
    /// if any. A click prefers this over the raw element so a hit on a
    /// text node inside a link still activates the link.
    pub interactive_ancestor: Option<ElementId>,
}

/// The host document surface the session clicks and scrolls against
pub trait TargetSurface: Send {
    /// Current viewport size in pixels
    fn viewport_size(&self) -> (f64, f64);

    /// Hit-test the element at a point, if any
    fn element_at(&self, x: f64, y: f64) -> Option<ElementHit>;

    /// Issue a synthetic activation on an element
    fn activate(&mut self, element: ElementId) -> Result<()>;

    /// Scroll the viewport; positive amounts scroll down
    fn scroll_by(&mut self, amount: f64) -> Result<()>;
}

/// Opens the camera at a requested resolution
pub type SourceFactory = Box<dyn FnMut(u32, u32) -> Result<Box<dyn VideoSource>> + Send>;

/// Loads the landmark detector model
pub type DetectorFactory = Box<dyn FnMut() -> Result<Box<dyn LandmarkDetector>> + Send>;

/// Per-frame readings derived from one detected face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameObservation {
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub mouth_ratio: f64,
    pub eye_openness: f64,
}

/// Observable state emitted after every processed frame
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSnapshot {
    pub is_initialized: bool,
    pub is_calibrating: bool,
    pub calibration_step: u8,
    pub cursor_position: (f64, f64),
    pub is_mouth_open: bool,
    pub is_blinking: bool,
    pub is_tracking: bool,
    pub control_mode: ControlMode,
    pub scroll_direction: ScrollDirection,
    pub click_method: ClickMethod,
    pub error: Option<String>,
}

/// The aggregate root: owns all session resources and mutable state
pub struct TrackingController {
    config: Config,
    surface: Box<dyn TargetSurface>,
    source_factory: SourceFactory,
    detector_factory: DetectorFactory,

    source: Option<Box<dyn VideoSource>>,
    detector: Option<Box<dyn LandmarkDetector>>,

    filter: Box<dyn PointFilter>,
    calibration: CalibrationData,
    calibrator: Calibrator,
    mouth: MouthOpenDetector,
    blink: BlinkDetector,

    control_mode: ControlMode,
    click_method: ClickMethod,
    tracking: bool,
    cursor: (f64, f64),
    scroll_direction: ScrollDirection,
    last_click_at: Option<f64>,
    active_gesture: Option<GestureEvent>,
    error: Option<String>,
}

impl TrackingController {
    /// Create a controller. The camera and detector are not acquired
    /// until `initialize`.
    pub fn new(
        config: Config,
        surface: Box<dyn TargetSurface>,
        source_factory: SourceFactory,
        detector_factory: DetectorFactory,
    ) -> Result<Self> {
        config.validate()?;
        let filter = config.create_filter()?;
        let blink = BlinkDetector::new(config.gesture.blink_min_s(), config.gesture.blink_max_s());
        let (width, height) = surface.viewport_size();
        let control_mode = config.control_mode;
        let click_method = config.click_method;

        Ok(Self {
            config,
            surface,
            source_factory,
            detector_factory,
            source: None,
            detector: None,
            filter,
            calibration: CalibrationData::default(),
            calibrator: Calibrator::new(),
            mouth: MouthOpenDetector::new(),
            blink,
            control_mode,
            click_method,
            tracking: false,
            cursor: (width / 2.0, height / 2.0),
            scroll_direction: ScrollDirection::None,
            last_click_at: None,
            active_gesture: None,
            error: None,
        })
    }

    /// Acquire the camera and load the detector. Idempotent: a second
    /// call while initialized is a no-op. On failure the error string
    /// is surfaced on the snapshot and nothing is left half-acquired.
    pub fn initialize(&mut self) -> Result<()> {
        if self.is_initialized() {
            debug!("initialize called while already initialized");
            return Ok(());
        }
        self.error = None;

        let camera = self.config.camera.clone();
        info!("Opening camera at {}x{}", camera.width, camera.height);
        let source = match (self.source_factory)(camera.width, camera.height) {
            Ok(source) => source,
            Err(e) => {
                warn!("Camera acquisition failed: {e}");
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        info!("Loading landmark detector");
        match (self.detector_factory)() {
            Ok(detector) => {
                self.source = Some(source);
                self.detector = Some(detector);
                info!("Session initialized");
                Ok(())
            }
            Err(e) => {
                warn!("Detector load failed: {e}");
                let mut source = source;
                source.release();
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Whether camera and detector are both held
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.source.is_some() && self.detector.is_some()
    }

    /// Begin the two-step calibration sequence from step 1. Tracking is
    /// suspended until the sequence completes.
    pub fn start_calibration(&mut self) {
        if !self.is_initialized() {
            warn!("start_calibration called before initialize");
            return;
        }
        self.tracking = false;
        self.calibrator.start();
    }

    /// Complete the current calibration step. Finishing the final step
    /// resets the filter and auto-transitions into tracking.
    pub fn advance_calibration_step(&mut self) {
        match self.calibrator.advance(&mut self.calibration) {
            CalibrationAdvance::Finished => {
                // Stale smoothing state must not bridge calibration
                self.filter.reset();
                self.mouth.reset();
                self.blink.reset();
                self.tracking = true;
                info!("Calibration finished, tracking armed");
            }
            CalibrationAdvance::InProgress => {}
            CalibrationAdvance::NotCalibrating => {
                debug!("advance_calibration_step called while not calibrating");
            }
        }
    }

    /// Start the frame loop (calibration may be skipped: defaults apply)
    pub fn start_tracking(&mut self) {
        if !self.is_initialized() {
            warn!("start_tracking called before initialize");
            return;
        }
        if self.calibrator.is_active() {
            warn!("start_tracking called while calibrating");
            return;
        }
        if !self.tracking {
            self.filter.reset();
            self.mouth.reset();
            self.blink.reset();
            self.tracking = true;
            info!("Tracking started");
        }
    }

    /// Stop the frame loop. Safe to call when already stopped.
    pub fn stop_tracking(&mut self) {
        if self.tracking {
            info!("Tracking stopped");
        }
        self.tracking = false;
        self.scroll_direction = ScrollDirection::None;
    }

    /// Switch which gesture detectors are evaluated
    pub fn set_click_method(&mut self, method: ClickMethod) {
        self.click_method = method;
        self.mouth.reset();
        self.blink.reset();
    }

    /// Switch between cursor and scroll control
    pub fn set_control_mode(&mut self, mode: ControlMode) {
        if self.control_mode != mode {
            self.control_mode = mode;
            self.filter.reset();
            self.scroll_direction = ScrollDirection::None;
        }
    }

    /// Flip to the other control mode
    pub fn toggle_control_mode(&mut self) {
        self.set_control_mode(self.control_mode.toggled());
    }

    /// Current control mode
    #[must_use]
    pub fn control_mode(&self) -> ControlMode {
        self.control_mode
    }

    /// The calibrated thresholds currently in effect
    #[must_use]
    pub fn calibration_data(&self) -> &CalibrationData {
        &self.calibration
    }

    /// The gesture event driving the transient click indicator, if one
    /// is still within its display window
    #[must_use]
    pub fn active_gesture(&self) -> Option<&GestureEvent> {
        self.active_gesture.as_ref()
    }

    /// Full teardown. Idempotent: camera and detector are released
    /// exactly once no matter how often this is called.
    pub fn cleanup(&mut self) {
        self.stop_tracking();
        if let Some(mut source) = self.source.take() {
            source.release();
            info!("Camera released");
        }
        if let Some(mut detector) = self.detector.take() {
            detector.release();
            info!("Detector released");
        }
        self.calibrator = Calibrator::new();
        self.active_gesture = None;
    }

    /// Run one frame of the cooperative cycle at time `now` (seconds).
    ///
    /// Transient failures (no frame, detection error, no face) skip the
    /// frame silently; the caller schedules the next cycle regardless.
    pub fn process_frame(&mut self, now: f64) -> TrackingSnapshot {
        self.expire_indicator(now);

        if !(self.tracking || self.calibrator.is_active()) {
            return self.snapshot();
        }

        let (Some(source), Some(detector)) = (self.source.as_mut(), self.detector.as_mut()) else {
            return self.snapshot();
        };

        let frame = match source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                debug!("No frame available, skipping cycle");
                return self.snapshot();
            }
            Err(e) => {
                debug!("Frame capture failed, skipping cycle: {e}");
                return self.snapshot();
            }
        };

        let faces = match detector.detect(&frame) {
            Ok(faces) => faces,
            Err(e) => {
                debug!("Detection failed, skipping cycle: {e}");
                return self.snapshot();
            }
        };
        let Some(face) = faces.first() else {
            return self.snapshot();
        };

        let observation = FrameObservation {
            yaw_deg: face.yaw_rad.to_degrees(),
            pitch_deg: face.pitch_rad.to_degrees(),
            mouth_ratio: geometry::mouth_open_ratio(&face.mesh),
            eye_openness: geometry::eye_openness(&face.mesh),
        };

        if self.calibrator.is_active() {
            self.calibrator.record(
                observation.yaw_deg,
                observation.pitch_deg,
                observation.mouth_ratio,
                observation.eye_openness,
            );
            return self.snapshot();
        }

        let gesture_target = match self.control_mode {
            ControlMode::Cursor => {
                let raw = mapper::map_cursor(
                    observation.yaw_deg,
                    observation.pitch_deg,
                    &self.calibration,
                    self.surface.viewport_size(),
                );
                let filtered = self.filter.apply(raw.0, raw.1, now);
                self.cursor = filtered;
                self.scroll_direction = ScrollDirection::None;
                filtered
            }
            ControlMode::Scroll => {
                let (direction, amount) = mapper::map_scroll(observation.pitch_deg, &self.calibration, &self.config.mapper);
                if direction != ScrollDirection::None {
                    if let Err(e) = self.surface.scroll_by(amount) {
                        debug!("Scroll command failed: {e}");
                    }
                }
                self.scroll_direction = direction;
                // No visible cursor in scroll mode; gestures target the
                // viewport center
                let (width, height) = self.surface.viewport_size();
                (width / 2.0, height / 2.0)
            }
        };

        self.evaluate_gestures(&observation, gesture_target, now);
        self.snapshot()
    }

    /// Drive the frame loop until tracking stops or `stop` is set.
    ///
    /// Cancellation is checked every iteration, so `stop` gives control
    /// calls from elsewhere a single race-free way to end the loop.
    pub fn run(&mut self, stop: &Arc<AtomicBool>, frame_interval: Duration) {
        let epoch = Instant::now();
        while !stop.load(Ordering::Relaxed) && (self.tracking || self.calibrator.is_active()) {
            self.process_frame(epoch.elapsed().as_secs_f64());
            std::thread::sleep(frame_interval);
        }
    }

    /// Build the observable state snapshot
    #[must_use]
    pub fn snapshot(&self) -> TrackingSnapshot {
        TrackingSnapshot {
            is_initialized: self.is_initialized(),
            is_calibrating: self.calibrator.is_active(),
            calibration_step: self.calibrator.step_number(),
            cursor_position: self.cursor,
            is_mouth_open: matches!(
                self.active_gesture,
                Some(GestureEvent {
                    kind: GestureKind::MouthOpened,
                    ..
                })
            ),
            is_blinking: matches!(
                self.active_gesture,
                Some(GestureEvent {
                    kind: GestureKind::BlinkCompleted,
                    ..
                })
            ),
            is_tracking: self.tracking,
            control_mode: self.control_mode,
            scroll_direction: self.scroll_direction,
            click_method: self.click_method,
            error: self.error.clone(),
        }
    }

    fn evaluate_gestures(&mut self, observation: &FrameObservation, target: (f64, f64), now: f64) {
        let (mouth_enabled, blink_enabled) = match self.click_method {
            ClickMethod::Mouth => (true, false),
            ClickMethod::Blink => (false, true),
            ClickMethod::Both => (true, true),
        };

        if mouth_enabled && self.mouth.update(observation.mouth_ratio, self.calibration.mouth_threshold) {
            self.trigger_click(target.0, target.1, GestureKind::MouthOpened, now);
        }
        if blink_enabled
            && self
                .blink
                .update(observation.eye_openness, self.calibration.blink_threshold, now)
        {
            self.trigger_click(target.0, target.1, GestureKind::BlinkCompleted, now);
        }
    }

    /// Accept a gesture click unless the global cooldown suppresses it.
    /// The cooldown is shared across gesture kinds and control modes.
    fn trigger_click(&mut self, x: f64, y: f64, kind: GestureKind, now: f64) {
        if let Some(last) = self.last_click_at {
            if now - last < self.config.gesture.click_cooldown_s() {
                debug!("Click suppressed by cooldown");
                return;
            }
        }
        self.last_click_at = Some(now);
        self.active_gesture = Some(GestureEvent {
            kind,
            x,
            y,
            timestamp: now,
        });

        if let Some(hit) = self.surface.element_at(x, y) {
            let element = hit.interactive_ancestor.unwrap_or(hit.element);
            debug!("Activating element {element:?} at ({x:.0}, {y:.0})");
            if let Err(e) = self.surface.activate(element) {
                debug!("Activation failed: {e}");
            }
        }
        // A click resolving to no element does nothing; not an error
    }

    fn expire_indicator(&mut self, now: f64) {
        if let Some(event) = &self.active_gesture {
            if now - event.timestamp >= self.config.gesture.indicator_s() {
                self.active_gesture = None;
            }
        }
    }
}

impl Drop for TrackingController {
    fn drop(&mut self) {
        self.cleanup();
    }
}
