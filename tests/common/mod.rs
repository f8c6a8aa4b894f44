//! Shared fixtures: scripted collaborators standing in for the camera,
//! the landmark detector and the host surface.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use head_cursor::config::Config;
use head_cursor::geometry;
use head_cursor::session::{
    DetectedFace, ElementHit, ElementId, Frame, LandmarkDetector, TargetSurface, TrackingController, VideoSource,
};
use head_cursor::{Error, Result};

pub const VIEWPORT: (f64, f64) = (1280.0, 800.0);

/// Build a synthetic face mesh producing the given ratios.
///
/// Mouth corners sit 40 units apart, so the lip separation is
/// `ratio * 40`. Eye openness is the eyelid separation directly.
pub fn face(yaw_deg: f64, pitch_deg: f64, mouth_ratio: f64, eye_openness: f64) -> DetectedFace {
    let mut mesh = vec![[0.0f64; 3]; 400];
    mesh[geometry::LEFT_CORNER] = [0.0, 20.0, 0.0];
    mesh[geometry::RIGHT_CORNER] = [40.0, 20.0, 0.0];
    mesh[geometry::TOP_LIP] = [20.0, 20.0, 0.0];
    mesh[geometry::BOTTOM_LIP] = [20.0, 20.0 + mouth_ratio * 40.0, 0.0];
    mesh[geometry::LEFT_EYE_TOP] = [10.0, 10.0, 0.0];
    mesh[geometry::LEFT_EYE_BOTTOM] = [10.0, 10.0 + eye_openness, 0.0];
    mesh[geometry::RIGHT_EYE_TOP] = [30.0, 10.0, 0.0];
    mesh[geometry::RIGHT_EYE_BOTTOM] = [30.0, 10.0 + eye_openness, 0.0];
    DetectedFace {
        mesh,
        yaw_rad: yaw_deg.to_radians(),
        pitch_rad: pitch_deg.to_radians(),
    }
}

/// What the scripted detector reports on the next `detect` calls
#[derive(Default)]
pub struct Script {
    /// Face returned on every detect; `None` means no face found
    pub face: Option<DetectedFace>,
    /// When set, the next detect fails with this message
    pub fail_next: Option<String>,
}

pub type SharedScript = Arc<Mutex<Script>>;

pub fn shared_script() -> SharedScript {
    Arc::new(Mutex::new(Script::default()))
}

pub fn set_face(script: &SharedScript, face: DetectedFace) {
    script.lock().unwrap().face = Some(face);
}

pub fn clear_face(script: &SharedScript) {
    script.lock().unwrap().face = None;
}

pub struct ScriptedCamera {
    pub released: Arc<AtomicUsize>,
}

impl VideoSource for ScriptedCamera {
    fn read(&mut self) -> Result<Option<Frame>> {
        Ok(Some(Frame {
            width: 640,
            height: 480,
            data: Vec::new(),
        }))
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct ScriptedDetector {
    pub script: SharedScript,
    pub released: Arc<AtomicUsize>,
}

impl LandmarkDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<DetectedFace>> {
        let mut script = self.script.lock().unwrap();
        if let Some(message) = script.fail_next.take() {
            return Err(Error::Detector(message));
        }
        Ok(script.face.clone().into_iter().collect())
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything the surface saw, for assertions
#[derive(Default)]
pub struct SurfaceLog {
    pub activations: Vec<ElementId>,
    pub scrolls: Vec<f64>,
    /// Hit returned by element_at; `None` simulates a hit-test miss
    pub hit: Option<ElementHit>,
}

pub type SharedLog = Arc<Mutex<SurfaceLog>>;

pub fn shared_log() -> SharedLog {
    Arc::new(Mutex::new(SurfaceLog {
        hit: Some(ElementHit {
            element: ElementId(1),
            interactive_ancestor: None,
        }),
        ..SurfaceLog::default()
    }))
}

pub struct RecordingSurface {
    pub log: SharedLog,
}

impl TargetSurface for RecordingSurface {
    fn viewport_size(&self) -> (f64, f64) {
        VIEWPORT
    }

    fn element_at(&self, _x: f64, _y: f64) -> Option<ElementHit> {
        self.log.lock().unwrap().hit
    }

    fn activate(&mut self, element: ElementId) -> Result<()> {
        self.log.lock().unwrap().activations.push(element);
        Ok(())
    }

    fn scroll_by(&mut self, amount: f64) -> Result<()> {
        self.log.lock().unwrap().scrolls.push(amount);
        Ok(())
    }
}

/// Release counters for asserting exactly-once teardown
pub struct ReleaseCounters {
    pub camera: Arc<AtomicUsize>,
    pub detector: Arc<AtomicUsize>,
}

pub fn controller(config: Config, script: &SharedScript, log: &SharedLog) -> (TrackingController, ReleaseCounters) {
    let camera_released = Arc::new(AtomicUsize::new(0));
    let detector_released = Arc::new(AtomicUsize::new(0));
    let counters = ReleaseCounters {
        camera: Arc::clone(&camera_released),
        detector: Arc::clone(&detector_released),
    };

    let script = Arc::clone(script);
    let controller = TrackingController::new(
        config,
        Box::new(RecordingSurface { log: Arc::clone(log) }),
        Box::new(move |_width, _height| {
            Ok(Box::new(ScriptedCamera {
                released: Arc::clone(&camera_released),
            }) as Box<dyn VideoSource>)
        }),
        Box::new(move || {
            Ok(Box::new(ScriptedDetector {
                script: Arc::clone(&script),
                released: Arc::clone(&detector_released),
            }) as Box<dyn LandmarkDetector>)
        }),
    )
    .expect("controller construction");

    (controller, counters)
}

/// Controller that is initialized and tracking with default thresholds
pub fn tracking_controller(config: Config, script: &SharedScript, log: &SharedLog) -> TrackingController {
    let (mut controller, _) = self::controller(config, script, log);
    controller.initialize().expect("initialize");
    controller.start_tracking();
    controller
}
