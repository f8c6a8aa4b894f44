//! Demo binary: runs the head-cursor pipeline against a scripted
//! camera and detector, logging the emitted state snapshots. Useful for
//! smoke-testing the controller and tuning filter parameters without a
//! webcam.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use head_cursor::config::Config;
use head_cursor::geometry;
use head_cursor::gestures::ClickMethod;
use head_cursor::mapper::ControlMode;
use head_cursor::session::{
    DetectedFace, ElementHit, ElementId, Frame, LandmarkDetector, TargetSurface, TrackingController, VideoSource,
};

/// Scripted detector phases, switched by the demo driver
const PHASE_NEUTRAL: u8 = 0;
const PHASE_MOUTH_WIDE: u8 = 1;
const PHASE_LIVE: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Number of live frames to simulate after calibration
    #[arg(long, default_value = "300")]
    frames: u64,

    /// Simulated frame rate
    #[arg(long, default_value = "30.0")]
    fps: f64,

    /// Control mode (cursor, scroll)
    #[arg(short, long, default_value = "cursor")]
    mode: String,

    /// Click method (mouth, blink, both)
    #[arg(long, default_value = "both")]
    click: String,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Camera stand-in producing blank frames
struct SyntheticCamera {
    width: u32,
    height: u32,
}

impl VideoSource for SyntheticCamera {
    fn read(&mut self) -> head_cursor::Result<Option<Frame>> {
        Ok(Some(Frame {
            width: self.width,
            height: self.height,
            data: Vec::new(),
        }))
    }

    fn release(&mut self) {
        info!("Synthetic camera released");
    }
}

/// Detector stand-in playing back a scripted head motion
struct ScriptedDetector {
    phase: Arc<AtomicU8>,
    tick: u64,
    fps: f64,
}

impl ScriptedDetector {
    fn face(yaw_deg: f64, pitch_deg: f64, mouth_ratio: f64, eye_openness: f64) -> DetectedFace {
        let mut mesh = vec![[0.0f64; 3]; 400];
        mesh[geometry::LEFT_CORNER] = [0.0, 20.0, 0.0];
        mesh[geometry::RIGHT_CORNER] = [40.0, 20.0, 0.0];
        mesh[geometry::TOP_LIP] = [20.0, 20.0, 0.0];
        mesh[geometry::BOTTOM_LIP] = [20.0, mouth_ratio.mul_add(40.0, 20.0), 0.0];
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
}

impl LandmarkDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame) -> head_cursor::Result<Vec<DetectedFace>> {
        let t = self.tick as f64 / self.fps;
        self.tick += 1;

        let face = match self.phase.load(Ordering::Relaxed) {
            PHASE_NEUTRAL => Self::face(0.0, 0.0, 0.08, 8.0),
            PHASE_MOUTH_WIDE => Self::face(0.0, 0.0, 0.55, 8.0),
            _ => {
                // Slow head sweep, a mouth-open burst every 3 s and a
                // quick blink every 5 s
                let yaw = 6.0 * (0.5 * t).sin();
                let pitch = 4.0 * (0.31 * t).sin();
                let mouth = if t % 3.0 < 0.25 { 0.55 } else { 0.08 };
                let eyes = if t % 5.0 < 0.2 { 1.0 } else { 8.0 };
                Self::face(yaw, pitch, mouth, eyes)
            }
        };
        Ok(vec![face])
    }

    fn release(&mut self) {
        info!("Scripted detector released");
    }
}

/// Surface stand-in that logs activations and scrolls
struct LoggingSurface {
    width: f64,
    height: f64,
    clicks: u64,
}

impl TargetSurface for LoggingSurface {
    fn viewport_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn element_at(&self, x: f64, y: f64) -> Option<ElementHit> {
        // Pretend the page is a 10x10 grid of links
        let column = (x / self.width * 10.0).floor() as u64;
        let row = (y / self.height * 10.0).floor() as u64;
        let id = row * 10 + column;
        Some(ElementHit {
            element: ElementId(id * 2 + 1),
            interactive_ancestor: Some(ElementId(id * 2)),
        })
    }

    fn activate(&mut self, element: ElementId) -> head_cursor::Result<()> {
        self.clicks += 1;
        info!("Click #{} activated element {:?}", self.clicks, element);
        Ok(())
    }

    fn scroll_by(&mut self, amount: f64) -> head_cursor::Result<()> {
        debug!("Scroll by {amount:.1}px");
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Head-cursor demo (scripted input)");

    let mut config = if let Some(path) = &args.config {
        info!("Loading configuration from: {path}");
        Config::from_file(path)?
    } else {
        Config::default()
    };
    config.control_mode = match args.mode.as_str() {
        "scroll" => ControlMode::Scroll,
        _ => ControlMode::Cursor,
    };
    config.click_method = match args.click.as_str() {
        "mouth" => ClickMethod::Mouth,
        "blink" => ClickMethod::Blink,
        _ => ClickMethod::Both,
    };
    config.validate()?;

    let phase = Arc::new(AtomicU8::new(PHASE_NEUTRAL));
    let detector_phase = Arc::clone(&phase);
    let fps = args.fps;

    let surface = Box::new(LoggingSurface {
        width: 1280.0,
        height: 800.0,
        clicks: 0,
    });
    let mut controller = TrackingController::new(
        config,
        surface,
        Box::new(|width, height| Ok(Box::new(SyntheticCamera { width, height }) as Box<dyn VideoSource>)),
        Box::new(move || {
            Ok(Box::new(ScriptedDetector {
                phase: Arc::clone(&detector_phase),
                tick: 0,
                fps,
            }) as Box<dyn LandmarkDetector>)
        }),
    )?;

    controller.initialize()?;

    // Guided calibration: neutral pose, then mouth wide open
    let dt = 1.0 / args.fps;
    let mut now = 0.0;
    controller.start_calibration();
    for _ in 0..30 {
        controller.process_frame(now);
        now += dt;
    }
    controller.advance_calibration_step();
    phase.store(PHASE_MOUTH_WIDE, Ordering::Relaxed);
    for _ in 0..30 {
        controller.process_frame(now);
        now += dt;
    }
    controller.advance_calibration_step();

    let calibration = controller.calibration_data();
    info!(
        "Calibrated: center=({:.2}, {:.2}) mouth_threshold={:.3} blink_threshold={:.3}",
        calibration.center_yaw, calibration.center_pitch, calibration.mouth_threshold, calibration.blink_threshold
    );

    // Live tracking
    phase.store(PHASE_LIVE, Ordering::Relaxed);
    for i in 0..args.frames {
        let snapshot = controller.process_frame(now);
        now += dt;
        if i % 30 == 0 {
            info!(
                "frame {i}: cursor=({:.0}, {:.0}) scroll={:?} clicking={}",
                snapshot.cursor_position.0,
                snapshot.cursor_position.1,
                snapshot.scroll_direction,
                snapshot.is_mouth_open || snapshot.is_blinking,
            );
        }
    }

    controller.cleanup();
    info!("Demo finished");
    Ok(())
}
