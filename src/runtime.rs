//! The control loop: calibrate once, then poll → decide → transition → wait.
//!
//! A single logical thread and strictly sequential ordering: calibration
//! always precedes the first decision; within a poll cycle sound and light
//! are sampled before the decision, the decision precedes the transition
//! check, and the transition check precedes the ignore-period sleep. All
//! waiting is a blocking sleep on this one thread — there is no concurrent
//! task to yield to.
//!
//! The only control-flow-altering signal is the external stop flag. Raising
//! it aborts the current wait and proceeds to the shutdown posture; that is a
//! success path, not an error path. Sensor and servo faults, by contrast,
//! abort the loop immediately and propagate — the core owns no retry policy.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use crate::config::RobotConfig;
use crate::hal::Hardware;
use crate::mood::{self, Mood, MoodMachine};
use crate::sensing::{self, Baseline};

/// Granularity at which long waits re-check the stop flag.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

// ─── Lifecycle ───────────────────────────────────────────────────────────────

/// Where the robot is in its process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Constructed, nothing measured yet.
    Startup,
    /// Sampling the quiet-time baseline.
    Calibrating,
    /// Baseline established; polling (or about to).
    Ready,
    /// Stop flag honoured; happy shutdown posture assumed.
    Shutdown,
}

/// What one poll cycle saw and did. Advisory — the control loop keeps no
/// history of these.
#[derive(Clone, Debug)]
pub struct CycleReport {
    /// Mean deviation from baseline over the sound window, volts.
    pub sound_level: f32,
    /// Photocell voltage, or `None` when the photocell is disabled.
    pub light_level: Option<f32>,
    /// Mood held after this cycle.
    pub mood: Mood,
    /// Whether this cycle moved the servo (and therefore owes an ignore
    /// period).
    pub transitioned: bool,
}

// ─── Robot ───────────────────────────────────────────────────────────────────

/// The introvert robot: hardware, configuration, and mood, owned in one
/// place. No module-level singletons — everything a component needs is passed
/// down from here.
#[derive(Debug)]
pub struct Robot<H: Hardware> {
    hw: H,
    config: RobotConfig,
    mood: MoodMachine,
    phase: LifecyclePhase,
}

impl<H: Hardware> Robot<H> {
    /// Build a robot around a hardware implementation. Nothing is sampled
    /// until [`Robot::calibrate`] or [`Robot::run`].
    pub fn new(hw: H, config: RobotConfig) -> Self {
        Self {
            hw,
            config,
            mood: MoodMachine::new(),
            phase: LifecyclePhase::Startup,
        }
    }

    /// The currently held mood.
    pub fn mood(&self) -> Mood {
        self.mood.current()
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Borrow the hardware, e.g. to script further readings mid-test.
    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Give the hardware back, consuming the robot.
    pub fn into_hardware(self) -> H {
        self.hw
    }

    /// Establish the quiet-time baseline. Runs once, before the first
    /// decision; blocks for roughly a second with the default window.
    pub fn calibrate(&mut self) -> Result<Baseline, H::Error> {
        self.phase = LifecyclePhase::Calibrating;
        let baseline = sensing::calibrate(&mut self.hw, &self.config.calibration)?;
        self.phase = LifecyclePhase::Ready;
        Ok(baseline)
    }

    /// One poll cycle: sample sound, sample light, decide, apply.
    ///
    /// Does not sleep the poll interval or the ignore period — that pacing
    /// belongs to [`Robot::run`]. Exposed separately so tests and demos can
    /// step the robot cycle by cycle.
    pub fn poll_cycle(&mut self, baseline: Baseline) -> Result<CycleReport, H::Error> {
        let sound_level = sensing::sound_level(&mut self.hw, baseline, &self.config.sound_window)?;
        let light = sensing::light_level(&mut self.hw, &self.config.policy)?;

        let want_happy = mood::decide(sound_level, light, &self.config.policy);
        let transitioned = self.mood.apply(want_happy, &mut self.hw, &self.config.pose)?;

        let report = CycleReport {
            sound_level,
            light_level: self.config.policy.use_light_sensor.then_some(light),
            mood: self.mood.current(),
            transitioned,
        };
        match report.light_level {
            Some(v) => log::info!(
                "sound {:.4} V | light {:.2} V | mood {:?}",
                report.sound_level,
                v,
                report.mood
            ),
            None => log::info!(
                "sound {:.4} V | light disabled | mood {:?}",
                report.sound_level,
                report.mood
            ),
        }
        Ok(report)
    }

    /// Run the robot until `stop` is raised.
    ///
    /// Calibrates, assumes the optimistic happy posture, then loops: poll
    /// cycle → ignore period if the servo moved → poll-interval sleep. Waits
    /// are sliced so a raised stop flag takes effect within [`SLEEP_SLICE`].
    /// On stop the servo is unconditionally returned to the happy angle — the
    /// defined shutdown posture — and the loop does not resume.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<(), H::Error> {
        log::info!(
            "introvert robot starting — polling every {} ms",
            self.config.poll_interval.as_millis()
        );

        let baseline = self.calibrate()?;

        // Boot smiling: the initial mood is assumed, not measured.
        self.hw.set_servo_angle(self.config.pose.happy_angle)?;

        while !stop.load(Ordering::Relaxed) {
            let report = self.poll_cycle(baseline)?;

            if report.transitioned {
                log::debug!(
                    "ignoring sensors for {} ms (servo settling)",
                    self.config.ignore_duration.as_millis()
                );
                self.sleep_unless_stopped(self.config.ignore_duration, stop);
            }
            self.sleep_unless_stopped(self.config.poll_interval, stop);
        }

        self.phase = LifecyclePhase::Shutdown;
        self.hw.set_servo_angle(self.config.pose.happy_angle)?;
        log::info!("robot stopped — back to the happy posture");
        Ok(())
    }

    /// Sleep `total`, in [`SLEEP_SLICE`] pieces, bailing out as soon as the
    /// stop flag is raised.
    fn sleep_unless_stopped(&mut self, total: Duration, stop: &AtomicBool) {
        let mut remaining = total;
        while !remaining.is_zero() && !stop.load(Ordering::Relaxed) {
            let slice = remaining.min(SLEEP_SLICE);
            self.hw.sleep(slice);
            remaining -= slice;
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ScriptedHardware, SimFault};

    /// Config with sub-second pacing so sliced sleeps stay countable.
    fn fast_config() -> RobotConfig {
        let mut c = RobotConfig::default();
        c.poll_interval = Duration::from_millis(70);
        c.ignore_duration = Duration::from_millis(30);
        c
    }

    fn calibrated_robot(baseline_volts: f32) -> (Robot<ScriptedHardware>, Baseline) {
        let hw = ScriptedHardware::quiet_room(baseline_volts);
        let mut robot = Robot::new(hw, fast_config());
        let baseline = robot.calibrate().unwrap();
        (robot, baseline)
    }

    #[test]
    fn test_starts_happy_before_any_decision() {
        let (robot, baseline) = calibrated_robot(1.60);
        assert!((baseline.volts - 1.60).abs() < 1e-6);
        assert_eq!(robot.mood(), Mood::Happy);
        assert_eq!(robot.phase(), LifecyclePhase::Ready);
    }

    #[test]
    fn test_quiet_cycle_keeps_happy_without_servo_command() {
        let (mut robot, baseline) = calibrated_robot(1.60);
        let report = robot.poll_cycle(baseline).unwrap();

        assert_eq!(report.mood, Mood::Happy);
        assert!(!report.transitioned);
        assert!(report.sound_level < 0.001);
        assert!(report.light_level.is_none(), "photocell is off by default");
        assert!(robot.into_hardware().servo_log().is_empty());
    }

    #[test]
    fn test_loud_cycle_goes_sad_then_quiet_recovers() {
        let (mut robot, baseline) = calibrated_robot(1.60);

        // Someone turns the music on: a full sound window of 3.3 V readings,
        // deviation 1.7 V > 1.68 V threshold.
        robot.hardware_mut().push_mic_burst(3.3, 10);
        let report = robot.poll_cycle(baseline).unwrap();
        assert_eq!(report.mood, Mood::Sad);
        assert!(report.transitioned);

        // Quiet again (idle mic ≈ baseline): back to happy.
        let report = robot.poll_cycle(baseline).unwrap();
        assert_eq!(report.mood, Mood::Happy);
        assert!(report.transitioned);

        assert_eq!(robot.into_hardware().servo_log(), &[180.0, 0.0]);
    }

    #[test]
    fn test_sad_stays_sad_without_retrigger() {
        let (mut robot, baseline) = calibrated_robot(1.60);
        robot.hardware_mut().set_mic_idle(3.3); // persistently loud

        let first = robot.poll_cycle(baseline).unwrap();
        assert!(first.transitioned);
        let second = robot.poll_cycle(baseline).unwrap();
        assert!(!second.transitioned, "same verdict must not move the servo again");
        assert_eq!(second.mood, Mood::Sad);
        assert_eq!(robot.into_hardware().servo_log(), &[180.0]);
    }

    #[test]
    fn test_bright_veto_with_photocell_enabled() {
        let hw = ScriptedHardware::quiet_room(1.60);
        let mut config = fast_config();
        config.policy.use_light_sensor = true;
        let mut robot = Robot::new(hw, config);
        let baseline = robot.calibrate().unwrap();

        robot.hardware_mut().set_light_idle(2.5); // bright room, dead quiet
        let report = robot.poll_cycle(baseline).unwrap();

        assert_eq!(report.light_level, Some(2.5));
        assert_eq!(report.mood, Mood::Sad, "bright veto wins even though quiet");
    }

    #[test]
    fn test_poll_cycle_propagates_sensor_fault() {
        let (mut robot, baseline) = calibrated_robot(1.60);
        robot.hardware_mut().fail_next_mic();
        let err = robot.poll_cycle(baseline);
        assert_eq!(err.unwrap_err(), SimFault::MicDisconnected);
    }

    #[test]
    fn test_sleep_unless_stopped_slices() {
        let (mut robot, _) = calibrated_robot(1.60);
        let before = robot.hardware_mut().total_slept();
        let stop = AtomicBool::new(false);

        robot.sleep_unless_stopped(Duration::from_millis(250), &stop);
        let slept = robot.hardware_mut().total_slept() - before;
        assert_eq!(slept, Duration::from_millis(250));

        // 100 + 100 + 50
        let hw = robot.into_hardware();
        let tail = &hw.sleep_log()[hw.sleep_log().len() - 3..];
        assert_eq!(
            tail,
            &[
                Duration::from_millis(100),
                Duration::from_millis(100),
                Duration::from_millis(50)
            ]
        );
    }

    // ── Log capture ───────────────────────────────────────────────────────

    struct CaptureLogger {
        lines: std::sync::Mutex<std::vec::Vec<std::string::String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            self.lines.lock().unwrap().push(std::format!("{}", record.args()));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        lines: std::sync::Mutex::new(std::vec::Vec::new()),
    };

    #[test]
    fn test_startup_banner_reports_sub_second_interval() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Info);

        let stop = AtomicBool::new(true); // calibrate, posture, no cycles
        let mut robot = Robot::new(ScriptedHardware::quiet_room(1.60), fast_config());
        robot.run(&stop).unwrap();

        let lines = CAPTURE.lines.lock().unwrap();
        let banner = lines
            .iter()
            .find(|l| l.contains("polling every"))
            .expect("startup banner logged");
        // A 70 ms interval must not be rounded down to "0 s".
        assert!(banner.contains("70 ms"), "banner was {:?}", banner);
    }

    #[test]
    fn test_sleep_unless_stopped_honours_raised_flag() {
        let (mut robot, _) = calibrated_robot(1.60);
        let before = robot.hardware_mut().total_slept();
        let stop = AtomicBool::new(true);

        robot.sleep_unless_stopped(Duration::from_secs(10), &stop);
        assert_eq!(robot.hardware_mut().total_slept(), before, "no sleep once stopped");
    }
}
