//! End-to-end control-loop tests over scripted hardware.
//!
//! Drives `Robot::run` through whole lifecycles — calibration, poll cycles,
//! transitions, ignore periods, shutdown — with a bench harness that raises
//! the stop flag once a scripted number of microphone reads has been served.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use introvert_core::config::RobotConfig;
use introvert_core::hal::Hardware;
use introvert_core::mood::Mood;
use introvert_core::runtime::{LifecyclePhase, Robot};
use introvert_core::sim::{ScriptedHardware, SimFault};

// ── Bench harness ─────────────────────────────────────────────────────────────

/// Scripted hardware plus bench controls: raise a stop flag after N mic
/// reads, or fault the Nth mic read.
struct BenchHardware<'a> {
    inner: ScriptedHardware,
    stop_at_mic_reads: Option<(&'a AtomicBool, u32)>,
    fail_mic_at: Option<u32>,
}

impl<'a> BenchHardware<'a> {
    fn new(inner: ScriptedHardware) -> Self {
        Self {
            inner,
            stop_at_mic_reads: None,
            fail_mic_at: None,
        }
    }
}

impl Hardware for BenchHardware<'_> {
    type Error = SimFault;

    fn read_mic(&mut self) -> Result<f32, SimFault> {
        if self.fail_mic_at == Some(self.inner.mic_read_count() + 1) {
            return Err(SimFault::MicDisconnected);
        }
        let volts = self.inner.read_mic()?;
        if let Some((flag, at)) = self.stop_at_mic_reads {
            if self.inner.mic_read_count() >= at {
                flag.store(true, Ordering::Relaxed);
            }
        }
        Ok(volts)
    }

    fn read_light(&mut self) -> Result<f32, SimFault> {
        self.inner.read_light()
    }

    fn set_servo_angle(&mut self, degrees: f32) -> Result<(), SimFault> {
        self.inner.set_servo_angle(degrees)
    }

    fn sleep(&mut self, period: Duration) {
        self.inner.sleep(period);
    }
}

/// Sub-second pacing so a full run stays within the sim's sleep ledger.
fn bench_config() -> RobotConfig {
    let mut c = RobotConfig::default();
    c.poll_interval = Duration::from_millis(70);
    c.ignore_duration = Duration::from_millis(30);
    c
}

fn count_sleeps(hw: &ScriptedHardware, period: Duration) -> usize {
    hw.sleep_log().iter().filter(|&&d| d == period).count()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_full_journey_quiet_loud_quiet() {
    // Script: 20 calibration reads at 1.6 V, one quiet cycle, one loud cycle
    // (deviation 1.7 V > 1.68 V), then quiet idle again. Stop after the
    // third cycle's reads (20 + 3 × 10 = 50).
    let mut hw = ScriptedHardware::quiet_room(1.6);
    hw.push_mic_burst(1.6, 20); // calibration
    hw.push_mic_burst(1.6, 10); // cycle 1: quiet
    hw.push_mic_burst(3.3, 10); // cycle 2: loud

    let stop = AtomicBool::new(false);
    let mut bench = BenchHardware::new(hw);
    bench.stop_at_mic_reads = Some((&stop, 50));

    let mut robot = Robot::new(bench, bench_config());
    robot.run(&stop).unwrap();

    assert_eq!(robot.mood(), Mood::Happy);
    assert_eq!(robot.phase(), LifecyclePhase::Shutdown);

    let hw = robot.into_hardware().inner;

    // Startup happy posture, sad at cycle 2, happy at cycle 3, shutdown
    // happy posture.
    assert_eq!(hw.servo_log(), &[0.0, 180.0, 0.0, 0.0]);

    // Calibration pacing comes first: 20 sleeps of 50 ms before anything
    // else — the baseline exists before the first decision.
    assert!(hw.sleep_log()[..20]
        .iter()
        .all(|&d| d == Duration::from_millis(50)));

    // One ignore period: after cycle 2's transition. Cycle 3 transitions
    // too, but by then the stop flag is up and its waits are skipped.
    assert_eq!(count_sleeps(&hw, Duration::from_millis(30)), 1);

    // Two poll-interval sleeps: after cycles 1 and 2.
    assert_eq!(count_sleeps(&hw, Duration::from_millis(70)), 2);
}

#[test]
fn test_no_transition_means_no_ignore_period() {
    // Persistently loud: the first cycle transitions to sad, the next two
    // keep the same verdict. Only the first owes an ignore period.
    let mut hw = ScriptedHardware::quiet_room(1.6);
    hw.push_mic_burst(1.6, 20); // calibration
    hw.set_mic_idle(3.3);

    let stop = AtomicBool::new(false);
    let mut bench = BenchHardware::new(hw);
    bench.stop_at_mic_reads = Some((&stop, 50));

    let mut robot = Robot::new(bench, bench_config());
    robot.run(&stop).unwrap();

    assert_eq!(robot.mood(), Mood::Sad);
    let hw = robot.into_hardware().inner;

    // Startup happy, one sad move, shutdown happy regardless of mood.
    assert_eq!(hw.servo_log(), &[0.0, 180.0, 0.0]);
    assert_eq!(count_sleeps(&hw, Duration::from_millis(30)), 1);
    assert_eq!(count_sleeps(&hw, Duration::from_millis(70)), 2);
}

#[test]
fn test_stop_before_first_cycle() {
    let stop = AtomicBool::new(true);
    let bench = BenchHardware::new(ScriptedHardware::quiet_room(1.6));
    let mut robot = Robot::new(bench, bench_config());

    robot.run(&stop).unwrap();

    let hw = robot.into_hardware().inner;
    // Calibration still ran — it precedes the loop — but no poll cycle did.
    assert_eq!(hw.mic_read_count(), 20);
    assert_eq!(hw.servo_log(), &[0.0, 0.0]);
}

#[test]
fn test_sensor_fault_aborts_the_run() {
    // Fault the first read of cycle 1 (the 21st overall). No retry, no
    // shutdown posture — the fault propagates to the supervisor.
    let stop = AtomicBool::new(false);
    let mut bench = BenchHardware::new(ScriptedHardware::quiet_room(1.6));
    bench.fail_mic_at = Some(21);

    let mut robot = Robot::new(bench, bench_config());
    let err = robot.run(&stop);

    assert_eq!(err.unwrap_err(), SimFault::MicDisconnected);
    let hw = robot.into_hardware().inner;
    assert_eq!(hw.servo_log(), &[0.0], "startup posture only");
}

#[test]
fn test_photocell_build_full_journey() {
    // Light sensor on: quiet and dark is happy, then the lights come on and
    // the bright veto wins even though the room stays quiet.
    let mut config = bench_config();
    config.policy.use_light_sensor = true;

    let mut hw = ScriptedHardware::quiet_room(1.6);
    hw.push_light(0.3); // cycle 1: dark
    hw.set_light_idle(2.5); // then bright

    let stop = AtomicBool::new(false);
    let mut bench = BenchHardware::new(hw);
    bench.stop_at_mic_reads = Some((&stop, 40)); // calibration + 2 cycles

    let mut robot = Robot::new(bench, config);
    robot.run(&stop).unwrap();

    assert_eq!(robot.mood(), Mood::Sad);
    let hw = robot.into_hardware().inner;
    assert_eq!(hw.servo_log(), &[0.0, 180.0, 0.0]);
    assert_eq!(hw.light_read_count(), 2, "one instantaneous sample per cycle");
}
