//! Robot configuration — every device-calibrated constant, named.
//!
//! Read-only for the process lifetime; there is no runtime reconfiguration.
//! The defaults are the values tuned on the reference build and the sensible
//! starting point for a new device. None of them is validated at runtime —
//! thresholds that make happy or sad unreachable are the operator's problem,
//! not a detected error class.

use core::time::Duration;

use crate::mood::{MoodPolicy, MoodPose};
use crate::sensing::{CalibrationWindow, SoundWindow};

/// Full configuration for one robot.
///
/// ```rust
/// use introvert_core::config::RobotConfig;
///
/// let mut config = RobotConfig::default();
/// config.policy.use_light_sensor = true; // photocell fitted on this build
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotConfig {
    /// How often the sensors are checked once the robot is running.
    pub poll_interval: Duration,
    /// How long sensor polling is suspended after any servo move, so the
    /// robot does not re-trigger on the mechanical and acoustic disturbance
    /// of its own motion.
    pub ignore_duration: Duration,
    /// Servo angles for the two moods.
    pub pose: MoodPose,
    /// Decision thresholds and photocell enablement.
    pub policy: MoodPolicy,
    /// Startup calibration sampling plan.
    pub calibration: CalibrationWindow,
    /// Per-poll loudness sampling plan.
    pub sound_window: SoundWindow,
}

impl RobotConfig {
    /// The reference-build configuration: 10 s poll cadence, 5 s ignore
    /// period, photocell off.
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            ignore_duration: Duration::from_secs(5),
            pose: MoodPose::default(),
            policy: MoodPolicy::default(),
            calibration: CalibrationWindow::default(),
            sound_window: SoundWindow::default(),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::new()
    }
}
