//! Mood decision and the two-state mood machine.
//!
//! The robot is an introvert: it is happy when the environment leaves it
//! alone. [`decide`] is the pure verdict function; [`MoodMachine`] holds the
//! current mood and drives the servo only when the verdict actually changes.
//!
//! # Invariants
//!
//! - Mood is always exactly one of two values; the servo position is fully
//!   determined by the held mood. No third or transitional position exists.
//! - A transition is recognised iff the new verdict differs from the held
//!   mood; recognising one is both necessary and sufficient to command the
//!   servo.
//! - The initial mood is [`Mood::Happy`] — an optimistic assumption, not a
//!   measurement. Preserved from the original device behaviour on purpose:
//!   the robot boots smiling rather than running a decision first.

use crate::hal::Hardware;

// ─── Mood ────────────────────────────────────────────────────────────────────

/// The two-valued behavioural state driving the servo posture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mood {
    /// Quiet (and dark, when the photocell counts): mouth closed, at peace.
    Happy,
    /// Too loud or too bright: mouth open, sulking.
    Sad,
}

// ─── Thresholds and poses ────────────────────────────────────────────────────

/// Decision thresholds — named configuration, calibrated per physical device.
///
/// The defaults are the values tuned on the reference build. Expect to adjust
/// `loud_threshold` to your room and microphone; `bright_threshold` only
/// matters once `use_light_sensor` is on.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoodPolicy {
    /// Sound deviation (volts from baseline) at or above which the world
    /// counts as loud.
    pub loud_threshold: f32,
    /// Photocell voltage at or above which the world counts as bright.
    pub bright_threshold: f32,
    /// Whether the photocell participates in the decision at all.
    ///
    /// Off by default: the robot stays usable with only the microphone
    /// working. When off, the light reading is pinned to the "always dark"
    /// sentinel and can never be the blocking factor for happiness.
    pub use_light_sensor: bool,
}

impl Default for MoodPolicy {
    fn default() -> Self {
        Self {
            loud_threshold: 1.68,
            bright_threshold: 2.0,
            use_light_sensor: false,
        }
    }
}

/// Servo angles for the two moods, in absolute degrees [0.0, 180.0].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoodPose {
    /// Servo angle when happy (mouth closed / neutral).
    pub happy_angle: f32,
    /// Servo angle when sad (mouth open / frown).
    pub sad_angle: f32,
}

impl Default for MoodPose {
    fn default() -> Self {
        Self {
            happy_angle: 0.0,
            sad_angle: 180.0,
        }
    }
}

// ─── Decision ────────────────────────────────────────────────────────────────

/// Decide whether the robot should be happy. Pure — no side effects, no
/// hidden state.
///
/// - `sound_level`: mean deviation from the quiet baseline, volts.
/// - `light_level`: photocell voltage, or the 0.0 sentinel when disabled.
///
/// Policy: quiet AND dark when the photocell is enabled, quiet alone when it
/// is not. Light is a secondary veto — brightness without noise never matters
/// on a sound-only build.
pub fn decide(sound_level: f32, light_level: f32, policy: &MoodPolicy) -> bool {
    let is_quiet = sound_level < policy.loud_threshold;
    let is_dark = light_level < policy.bright_threshold;

    if !policy.use_light_sensor {
        return is_quiet;
    }
    is_quiet && is_dark
}

// ─── Mood machine ────────────────────────────────────────────────────────────

/// Holds the current mood and commands the servo on transitions.
///
/// The servo command is fire-and-forget; no position is read back. Servo
/// faults propagate as the hardware's error type.
#[derive(Clone, Debug)]
pub struct MoodMachine {
    current: Mood,
}

impl MoodMachine {
    /// Start in the optimistic [`Mood::Happy`] state.
    pub fn new() -> Self {
        Self {
            current: Mood::Happy,
        }
    }

    /// The currently held mood.
    pub fn current(&self) -> Mood {
        self.current
    }

    /// Apply a decision verdict. Returns `true` iff a transition occurred,
    /// in which case the servo was commanded to the new mood's angle.
    ///
    /// Idempotent under a repeated verdict: the first differing call
    /// transitions once, every subsequent call with the same verdict leaves
    /// the state and the servo untouched.
    pub fn apply<H: Hardware>(
        &mut self,
        want_happy: bool,
        hw: &mut H,
        pose: &MoodPose,
    ) -> Result<bool, H::Error> {
        match (want_happy, self.current) {
            (true, Mood::Sad) => {
                log::info!("switching to HAPPY (quiet enough again)");
                hw.set_servo_angle(pose.happy_angle)?;
                self.current = Mood::Happy;
                Ok(true)
            }
            (false, Mood::Happy) => {
                log::info!("switching to SAD (too loud or too bright)");
                hw.set_servo_angle(pose.sad_angle)?;
                self.current = Mood::Sad;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Default for MoodMachine {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
