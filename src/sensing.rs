//! Quiet-time calibration and the deviation-based loudness estimate.
//!
//! The microphone channel has no absolute meaning: its resting voltage drifts
//! with the board, the supply, and the room. So the robot first learns what
//! "quiet" sounds like — [`calibrate`] averages a short burst of samples taken
//! while the user is told to keep still — and from then on loudness is simply
//! the mean absolute [`deviation`] from that baseline over a small window.
//! A moving-average noise-floor detector, deliberately cheap for the target
//! hardware. Not a frequency-domain anything.
//!
//! # Invariants
//!
//! - The baseline is computed exactly once, before the first mood decision.
//!   The caller owns that ordering (see [`crate::runtime::Robot::run`]).
//! - No outlier rejection anywhere: a door slam during calibration skews the
//!   baseline, which is why calibration asks for a quiet room.

use core::time::Duration;

use crate::hal::Hardware;
use crate::mood::MoodPolicy;

// ─── Baseline ────────────────────────────────────────────────────────────────

/// Mean quiet-condition microphone voltage, established once at startup and
/// immutable for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baseline {
    /// The baseline voltage, range [0.0, 3.3].
    pub volts: f32,
}

/// Sampling plan for [`calibrate`]: how many quiet samples, how far apart.
///
/// The default (20 samples, 50 ms apart) blocks for about one second.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationWindow {
    /// Number of samples averaged into the baseline.
    pub samples: u32,
    /// Delay between consecutive samples.
    pub sample_delay: Duration,
}

impl Default for CalibrationWindow {
    fn default() -> Self {
        Self {
            samples: 20,
            sample_delay: Duration::from_millis(50),
        }
    }
}

/// Sampling plan for [`sound_level`]: the sliding loudness window.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundWindow {
    /// Number of deviation samples averaged per estimate.
    pub samples: u32,
    /// Delay between consecutive samples.
    pub sample_delay: Duration,
}

impl Default for SoundWindow {
    fn default() -> Self {
        Self {
            samples: 10,
            sample_delay: Duration::from_millis(10),
        }
    }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Establish the quiet-time [`Baseline`]: the arithmetic mean of
/// `window.samples` microphone readings spaced `window.sample_delay` apart.
///
/// Blocks the calling thread for roughly `samples × sample_delay`. The
/// environment must be quiet for the duration — the caller is responsible for
/// not running this while the user is still poking at the device. A sensor
/// fault aborts calibration and propagates.
pub fn calibrate<H: Hardware>(
    hw: &mut H,
    window: &CalibrationWindow,
) -> Result<Baseline, H::Error> {
    log::info!("calibrating microphone baseline — keep the room quiet");

    let n = window.samples.max(1);
    let mut sum = 0.0f32;
    for _ in 0..n {
        sum += hw.read_mic()?;
        hw.sleep(window.sample_delay);
    }

    let baseline = Baseline {
        volts: sum / n as f32,
    };
    log::info!("microphone baseline: {:.3} V", baseline.volts);
    Ok(baseline)
}

/// Absolute deviation of one sample from the baseline — the loudness proxy.
pub fn deviation(sample_volts: f32, baseline: Baseline) -> f32 {
    let d = sample_volts - baseline.volts;
    if d < 0.0 {
        -d
    } else {
        d
    }
}

/// Current loudness: the mean absolute deviation from `baseline` over
/// `window.samples` readings. Higher = louder, 0.0 = dead quiet.
pub fn sound_level<H: Hardware>(
    hw: &mut H,
    baseline: Baseline,
    window: &SoundWindow,
) -> Result<f32, H::Error> {
    let n = window.samples.max(1);
    let mut total = 0.0f32;
    for _ in 0..n {
        total += deviation(hw.read_mic()?, baseline);
        hw.sleep(window.sample_delay);
    }
    Ok(total / n as f32)
}

/// Current brightness: one instantaneous photocell reading, no averaging.
/// Light changes slowly relative to the poll cadence, so a single sample is
/// enough.
///
/// When the photocell is administratively disabled this returns the 0.0
/// "always dark" sentinel without touching the hardware — downstream, dark is
/// never the blocking factor for happiness.
pub fn light_level<H: Hardware>(hw: &mut H, policy: &MoodPolicy) -> Result<f32, H::Error> {
    if !policy.use_light_sensor {
        return Ok(0.0);
    }
    hw.read_light()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
