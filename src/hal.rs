//! Hardware abstraction — the single trait boundary to the physical device.
//!
//! Everything below this trait is a thin I/O wrapper with no state worth
//! modelling: the ADC-to-voltage scale, the servo PWM driver, the blocking
//! delay. The mood engine never touches a raw ADC code or a PWM duty cycle;
//! it consumes volts and issues absolute angles.
//!
//! Sensor read faults are fatal for the current operation. The core has no
//! retry or fallback policy — recovery (hardware reset, power cycle) belongs
//! to whoever owns the physical device, so faults propagate unchanged as
//! [`Hardware::Error`].
//!
//! For a scripted in-memory implementation see [`crate::sim::ScriptedHardware`].

use core::fmt::Debug;
use core::time::Duration;

/// ADC reference voltage in volts. Full-scale readings map to this value.
pub const ADC_REFERENCE_VOLTS: f32 = 3.3;

/// Full-scale raw value of the assumed 16-bit ADC.
pub const ADC_MAX_RAW: u16 = 65535;

/// Convert a raw 16-bit ADC code to volts.
///
/// `volts = raw * 3.3 / 65535` — the linear scale shared by every analog
/// channel on the board. The mood engine consumes only the converted value.
pub fn raw_to_volts(raw: u16) -> f32 {
    raw as f32 * ADC_REFERENCE_VOLTS / ADC_MAX_RAW as f32
}

/// The physical device, as seen by the mood engine.
///
/// One implementation per board, plus [`crate::sim::ScriptedHardware`] for
/// tests. All operations block the single control thread; there is no
/// concurrent task to yield to.
pub trait Hardware {
    /// Fault type for sensor reads and servo commands. Propagated unchanged
    /// through every core operation.
    type Error: Debug;

    /// Current microphone voltage in volts, range [0.0, [`ADC_REFERENCE_VOLTS`]].
    fn read_mic(&mut self) -> Result<f32, Self::Error>;

    /// Current photocell voltage in volts, range [0.0, [`ADC_REFERENCE_VOLTS`]].
    /// Higher voltage = brighter.
    fn read_light(&mut self) -> Result<f32, Self::Error>;

    /// Drive the servo to an absolute angle in degrees, range [0.0, 180.0].
    ///
    /// Fire-and-forget: there is no position feedback to confirm arrival, an
    /// accepted limitation of this hardware class.
    fn set_servo_angle(&mut self, degrees: f32) -> Result<(), Self::Error>;

    /// Block the control thread for `period`.
    fn sleep(&mut self, period: Duration);
}
