//! Scripted in-memory hardware for tests and demos.
//!
//! [`ScriptedHardware`] implements [`Hardware`] with no physical device
//! attached: sensor readings come from bounded queues, servo commands are
//! recorded instead of moving anything, and `sleep` advances a virtual clock
//! instead of blocking. A full behavioural run that would take minutes on the
//! bench finishes in microseconds.
//!
//! This module doubles as the reference for what a production [`Hardware`]
//! implementation looks like — swap the queues for your board's ADC channels
//! and the command log for a PWM driver, and the rest of the crate is
//! unchanged.

use core::time::Duration;

use heapless::{Deque, Vec};

use crate::hal::Hardware;

/// Queued readings per channel. Oldest readings are served first; pushes past
/// capacity are dropped.
const SCRIPT_CAPACITY: usize = 256;
/// Recorded servo commands kept for inspection.
const SERVO_LOG_CAPACITY: usize = 128;
/// Recorded sleep periods kept for inspection.
const SLEEP_LOG_CAPACITY: usize = 512;

/// Simulated hardware fault, injectable per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimFault {
    /// The microphone failed to return a reading.
    MicDisconnected,
    /// The photocell failed to return a reading.
    LightDisconnected,
    /// The servo rejected the command.
    ServoStalled,
}

/// One scripted analog channel: a queue of readings over an idle value.
#[derive(Debug)]
struct Channel {
    queue: Deque<f32, SCRIPT_CAPACITY>,
    idle: f32,
    reads: u32,
    fail_next: bool,
}

impl Default for Channel {
    fn default() -> Self {
        Self {
            queue: Deque::new(),
            idle: 0.0,
            reads: 0,
            fail_next: false,
        }
    }
}

impl Channel {
    fn next(&mut self, fault: SimFault) -> Result<f32, SimFault> {
        if self.fail_next {
            self.fail_next = false;
            return Err(fault);
        }
        self.reads += 1;
        Ok(self.queue.pop_front().unwrap_or(self.idle))
    }
}

/// In-memory [`Hardware`] implementation driven by scripted readings.
///
/// ```rust
/// use introvert_core::sim::ScriptedHardware;
/// use introvert_core::hal::Hardware;
///
/// let mut hw = ScriptedHardware::quiet_room(1.60);
/// hw.push_mic_burst(3.1, 4); // someone turns the music on
/// assert_eq!(hw.read_mic().unwrap(), 3.1);
/// ```
#[derive(Debug)]
pub struct ScriptedHardware {
    mic: Channel,
    light: Channel,
    servo_fail_next: bool,
    servo_log: Vec<f32, SERVO_LOG_CAPACITY>,
    sleep_log: Vec<Duration, SLEEP_LOG_CAPACITY>,
    slept: Duration,
}

impl Default for ScriptedHardware {
    fn default() -> Self {
        Self {
            mic: Channel::default(),
            light: Channel::default(),
            servo_fail_next: false,
            servo_log: Vec::new(),
            sleep_log: Vec::new(),
            slept: Duration::ZERO,
        }
    }
}

impl ScriptedHardware {
    /// A quiet room: the microphone idles at `baseline_volts`, the photocell
    /// idles at 0.0 V (dark).
    pub fn quiet_room(baseline_volts: f32) -> Self {
        let mut hw = Self::default();
        hw.mic.idle = baseline_volts;
        hw
    }

    // ── Scripting ─────────────────────────────────────────────────────────

    /// Queue one microphone reading, served before the idle value.
    pub fn push_mic(&mut self, volts: f32) {
        let _ = self.mic.queue.push_back(volts);
    }

    /// Queue `n` identical microphone readings — a sustained noise.
    pub fn push_mic_burst(&mut self, volts: f32, n: usize) {
        for _ in 0..n {
            self.push_mic(volts);
        }
    }

    /// Set the microphone reading served once the queue is empty.
    pub fn set_mic_idle(&mut self, volts: f32) {
        self.mic.idle = volts;
    }

    /// Queue one photocell reading, served before the idle value.
    pub fn push_light(&mut self, volts: f32) {
        let _ = self.light.queue.push_back(volts);
    }

    /// Set the photocell reading served once the queue is empty.
    pub fn set_light_idle(&mut self, volts: f32) {
        self.light.idle = volts;
    }

    // ── Fault injection ───────────────────────────────────────────────────

    /// Make the next microphone read fail with [`SimFault::MicDisconnected`].
    pub fn fail_next_mic(&mut self) {
        self.mic.fail_next = true;
    }

    /// Make the next photocell read fail with [`SimFault::LightDisconnected`].
    pub fn fail_next_light(&mut self) {
        self.light.fail_next = true;
    }

    /// Make the next servo command fail with [`SimFault::ServoStalled`].
    pub fn fail_next_servo(&mut self) {
        self.servo_fail_next = true;
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// Every servo angle commanded so far, in order (first
    /// [`SERVO_LOG_CAPACITY`] entries).
    pub fn servo_log(&self) -> &[f32] {
        &self.servo_log
    }

    /// Every sleep period requested so far, in order (first
    /// [`SLEEP_LOG_CAPACITY`] entries).
    pub fn sleep_log(&self) -> &[Duration] {
        &self.sleep_log
    }

    /// Total virtual time slept.
    pub fn total_slept(&self) -> Duration {
        self.slept
    }

    /// Number of microphone reads served (faults excluded).
    pub fn mic_read_count(&self) -> u32 {
        self.mic.reads
    }

    /// Number of photocell reads served (faults excluded).
    pub fn light_read_count(&self) -> u32 {
        self.light.reads
    }
}

impl Hardware for ScriptedHardware {
    type Error = SimFault;

    fn read_mic(&mut self) -> Result<f32, SimFault> {
        self.mic.next(SimFault::MicDisconnected)
    }

    fn read_light(&mut self) -> Result<f32, SimFault> {
        self.light.next(SimFault::LightDisconnected)
    }

    fn set_servo_angle(&mut self, degrees: f32) -> Result<(), SimFault> {
        if self.servo_fail_next {
            self.servo_fail_next = false;
            return Err(SimFault::ServoStalled);
        }
        let _ = self.servo_log.push(degrees);
        Ok(())
    }

    fn sleep(&mut self, period: Duration) {
        self.slept += period;
        let _ = self.sleep_log.push(period);
    }
}
