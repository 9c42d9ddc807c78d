//! # A Day in the Life of the Introvert Robot
//!
//! Simulates the full behavioural loop against scripted hardware — no device
//! required, and no real sleeping: the sim's clock is virtual, so a day of
//! robot time finishes instantly.
//!
//! The script: a quiet morning, someone turns the music on, the robot sulks,
//! the music stops, the robot forgives. Along the way you can watch the two
//! coordination rules that make the device feel alive instead of twitchy:
//! the servo only moves when the verdict actually changes, and every move is
//! followed by an ignore period so the motor cannot startle the microphone.
//!
//! ```bash
//! cargo run --example mood_sim
//! ```

use introvert_core::config::RobotConfig;
use introvert_core::mood::Mood;
use introvert_core::runtime::Robot;
use introvert_core::sim::ScriptedHardware;

const BASELINE_VOLTS: f32 = 1.60;

fn bar(level: f32, full_scale: f32) -> String {
    let filled = ((level / full_scale) * 20.0).round() as usize;
    let filled = filled.min(20);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(20 - filled))
}

fn face(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => ":)",
        Mood::Sad => ":(",
    }
}

fn main() {
    env_logger::init();

    println!("Introvert Robot — a simulated day");
    println!("=================================\n");

    // ── Setup ────────────────────────────────────────────────────────────────
    //
    // The reference configuration, photocell off: happiness depends only on
    // how loud the room is.
    let config = RobotConfig::default();
    let mut robot = Robot::new(ScriptedHardware::quiet_room(BASELINE_VOLTS), config);

    // ── Calibration ──────────────────────────────────────────────────────────
    //
    // Twenty quiet samples, averaged. On real hardware this is the one
    // second where you are asked to keep still.
    let baseline = robot.calibrate().expect("sim sensors cannot fault here");
    println!("calibrated baseline: {:.3} V\n", baseline.volts);

    // ── The day's soundtrack ─────────────────────────────────────────────────
    //
    // Each entry is one poll cycle: the mic voltage the room produces for
    // the whole sound window, and a label for the log.
    let day: &[(f32, &str)] = &[
        (1.60, "quiet morning"),
        (1.62, "pages turning"),
        (3.30, "music on, loud"),
        (3.30, "still loud"),
        (1.65, "music off"),
        (1.60, "evening calm"),
    ];

    println!("{:<16} {:>9}  {:<22} mood", "scene", "sound", "level");
    println!("{}", "-".repeat(58));

    for &(volts, label) in day {
        robot.hardware_mut().push_mic_burst(volts, 10);
        let report = robot.poll_cycle(baseline).expect("sim sensors cannot fault here");

        let note = if report.transitioned {
            "  ← servo moved, ignore period owed"
        } else {
            ""
        };
        println!(
            "{:<16} {:>7.3} V  {} {}{}",
            label,
            report.sound_level,
            bar(report.sound_level, 2.0),
            face(report.mood),
            note
        );
    }

    // ── The ledger ───────────────────────────────────────────────────────────
    let hw = robot.into_hardware();
    println!("\nservo commands issued: {:?}", hw.servo_log());
    println!("virtual time slept:    {:?}", hw.total_slept());
    println!("\nTwo moves for six scenes. The robot is not twitchy — just shy.");
}
