//! # Photocell Level Meter
//!
//! The bench utility for picking a `bright_threshold`: visualise each
//! photocell reading as a bar graph while you cover the sensor and shine a
//! light at it, track the darkest and brightest values seen, and suggest the
//! midpoint as a starting threshold. The readings here are synthesised so the
//! output is reproducible; on the real device they come off the A1 channel.
//!
//! ```bash
//! cargo run --example photocell_meter
//! ```

use introvert_core::hal::{Hardware, ADC_REFERENCE_VOLTS};
use introvert_core::sim::ScriptedHardware;

const GRAPH_WIDTH: usize = 40;

fn main() {
    env_logger::init();

    println!("Photocell Level Meter");
    println!("=====================\n");
    println!("Test your lighting conditions:");
    println!("- cover the sensor with your hand (dark)");
    println!("- shine a light on it (bright)");
    println!("- normal room lighting\n");
    println!("{}", "-".repeat(60));
    println!("Voltage | Bar Graph");
    println!("{}", "-".repeat(60));

    let mut hw = ScriptedHardware::default();

    // A synthetic test session: room light, a hand over the sensor, then a
    // torch straight at it, then back to the room.
    let readings: &[f32] = &[
        1.20, 1.22, 1.19, // normal room
        0.15, 0.10, 0.12, // covered by hand
        2.95, 3.05, 2.90, // torch
        1.21, 1.20, // room again
    ];
    for &volts in readings {
        hw.push_light(volts);
    }

    let mut darkest = f32::MAX;
    let mut brightest = f32::MIN;

    for _ in 0..readings.len() {
        let volts = hw.read_light().expect("sim photocell cannot fault");
        darkest = darkest.min(volts);
        brightest = brightest.max(volts);

        let level = ((volts / ADC_REFERENCE_VOLTS) * GRAPH_WIDTH as f32) as usize;
        let level = level.min(GRAPH_WIDTH);
        println!(
            "{:.3} V | {}{}",
            volts,
            "█".repeat(level),
            "·".repeat(GRAPH_WIDTH - level)
        );
    }

    println!("{}", "=".repeat(60));
    println!("Session summary:");
    println!("  darkest:   {darkest:.3} V");
    println!("  brightest: {brightest:.3} V");
    println!("  range:     {:.3} V", brightest - darkest);
    println!(
        "\nSuggested bright_threshold: {:.3} V (midpoint)",
        (darkest + brightest) / 2.0
    );
}
