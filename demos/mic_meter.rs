//! # Microphone Level Meter
//!
//! The sensor-bench utility: calibrate a baseline, then visualise the
//! deviation of each reading as a bar graph. On the real device this is how
//! you pick a `loud_threshold` for your room; here the readings are
//! synthesised so the output is reproducible.
//!
//! ```bash
//! cargo run --example mic_meter
//! ```

use introvert_core::hal::Hardware;
use introvert_core::sensing::{self, CalibrationWindow};
use introvert_core::sim::ScriptedHardware;

const GRAPH_WIDTH: usize = 50;

fn main() {
    env_logger::init();

    println!("Microphone Level Meter");
    println!("======================\n");

    let mut hw = ScriptedHardware::quiet_room(1.65);

    println!("Calibrating baseline (stay quiet)...");
    let baseline =
        sensing::calibrate(&mut hw, &CalibrationWindow::default()).expect("sim mic cannot fault");
    println!("Baseline voltage: {:.3} V\n", baseline.volts);

    // A synthetic half-minute: hum, a clap, speech, then quiet again.
    let readings: &[f32] = &[
        1.65, 1.66, 1.64, 1.65, // room hum
        2.90, 1.70, // a single clap and its tail
        2.10, 2.30, 1.95, 2.20, // conversation
        1.66, 1.65, 1.65, // quiet again
    ];
    for &volts in readings {
        hw.push_mic(volts);
    }

    for _ in 0..readings.len() {
        let volts = hw.read_mic().expect("sim mic cannot fault");
        let dev = sensing::deviation(volts, baseline);

        // Same scale the original bench tool used: 0.01 V per column.
        let level = ((dev * 100.0) as usize).min(GRAPH_WIDTH);
        println!(
            "{:.3} V |{}{}| {:.4} V",
            volts,
            "█".repeat(level),
            "·".repeat(GRAPH_WIDTH - level),
            dev
        );
    }

    println!("\nPick a loud_threshold comfortably above the hum and below the claps.");
}
