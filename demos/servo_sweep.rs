//! # Servo Exercise
//!
//! The bench utility for checking a newly fitted servo: a couple of fixed
//! positions with a hold at each, then one slow sweep out and back. Runs
//! against the scripted servo so the command stream can be eyeballed without
//! hardware.
//!
//! ```bash
//! cargo run --example servo_sweep
//! ```

use core::time::Duration;

use introvert_core::hal::Hardware;
use introvert_core::sim::ScriptedHardware;

const HOLD: Duration = Duration::from_secs(5);
const SWEEP_STEP: f32 = 5.0;
const SWEEP_PAUSE: Duration = Duration::from_millis(50);

fn main() {
    env_logger::init();

    let mut hw = ScriptedHardware::default();

    // Fixed positions first — if the horn is mounted off by a spline you
    // will see it here.
    for angle in [1.0, 180.0] {
        println!("moving to {angle}°, holding {}s", HOLD.as_secs());
        hw.set_servo_angle(angle).expect("sim servo cannot stall");
        hw.sleep(HOLD);
    }

    // One sweep out and back.
    println!("sweeping 0° → 180° → 0° in {SWEEP_STEP}° steps");
    let mut angle = 0.0f32;
    let mut increasing = true;
    loop {
        hw.set_servo_angle(angle).expect("sim servo cannot stall");
        hw.sleep(SWEEP_PAUSE);

        if increasing {
            angle += SWEEP_STEP;
            if angle >= 180.0 {
                increasing = false;
            }
        } else {
            angle -= SWEEP_STEP;
            if angle <= 0.0 {
                break;
            }
        }
    }

    println!(
        "\n{} commands issued, {:?} of virtual hold time",
        hw.servo_log().len(),
        hw.total_slept()
    );
    println!("first five: {:?}", &hw.servo_log()[..5]);
}
