//! # Storyline Playback
//!
//! Replays a hand-authored colour sheet on the status LED. The sheet below is
//! a spreadsheet export, CRLF line endings and trailing blank line included —
//! exactly what the parser has to put up with.
//!
//! Playback is sped up 10× so the demo does not take half a minute.
//!
//! ```bash
//! cargo run --example storyline --features std
//! ```

use std::thread;
use std::time::Duration;

use introvert_core::storyline::{ColorLed, Storyline};

const SHEET: &str = "255,40,0\r\n255,120,0\r\n200,200,20\r\n40,200,120\r\n0,120,255\r\n80,0,200\r\n\r\n";

struct TerminalLed;

impl ColorLed for TerminalLed {
    fn fill(&mut self, rgb: [u8; 3]) {
        let [r, g, b] = rgb;
        println!("LED #{r:02X}{g:02X}{b:02X}  \x1b[48;2;{r};{g};{b}m          \x1b[0m");
    }
}

fn main() {
    env_logger::init();

    let story = Storyline::parse(SHEET).expect("the bundled sheet parses");
    println!("storyline: {} frames\n", story.frames().len());

    let mut led = TerminalLed;
    for pass in 1..=2 {
        println!("pass {pass}");
        story.play_once(&mut led, |d| thread::sleep(fast(d)));
        println!();
    }
}

fn fast(d: Duration) -> Duration {
    d / 10
}
