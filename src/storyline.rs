//! Colour-sheet playback for the status LED.
//!
//! The robot's LED can replay a hand-authored colour sequence exported from a
//! spreadsheet: one `r,g,b` line per frame, values 0–255. The export is
//! messy — carriage returns, a blank trailing line — and the parser is
//! tolerant of exactly that mess and strict about everything else.
//!
//! Playback holds each frame for a fixed time, then blanks the LED and rests
//! before the caller decides whether to loop. The LED itself is a thin
//! collaborator behind [`ColorLed`]; nothing here knows about wire protocols.
//!
//! Requires the `std` feature.

use core::time::Duration;

use std::string::String;
use std::string::ToString;
use std::vec::Vec;

/// How long each frame is shown.
pub const FRAME_HOLD: Duration = Duration::from_millis(500);

/// Rest between passes, with the LED blanked.
pub const REST_AFTER_PASS: Duration = Duration::from_secs(2);

/// An addressable LED that can show one colour at a time.
pub trait ColorLed {
    /// Show `rgb` on the LED.
    fn fill(&mut self, rgb: [u8; 3]);
}

/// Why a colour sheet failed to parse.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StorylineError {
    /// A line did not have exactly three comma-separated fields.
    #[error("line {line}: expected 3 comma-separated channels, found {found}")]
    FieldCount {
        /// 1-based line number in the sheet.
        line: usize,
        /// Number of fields actually present.
        found: usize,
    },
    /// A channel field was not an integer in 0–255.
    #[error("line {line}: bad channel value {value:?}")]
    BadChannel {
        /// 1-based line number in the sheet.
        line: usize,
        /// The offending field, as written.
        value: String,
    },
}

/// A parsed colour sequence, ready to play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Storyline {
    frames: Vec<[u8; 3]>,
}

impl Storyline {
    /// Parse a colour sheet: one `r,g,b` line per frame.
    ///
    /// `\r` is stripped (spreadsheet exports use CRLF) and blank lines are
    /// skipped, so a trailing newline does not produce a phantom frame.
    pub fn parse(sheet: &str) -> Result<Self, StorylineError> {
        let mut frames = Vec::new();

        for (idx, raw) in sheet.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let mut rgb = [0u8; 3];
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 3 {
                return Err(StorylineError::FieldCount {
                    line: idx + 1,
                    found: fields.len(),
                });
            }
            for (channel, field) in rgb.iter_mut().zip(&fields) {
                *channel = field.trim().parse().map_err(|_| StorylineError::BadChannel {
                    line: idx + 1,
                    value: field.to_string(),
                })?;
            }
            frames.push(rgb);
        }

        Ok(Self { frames })
    }

    /// The parsed frames, in sheet order.
    pub fn frames(&self) -> &[[u8; 3]] {
        &self.frames
    }

    /// Play the sequence once: each frame held for [`FRAME_HOLD`], then the
    /// LED blanked and a [`REST_AFTER_PASS`] rest. The caller supplies the
    /// delay so playback works against any clock, including a virtual one.
    pub fn play_once<L: ColorLed>(&self, led: &mut L, mut sleep: impl FnMut(Duration)) {
        for &frame in &self.frames {
            led.fill(frame);
            sleep(FRAME_HOLD);
        }
        led.fill([0, 0, 0]);
        sleep(REST_AFTER_PASS);
    }
}
