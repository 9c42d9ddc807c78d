//! # introvert-core
//!
//! Mood engine for a battery-powered novelty robot that prefers to be left
//! alone. The robot listens to its surroundings through a microphone and an
//! optional photocell, and drives a single servo between two postures:
//! **happy** when the world is quiet (and dark, if the photocell is fitted),
//! **sad** when it gets loud or bright.
//!
//! There is deliberately no cleverness in the signal path. The loudness proxy
//! is the mean absolute deviation from a quiet-time baseline voltage — no
//! FFTs, no filters, nothing a coin-cell microcontroller would resent. The
//! interesting part is the coordination around it: calibrate once, poll on a
//! slow cadence, and after every servo move enter a short *ignore period* so
//! the robot does not startle itself with the noise of its own motor.
//!
//! ## The pipeline
//!
//! ```text
//! mic ──► Baseline ──► sound_level ─┐
//!                                   ├─► decide ──► MoodMachine ──► servo
//! photocell ────────► light_level ──┘                  │
//!                                                 ignore period
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`config`] | [`config::RobotConfig`] | Named configuration for every device-calibrated constant |
//! | [`hal`] | [`hal::Hardware`] | The single trait boundary to the physical device |
//! | [`sensing`] | [`sensing::Baseline`] | Quiet-time calibration and the deviation-based loudness estimate |
//! | [`mood`] | [`mood::Mood`], [`mood::MoodMachine`] | Pure happy/sad decision and the two-state machine |
//! | [`runtime`] | [`runtime::Robot`] | Calibrate-then-poll control loop with the ignore period |
//! | [`sim`] | [`sim::ScriptedHardware`] | Scripted in-memory hardware for tests and demos |
//! | `storyline` | `storyline::Storyline` | Colour-sheet playback for the status LED (requires `std`) |
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default with no heap required. Enable the
//! `std` feature for the `storyline` parser. Enable the `serde` feature for
//! serialisation support on configuration and mood types.
//!
//! ## What this crate is not
//!
//! No networking, no persistence across power cycles, no concurrency beyond
//! the single blocking control loop. A second thread would have nothing to do.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]

// Pull in std when the feature is enabled (storyline parser) and for the
// unit-test harness.
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod config;
pub mod hal;
pub mod mood;
pub mod runtime;
pub mod sensing;
pub mod sim;
#[cfg(feature = "std")]
pub mod storyline;
