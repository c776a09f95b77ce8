//! Audio Alive - a minimal audio engine demo.
//!
//! Brings up the audio engine, loads the startup and music banks, starts the music event
//! and shows a window with one line of centered text until the user quits with Escape,
//! the close button or Ctrl-C.
//!
//! # Architecture
//! - [`audio`]: the audio engine lifecycle wrapper and its kira backend
//! - [`app`]: window, frame loop and input
//! - [`renderer`]: WGPU clear/present and glyphon text
//!
//! # Usage
//! Run with `cargo run`. Banks are read from `assets/soundbanks/<platform>/`; set `RUST_LOG`
//! to change log verbosity.

pub mod app;
pub mod audio;
pub mod renderer;
