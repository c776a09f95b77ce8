//! Application shell.
//!
//! Owns the window, the renderers and the [`AudioEngine`](crate::audio::AudioEngine), and runs the
//! frame loop on top of winit's event loop.
//!
//! # Module Structure
//!
//! - [`app_state`]: [`AppState`], the window-bound rendering resources
//! - [`event_handler`]: [`App`] and its [`ApplicationHandler`](winit::application::ApplicationHandler) impl
//! - [`update`]: start, per-frame update and render
//! - [`keys`]: keyboard mapping
//!
//! # Frame Flow
//!
//! 1. **Input**: window events are drained; a close request or Escape clears the running flag
//! 2. **Update**: the audio engine renders one frame
//! 3. **Render**: clear, draw the static text, present
//!
//! # Threading Model
//!
//! Everything runs on the event loop thread. The only other writer is the Ctrl-C handler,
//! which sets an atomic quit flag checked once per loop iteration.

pub mod app_state;
pub mod event_handler;
pub mod keys;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;

use thiserror::Error;

use crate::audio::AudioError;
use crate::renderer::RenderError;

pub const WINDOW_TITLE: &str = "Audio Engine is Alive!";
pub const WINDOW_WIDTH: u32 = 1024;
pub const WINDOW_HEIGHT: u32 = 768;
pub const WINDOW_ALWAYS_ON_TOP: bool = true;

pub const DISPLAY_TEXT: &str = "Audio Engine is Alive!";
pub const DISPLAY_FONT_SIZE: f32 = 96.0;
/// Optional font tried before falling back to the system sans-serif face.
pub const DISPLAY_FONT_PATH: &str = "assets/fonts/arial.ttf";
pub const DISPLAY_FONT_NAME: &str = "Arial";

/// Bank loaded when the window first comes up.
pub const MUSIC_BANK: &str = "Music.bnk";
/// Event posted on the default object right after [`MUSIC_BANK`] is loaded.
pub const MUSIC_EVENT: &str = "MusicTest";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to install the Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
