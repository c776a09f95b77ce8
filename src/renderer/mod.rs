//! Rendering for the application window.
//!
//! - [`wgpu_lib`]: surface/device setup, the clear pass and presentation
//! - [`text`]: one pre-shaped line of text, centered in the surface

pub mod text;
pub mod wgpu_lib;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter is compatible with the window surface")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface supports no texture format")]
    NoSurfaceFormat,
    #[error("failed to acquire the next frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("failed to prepare text: {0}")]
    PrepareText(#[from] glyphon::PrepareError),
    #[error("failed to draw text: {0}")]
    RenderText(#[from] glyphon::RenderError),
}
