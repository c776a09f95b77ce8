//! Event handler module.
//!
//! Contains the [`App`] struct, its lifecycle and its winit event handling.

use crate::app::app_state::AppState;
use crate::app::keys::is_quit_key;
use crate::app::{AppError, WINDOW_ALWAYS_ON_TOP, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::audio::{AudioEngine, KiraBackend, SoundBackend};
use crate::renderer::RenderError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId, WindowLevel},
};

/// Main application struct: owns the window, the renderers and the audio engine.
///
/// # Lifecycle
/// 1. [`App::new`] takes ownership of an uninitialized [`AudioEngine`]
/// 2. [`App::initialize`] brings the audio engine up
/// 3. winit calls `resumed`; the window and renderers are created and [`App::start`] runs once
/// 4. Frames run until the running flag clears
/// 5. [`App::terminate`] drops the window resources, then terminates the audio engine
pub struct App<B: SoundBackend = KiraBackend> {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// Window-bound rendering state, None until the window exists.
    pub state: Option<AppState>,
    /// The application window, None until created.
    pub window: Option<Arc<Window>>,
    pub(crate) audio: AudioEngine<B>,
    pub(crate) is_running: bool,
    started: bool,
    quit_requested: Arc<AtomicBool>,
    setup_error: Option<RenderError>,
}

impl<B: SoundBackend> App<B> {
    /// Creates the application. `quit_requested` may be set from another thread to stop
    /// the frame loop.
    pub fn new(audio: AudioEngine<B>, quit_requested: Arc<AtomicBool>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
            audio,
            is_running: false,
            started: false,
            quit_requested,
            setup_error: None,
        }
    }

    /// Brings the audio engine up. The window follows once the event loop resumes.
    pub fn initialize(&mut self) -> Result<(), AppError> {
        self.audio.initialize()?;
        info!("app initialized");
        Ok(())
    }

    /// Drops text, renderer and window, then terminates the audio engine.
    pub fn terminate(&mut self) {
        self.is_running = false;
        self.state = None;
        self.window = None;
        self.audio.terminate();
        info!("app terminated");
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn audio(&self) -> &AudioEngine<B> {
        &self.audio
    }

    /// The window or renderer setup failure that ended the event loop, if any.
    pub fn take_setup_error(&mut self) -> Option<RenderError> {
        self.setup_error.take()
    }

    /// Records a setup failure and stops the frame loop.
    pub(crate) fn fail_setup(&mut self, err: RenderError) {
        error!("failed to set up the window: {err}");
        self.is_running = false;
        self.setup_error = Some(err);
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let window_level = if WINDOW_ALWAYS_ON_TOP {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_window_level(window_level);

        let window = event_loop.create_window(attributes)?;
        pollster::block_on(self.set_window(window))
    }

    /// Creates the surface and renderers for `window`.
    pub async fn set_window(&mut self, window: Window) -> Result<(), RenderError> {
        let window = Arc::new(window);
        let surface = self.instance.create_surface(window.clone())?;
        let state = AppState::new(&self.instance, surface, &window).await?;

        self.window = Some(window);
        self.state = Some(state);
        self.is_running =
            self.window.is_some() && self.state.is_some() && self.audio.is_initialized();
        Ok(())
    }

    fn handle_resized(&mut self, width: u32, height: u32) {
        if let Some(state) = self.state.as_mut() {
            state.resize_surface(width, height);
        }
    }
}

impl<B: SoundBackend> ApplicationHandler for App<B> {
    /// Creates the window and renderers on first resume, then runs [`App::start`].
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail_setup(err);
            event_loop.exit();
            return;
        }

        if !self.started {
            self.started = true;
            self.start();
        }
    }

    /// Drains window input; a close request or an Escape press clears the running flag.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested");
                self.is_running = false;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if is_quit_key(&event.logical_key, event.state) {
                    info!("escape pressed");
                    self.is_running = false;
                }
            }
            WindowEvent::Resized(size) => {
                self.handle_resized(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                if self.is_running {
                    self.handle_redraw();
                }
            }
            _ => {}
        }

        if !self.is_running {
            event_loop.exit();
        }
    }

    /// Runs after all pending events were handled; schedules the next frame.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.quit_requested.load(Ordering::Relaxed) {
            info!("interrupt received");
            self.is_running = false;
        }

        if !self.is_running {
            event_loop.exit();
        } else if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
