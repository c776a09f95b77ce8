//! Audio Alive entry point.
//!
//! Initializes logging, installs the Ctrl-C handler and runs the [`App`] until quit.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::error;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use audio_alive::app::{App, AppError};
use audio_alive::audio::{AudioEngine, AudioSettings, KiraBackend};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Main entry point.
///
/// Audio or event loop failures during startup are fatal and end the process with a
/// non-zero exit code.
fn main() -> ExitCode {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the app, runs the event loop until quit and terminates.
fn run() -> Result<(), AppError> {
    let quit_requested = Arc::new(AtomicBool::new(false));
    {
        let quit_requested = quit_requested.clone();
        ctrlc::set_handler(move || quit_requested.store(true, Ordering::Relaxed))?;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let audio = AudioEngine::new(KiraBackend::new(), AudioSettings::default());
    let mut app = App::new(audio, quit_requested);
    app.initialize()?;

    let result = event_loop.run_app(&mut app);
    app.terminate();
    result?;
    if let Some(err) = app.take_setup_error() {
        return Err(err.into());
    }
    Ok(())
}
