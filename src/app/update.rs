//! Start, update and render for [`App`].

use tracing::{error, info, warn};

use super::event_handler::App;
use crate::app::{MUSIC_BANK, MUSIC_EVENT};
use crate::audio::SoundBackend;

impl<B: SoundBackend> App<B> {
    /// One-time setup once the window exists: start the music and shape the text.
    pub fn start(&mut self) {
        self.start_audio();
        if let Some(state) = self.state.as_mut() {
            state.prepare_text();
        }
        info!("app started");
    }

    fn start_audio(&mut self) {
        if let Err(err) = self.audio.load_bank(MUSIC_BANK) {
            warn!("could not load {MUSIC_BANK}: {err}");
        }
        if self.audio.post_event(MUSIC_EVENT, None).is_none() {
            warn!("{MUSIC_EVENT} did not start");
        }
    }

    /// Ticks the audio engine once.
    pub fn update(&mut self) {
        self.audio.render_audio();
    }

    /// Clears, draws the text and presents.
    pub fn render(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if let Err(err) = state.render() {
            error!("frame failed: {err}");
        }
    }

    pub fn handle_redraw(&mut self) {
        self.update();
        self.render();
    }
}
