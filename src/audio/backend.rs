//! The seam between [`AudioEngine`](super::AudioEngine) and the library doing the actual mixing.
//!
//! A backend exposes each bring-up phase separately so the engine owns the ordering:
//! phases come up in the order they are declared here and go down in reverse.

use std::path::Path;

use super::error::AudioError;
use super::object_id::{BankId, GameObjectId, PlayingId};
#[cfg(debug_assertions)]
use super::settings::CommSettings;
use super::settings::{
    DeviceSettings, InitSettings, MemorySettings, MusicSettings, SpatialSettings, StreamSettings,
};

pub trait SoundBackend {
    fn init_memory(&mut self, settings: &MemorySettings) -> Result<(), AudioError>;
    fn create_stream_manager(&mut self, settings: &StreamSettings) -> Result<(), AudioError>;
    fn set_language(&mut self, language: &str) -> Result<(), AudioError>;
    fn init_low_level_io(&mut self, settings: &DeviceSettings) -> Result<(), AudioError>;
    fn set_base_path(&mut self, path: &Path) -> Result<(), AudioError>;
    fn init_sound_engine(&mut self, settings: &InitSettings) -> Result<(), AudioError>;
    fn init_music(&mut self, settings: &MusicSettings) -> Result<(), AudioError>;
    fn init_spatial_audio(&mut self, settings: &SpatialSettings) -> Result<(), AudioError>;
    #[cfg(debug_assertions)]
    fn init_communication(&mut self, settings: &CommSettings) -> Result<(), AudioError>;

    #[cfg(debug_assertions)]
    fn term_communication(&mut self);
    fn term_spatial_audio(&mut self);
    fn term_music(&mut self);
    fn term_sound_engine(&mut self);
    fn term_low_level_io(&mut self);
    fn destroy_stream_manager(&mut self);
    fn term_memory(&mut self);

    /// True once the core sound engine is up and until it is terminated.
    fn is_initialized(&self) -> bool;

    /// Per-frame processing. Must not allocate or block on I/O.
    fn render_audio(&mut self);

    fn load_bank(&mut self, name: &str) -> Result<BankId, AudioError>;
    fn register_game_object(&mut self, id: GameObjectId, name: &str) -> Result<(), AudioError>;
    fn set_default_listeners(&mut self, listeners: &[GameObjectId]);
    fn post_event(&mut self, event: &str, target: GameObjectId) -> Result<PlayingId, AudioError>;
}
