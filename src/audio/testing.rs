//! In-memory backend that records every call, for tests.

use std::collections::HashMap;
use std::path::Path;

use super::backend::SoundBackend;
use super::error::AudioError;
use super::object_id::{BankId, GameObjectId, PlayingId};
#[cfg(debug_assertions)]
use super::settings::CommSettings;
use super::settings::{
    DeviceSettings, InitSettings, MemorySettings, MusicSettings, SpatialSettings, StreamSettings,
};

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<&'static str>,
    pub banks: Vec<String>,
    pub objects: HashMap<GameObjectId, String>,
    pub default_listeners: Vec<GameObjectId>,
    pub posted: Vec<(String, GameObjectId)>,
    pub frames: u64,
    fail_at: Option<&'static str>,
    engine_up: bool,
    next_playing_id: u32,
}

impl RecordingBackend {
    /// A backend whose call named `call` fails.
    pub fn failing_at(call: &'static str) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    pub fn clear_failure(&mut self) {
        self.fail_at = None;
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.clone()
    }

    fn record(&mut self, call: &'static str) -> Result<(), AudioError> {
        self.calls.push(call);
        if self.fail_at == Some(call) {
            return Err(AudioError::Io(std::io::Error::other("injected failure")));
        }
        Ok(())
    }
}

impl SoundBackend for RecordingBackend {
    fn init_memory(&mut self, _: &MemorySettings) -> Result<(), AudioError> {
        self.record("init_memory")
    }

    fn create_stream_manager(&mut self, _: &StreamSettings) -> Result<(), AudioError> {
        self.record("create_stream_manager")
    }

    fn set_language(&mut self, _: &str) -> Result<(), AudioError> {
        self.record("set_language")
    }

    fn init_low_level_io(&mut self, _: &DeviceSettings) -> Result<(), AudioError> {
        self.record("init_low_level_io")
    }

    fn set_base_path(&mut self, _: &Path) -> Result<(), AudioError> {
        self.record("set_base_path")
    }

    fn init_sound_engine(&mut self, _: &InitSettings) -> Result<(), AudioError> {
        self.record("init_sound_engine")?;
        self.engine_up = true;
        Ok(())
    }

    fn init_music(&mut self, _: &MusicSettings) -> Result<(), AudioError> {
        self.record("init_music")
    }

    fn init_spatial_audio(&mut self, _: &SpatialSettings) -> Result<(), AudioError> {
        self.record("init_spatial_audio")
    }

    #[cfg(debug_assertions)]
    fn init_communication(&mut self, _: &CommSettings) -> Result<(), AudioError> {
        self.record("init_communication")
    }

    #[cfg(debug_assertions)]
    fn term_communication(&mut self) {
        self.calls.push("term_communication");
    }

    fn term_spatial_audio(&mut self) {
        self.calls.push("term_spatial_audio");
    }

    fn term_music(&mut self) {
        self.calls.push("term_music");
    }

    fn term_sound_engine(&mut self) {
        self.calls.push("term_sound_engine");
        self.engine_up = false;
        self.objects.clear();
    }

    fn term_low_level_io(&mut self) {
        self.calls.push("term_low_level_io");
    }

    fn destroy_stream_manager(&mut self) {
        self.calls.push("destroy_stream_manager");
    }

    fn term_memory(&mut self) {
        self.calls.push("term_memory");
    }

    fn is_initialized(&self) -> bool {
        self.engine_up
    }

    fn render_audio(&mut self) {
        self.frames += 1;
    }

    fn load_bank(&mut self, name: &str) -> Result<BankId, AudioError> {
        self.record("load_bank")?;
        self.banks.push(name.to_string());
        Ok(BankId::from_name(name))
    }

    fn register_game_object(&mut self, id: GameObjectId, name: &str) -> Result<(), AudioError> {
        if !self.engine_up {
            return Err(AudioError::Registration {
                id: id.get(),
                name: name.to_string(),
                reason: "sound engine is not running".to_string(),
            });
        }
        self.record("register")?;
        self.objects.insert(id, name.to_string());
        Ok(())
    }

    fn set_default_listeners(&mut self, listeners: &[GameObjectId]) {
        self.calls.push("set_default_listeners");
        self.default_listeners = listeners.to_vec();
    }

    fn post_event(&mut self, event: &str, target: GameObjectId) -> Result<PlayingId, AudioError> {
        if !self.objects.contains_key(&target) {
            return Err(AudioError::UnknownGameObject(target.get()));
        }
        self.next_playing_id += 1;
        self.posted.push((event.to_string(), target));
        PlayingId::new(self.next_playing_id)
            .ok_or_else(|| AudioError::EventNotFound(event.to_string()))
    }
}
