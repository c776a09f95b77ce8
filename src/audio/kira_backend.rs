//! [`SoundBackend`] built on kira.
//!
//! kira mixes on its own audio thread, so most phases here only validate configuration
//! and build the handles later calls need:
//!
//! - memory: reserves the instance, object and bank tables
//! - stream manager / language: decides which localized folder banks are read from
//! - low-level I/O / base path: checks the soundbank directory
//! - sound engine: the [`AudioManager`] itself
//! - music: a sub-track that events on the `music` bus play through
//! - spatial audio: the listener
//! - communication (debug builds): a frame profiler that reports to the log

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kira::backend::Backend;
use kira::listener::ListenerHandle;
use kira::sound::PlaybackState;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::track::{TrackBuilder, TrackHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};
use tracing::{debug, info, warn};

use super::backend::SoundBackend;
use super::bank::{Bus, read_bank};
use super::error::{AudioError, Subsystem};
use super::object_id::{BankId, GameObjectId, PlayingId};
#[cfg(debug_assertions)]
use super::settings::CommSettings;
use super::settings::{
    DeviceSettings, InitSettings, MemorySettings, MusicSettings, SpatialSettings, StreamSettings,
};

struct LoadedEvent {
    data: StaticSoundData,
    bus: Bus,
}

struct PlayingInstance {
    id: PlayingId,
    bus: Bus,
    handle: StaticSoundHandle,
}

#[cfg(debug_assertions)]
struct Profiler {
    report_interval_frames: u64,
    frames: u64,
    posted: u64,
    peak_instances: usize,
}

#[cfg(debug_assertions)]
impl Profiler {
    fn frame(&mut self, playing: usize) {
        self.frames += 1;
        self.peak_instances = self.peak_instances.max(playing);
        if self.report_interval_frames > 0 && self.frames % self.report_interval_frames == 0 {
            debug!(
                frames = self.frames,
                posted = self.posted,
                playing,
                peak = self.peak_instances,
                "audio profiler"
            );
        }
    }
}

/// Generic over the kira [`Backend`] so tests can run without an audio device.
pub struct KiraBackend<K: Backend = DefaultBackend> {
    memory: Option<MemorySettings>,
    stream_manager: bool,
    language: Option<String>,
    low_level_io: bool,
    base_path: Option<PathBuf>,
    manager: Option<AudioManager<K>>,
    music_track: Option<TrackHandle>,
    listener: Option<ListenerHandle>,
    #[cfg(debug_assertions)]
    profiler: Option<Profiler>,
    banks: HashMap<BankId, String>,
    events: HashMap<String, LoadedEvent>,
    objects: HashMap<GameObjectId, String>,
    default_listeners: Vec<GameObjectId>,
    instances: Vec<PlayingInstance>,
    next_playing_id: u32,
}

impl<K: Backend> Default for KiraBackend<K> {
    fn default() -> Self {
        Self {
            memory: None,
            stream_manager: false,
            language: None,
            low_level_io: false,
            base_path: None,
            manager: None,
            music_track: None,
            listener: None,
            #[cfg(debug_assertions)]
            profiler: None,
            banks: HashMap::new(),
            events: HashMap::new(),
            objects: HashMap::new(),
            default_listeners: Vec::new(),
            instances: Vec::new(),
            next_playing_id: 0,
        }
    }
}

impl KiraBackend {
    /// A backend that plays through the system's default audio device.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Backend> KiraBackend<K> {
    fn manager(&mut self) -> Result<&mut AudioManager<K>, AudioError> {
        self.manager.as_mut().ok_or(AudioError::NotInitialized)
    }

    fn next_playing_id(&mut self) -> PlayingId {
        loop {
            self.next_playing_id = self.next_playing_id.wrapping_add(1);
            if let Some(id) = PlayingId::new(self.next_playing_id) {
                return id;
            }
        }
    }

    fn stop_all(&mut self) {
        for instance in &mut self.instances {
            instance.handle.stop(Tween::default());
        }
        self.instances.clear();
    }
}

impl<K> SoundBackend for KiraBackend<K>
where
    K: Backend,
    K::Settings: Default,
    K::Error: std::fmt::Debug,
{
    fn init_memory(&mut self, settings: &MemorySettings) -> Result<(), AudioError> {
        self.instances.reserve(settings.max_playing_instances);
        self.objects.reserve(settings.max_game_objects);
        self.banks.reserve(settings.max_banks);
        self.memory = Some(settings.clone());
        Ok(())
    }

    fn create_stream_manager(&mut self, _settings: &StreamSettings) -> Result<(), AudioError> {
        if self.memory.is_none() {
            return Err(AudioError::subsystem(
                Subsystem::StreamManager,
                "memory manager is not initialized",
            ));
        }
        self.stream_manager = true;
        Ok(())
    }

    fn set_language(&mut self, language: &str) -> Result<(), AudioError> {
        if !self.stream_manager {
            return Err(AudioError::subsystem(
                Subsystem::Language,
                "streaming manager does not exist",
            ));
        }
        if language.contains(['/', '\\']) {
            return Err(AudioError::subsystem(
                Subsystem::Language,
                format!("'{language}' is not a valid language name"),
            ));
        }
        self.language = Some(language.to_string());
        Ok(())
    }

    fn init_low_level_io(&mut self, _settings: &DeviceSettings) -> Result<(), AudioError> {
        if !self.stream_manager {
            return Err(AudioError::subsystem(
                Subsystem::LowLevelIo,
                "streaming manager does not exist",
            ));
        }
        self.low_level_io = true;
        Ok(())
    }

    fn set_base_path(&mut self, path: &Path) -> Result<(), AudioError> {
        if !self.low_level_io {
            return Err(AudioError::subsystem(
                Subsystem::BasePath,
                "low-level I/O is not initialized",
            ));
        }
        if !path.is_dir() {
            return Err(AudioError::subsystem(
                Subsystem::BasePath,
                format!("{} is not a directory", path.display()),
            ));
        }
        self.base_path = Some(path.to_path_buf());
        Ok(())
    }

    fn init_sound_engine(&mut self, settings: &InitSettings) -> Result<(), AudioError> {
        if self.base_path.is_none() {
            return Err(AudioError::subsystem(
                Subsystem::SoundEngine,
                "soundbank base path is not set",
            ));
        }
        if settings.plugin_path.is_dir() {
            debug!("searching {} for plugins", settings.plugin_path.display());
        } else {
            debug!(
                "plugin directory {} not found, running without plugins",
                settings.plugin_path.display()
            );
        }

        let mut manager = AudioManager::<K>::new(AudioManagerSettings::default())
            .map_err(|err| AudioError::subsystem(Subsystem::SoundEngine, format!("{err:?}")))?;
        manager
            .main_track()
            .set_volume(Decibels(settings.master_volume_db), Tween::default());
        self.manager = Some(manager);
        Ok(())
    }

    fn init_music(&mut self, settings: &MusicSettings) -> Result<(), AudioError> {
        let track = self
            .manager()?
            .add_sub_track(TrackBuilder::new().volume(Decibels(settings.volume_db)))
            .map_err(|err| AudioError::subsystem(Subsystem::Music, err))?;
        self.music_track = Some(track);
        Ok(())
    }

    fn init_spatial_audio(&mut self, settings: &SpatialSettings) -> Result<(), AudioError> {
        let listener = self
            .manager()?
            .add_listener(settings.listener_position, settings.listener_orientation)
            .map_err(|err| AudioError::subsystem(Subsystem::SpatialAudio, err))?;
        self.listener = Some(listener);
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn init_communication(&mut self, settings: &CommSettings) -> Result<(), AudioError> {
        self.manager()?;
        self.profiler = Some(Profiler {
            report_interval_frames: settings.report_interval_frames,
            frames: 0,
            posted: 0,
            peak_instances: 0,
        });
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn term_communication(&mut self) {
        if let Some(profiler) = self.profiler.take() {
            info!(
                frames = profiler.frames,
                posted = profiler.posted,
                peak = profiler.peak_instances,
                "audio profiler closed"
            );
        }
    }

    fn term_spatial_audio(&mut self) {
        self.listener = None;
    }

    fn term_music(&mut self) {
        self.music_track = None;
    }

    fn term_sound_engine(&mut self) {
        self.stop_all();
        self.events.clear();
        self.banks.clear();
        self.objects.clear();
        self.default_listeners.clear();
        self.music_track = None;
        self.listener = None;
        self.manager = None;
    }

    fn term_low_level_io(&mut self) {
        self.base_path = None;
        self.low_level_io = false;
    }

    fn destroy_stream_manager(&mut self) {
        self.language = None;
        self.stream_manager = false;
    }

    fn term_memory(&mut self) {
        self.memory = None;
    }

    fn is_initialized(&self) -> bool {
        self.manager.is_some()
    }

    fn render_audio(&mut self) {
        self.instances.retain(|instance| {
            let playing = instance.handle.state() != PlaybackState::Stopped;
            if !playing {
                debug!(playing_id = instance.id.get(), bus = ?instance.bus, "instance finished");
            }
            playing
        });
        #[cfg(debug_assertions)]
        if let Some(profiler) = self.profiler.as_mut() {
            profiler.frame(self.instances.len());
        }
    }

    fn load_bank(&mut self, name: &str) -> Result<BankId, AudioError> {
        self.manager()?;
        let id = BankId::from_name(name);
        if self.banks.contains_key(&id) {
            return Ok(id);
        }
        let base = self.base_path.clone().ok_or(AudioError::NotInitialized)?;

        let (manifest, dir) = read_bank(&base, self.language.as_deref(), name)?;
        let mut loaded = Vec::with_capacity(manifest.events.len());
        for (event, definition) in manifest.events {
            let path = dir.join(&definition.file);
            let mut data =
                StaticSoundData::from_file(&path).map_err(|err| AudioError::SoundLoad {
                    path: path.clone(),
                    reason: err.to_string(),
                })?;
            if definition.looping {
                data = data.loop_region(0.0..);
            }
            data = data.volume(Decibels(definition.volume_db));
            loaded.push((
                event,
                LoadedEvent {
                    data,
                    bus: definition.bus,
                },
            ));
        }

        for (event, definition) in loaded {
            if self.events.insert(event.clone(), definition).is_some() {
                warn!("event '{event}' from bank '{name}' replaces an earlier definition");
            }
        }
        self.banks.insert(id, name.to_string());
        Ok(id)
    }

    fn register_game_object(&mut self, id: GameObjectId, name: &str) -> Result<(), AudioError> {
        if self.manager.is_none() {
            return Err(AudioError::Registration {
                id: id.get(),
                name: name.to_string(),
                reason: "sound engine is not initialized".to_string(),
            });
        }
        self.objects.insert(id, name.to_string());
        Ok(())
    }

    fn set_default_listeners(&mut self, listeners: &[GameObjectId]) {
        self.default_listeners.clear();
        self.default_listeners.extend_from_slice(listeners);
    }

    fn post_event(&mut self, event: &str, target: GameObjectId) -> Result<PlayingId, AudioError> {
        if !self.objects.contains_key(&target) {
            return Err(AudioError::UnknownGameObject(target.get()));
        }
        let definition = self
            .events
            .get(event)
            .ok_or_else(|| AudioError::EventNotFound(event.to_string()))?;
        let data = definition.data.clone();
        let bus = definition.bus;

        let played = match self.music_track.as_mut().filter(|_| bus == Bus::Music) {
            Some(track) => track.play(data),
            None => match self.manager.as_mut() {
                Some(manager) => manager.play(data),
                None => return Err(AudioError::NotInitialized),
            },
        };
        let handle = played.map_err(|err| AudioError::PlaybackFailed {
            event: event.to_string(),
            reason: format!("{err:?}"),
        })?;

        let id = self.next_playing_id();
        self.instances.push(PlayingInstance { id, bus, handle });
        #[cfg(debug_assertions)]
        if let Some(profiler) = self.profiler.as_mut() {
            profiler.posted += 1;
        }
        debug!(
            event,
            playing_id = id.get(),
            instances = self.instances.len(),
            "playing"
        );
        Ok(id)
    }
}

impl<K: Backend> Drop for KiraBackend<K> {
    fn drop(&mut self) {
        if self.manager.is_some() {
            warn!("audio backend dropped while initialized");
        }
    }
}
