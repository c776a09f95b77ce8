//! [`AudioEngine`]: lifecycle and facade over a [`SoundBackend`].
//!
//! The engine is the single owner of the backend. It brings the backend's subsystems up in
//! a fixed dependency order, loads the startup bank, registers a default object and a
//! default listener, and tears everything down in reverse on [`AudioEngine::terminate`].
//!
//! Only one engine should exist per process and it must be driven from one thread; the
//! application owns it and passes it by reference where needed.

use tracing::{debug, info, warn};

use super::backend::SoundBackend;
use super::error::{AudioError, Subsystem};
use super::object_id::{BankId, GameObjectId, PlayingId};
use super::settings::AudioSettings;

const DEFAULT_OBJECT_NAME: &str = "Default Object";
const DEFAULT_LISTENER_NAME: &str = "Default Listener";

pub struct AudioEngine<B: SoundBackend> {
    backend: B,
    settings: AudioSettings,
    default_object: Option<GameObjectId>,
    default_listener: Option<GameObjectId>,
}

impl<B: SoundBackend> AudioEngine<B> {
    pub fn new(backend: B, settings: AudioSettings) -> Self {
        Self {
            backend,
            settings,
            default_object: None,
            default_listener: None,
        }
    }

    /// Brings every subsystem up, loads the startup bank and registers the default
    /// game objects.
    ///
    /// Calling this on an initialized engine returns `Ok(())` without doing anything.
    /// When an earlier call got the subsystems up but failed on the startup bank or the
    /// default objects, only those remaining steps are retried.
    ///
    /// # Errors
    /// Returns [`AudioError::Subsystem`] naming the first phase that failed. Phases that
    /// came up before it are left running; callers are expected to treat this as fatal.
    pub fn initialize(&mut self) -> Result<(), AudioError> {
        if self.is_initialized() && self.default_object.is_some() {
            return Ok(());
        }
        if !self.is_initialized() {
            self.bring_up_subsystems()?;
        }
        self.register_defaults()?;

        info!("audio engine initialized");
        Ok(())
    }

    fn bring_up_subsystems(&mut self) -> Result<(), AudioError> {
        let settings = &self.settings;
        let backend = &mut self.backend;

        phase(Subsystem::Memory, backend.init_memory(&settings.memory))?;
        phase(
            Subsystem::StreamManager,
            backend.create_stream_manager(&settings.streaming),
        )?;
        phase(
            Subsystem::Language,
            backend.set_language(&settings.streaming.language),
        )?;
        phase(Subsystem::LowLevelIo, backend.init_low_level_io(&settings.device))?;
        phase(
            Subsystem::BasePath,
            backend.set_base_path(&settings.device.base_path),
        )?;
        phase(Subsystem::SoundEngine, backend.init_sound_engine(&settings.init))?;
        phase(Subsystem::Music, backend.init_music(&settings.music))?;
        phase(
            Subsystem::SpatialAudio,
            backend.init_spatial_audio(&settings.spatial),
        )?;
        #[cfg(debug_assertions)]
        phase(
            Subsystem::Communication,
            backend.init_communication(&settings.comm),
        )?;

        if !backend.is_initialized() {
            return Err(AudioError::subsystem(
                Subsystem::SoundEngine,
                "backend does not report itself initialized",
            ));
        }
        Ok(())
    }

    /// Loads the startup bank, then registers and binds the default object and listener.
    fn register_defaults(&mut self) -> Result<(), AudioError> {
        let init_bank = self.settings.init_bank.clone();
        phase(Subsystem::InitBank, self.load_bank(&init_bank).map(drop))?;

        let object = Self::new_object_id();
        let listener = Self::new_object_id();
        phase(
            Subsystem::DefaultObjects,
            self.register_object(object, DEFAULT_OBJECT_NAME)
                .and_then(|()| self.register_object(listener, DEFAULT_LISTENER_NAME)),
        )?;
        self.default_object = Some(object);
        self.default_listener = Some(listener);
        self.set_default_listener(listener);
        Ok(())
    }

    /// Tears subsystems down in reverse bring-up order. No-op when not initialized.
    pub fn terminate(&mut self) {
        if !self.is_initialized() {
            return;
        }

        #[cfg(debug_assertions)]
        self.backend.term_communication();
        self.backend.term_spatial_audio();
        self.backend.term_music();
        self.backend.term_sound_engine();
        self.backend.term_low_level_io();
        self.backend.destroy_stream_manager();
        self.backend.term_memory();

        self.default_object = None;
        self.default_listener = None;
        info!("audio engine terminated");
    }

    /// Runs one frame of audio processing. Returns `false` when not initialized.
    pub fn render_audio(&mut self) -> bool {
        if !self.is_initialized() {
            return false;
        }
        self.backend.render_audio();
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.is_initialized()
    }

    pub fn set_default_listener(&mut self, listener: GameObjectId) {
        if !self.is_initialized() {
            return;
        }
        self.backend.set_default_listeners(&[listener]);
    }

    /// Loads a bank by file name, synchronously.
    pub fn load_bank(&mut self, name: &str) -> Result<BankId, AudioError> {
        if !self.is_initialized() {
            return Err(AudioError::NotInitialized);
        }
        let id = self.backend.load_bank(name)?;
        debug!(bank = name, id = id.0, "bank loaded");
        Ok(id)
    }

    /// Mints the next unused game object id.
    pub fn new_object_id() -> GameObjectId {
        GameObjectId::next()
    }

    pub fn register_object(&mut self, id: GameObjectId, name: &str) -> Result<(), AudioError> {
        self.backend.register_game_object(id, name)
    }

    /// Posts `event` on `target`, or on the default object when `target` is `None`.
    ///
    /// Returns `None` when the engine is not initialized or the event could not start.
    pub fn post_event(&mut self, event: &str, target: Option<GameObjectId>) -> Option<PlayingId> {
        if !self.is_initialized() {
            return None;
        }
        let target = target.or(self.default_object)?;
        match self.backend.post_event(event, target) {
            Ok(playing_id) => {
                debug!(event, %target, playing_id = playing_id.get(), "event posted");
                Some(playing_id)
            }
            Err(err) => {
                warn!("could not post event '{event}' on {target}: {err}");
                None
            }
        }
    }

    pub fn default_object(&self) -> Option<GameObjectId> {
        self.default_object
    }

    pub fn default_listener(&self) -> Option<GameObjectId> {
        self.default_listener
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

fn phase(subsystem: Subsystem, result: Result<(), AudioError>) -> Result<(), AudioError> {
    match result {
        Ok(()) => {
            debug!("{} up", subsystem.name());
            Ok(())
        }
        Err(err @ AudioError::Subsystem { .. }) => Err(err),
        Err(err) => Err(AudioError::subsystem(subsystem, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingBackend;

    fn engine() -> AudioEngine<RecordingBackend> {
        AudioEngine::new(RecordingBackend::default(), AudioSettings::default())
    }

    #[test]
    fn brings_subsystems_up_in_dependency_order() {
        let mut engine = engine();
        engine.initialize().unwrap();

        let mut expected = vec![
            "init_memory",
            "create_stream_manager",
            "set_language",
            "init_low_level_io",
            "set_base_path",
            "init_sound_engine",
            "init_music",
            "init_spatial_audio",
        ];
        #[cfg(debug_assertions)]
        expected.push("init_communication");
        expected.extend(["load_bank", "register", "register", "set_default_listeners"]);

        assert_eq!(engine.backend().call_names(), expected);
        assert_eq!(engine.backend().banks, vec!["Init.bnk".to_string()]);
    }

    #[test]
    fn tears_down_in_reverse_order() {
        let mut engine = engine();
        engine.initialize().unwrap();
        let before = engine.backend().calls.len();
        engine.terminate();

        let mut expected = Vec::new();
        #[cfg(debug_assertions)]
        expected.push("term_communication");
        expected.extend([
            "term_spatial_audio",
            "term_music",
            "term_sound_engine",
            "term_low_level_io",
            "destroy_stream_manager",
            "term_memory",
        ]);

        assert_eq!(&engine.backend().call_names()[before..], expected.as_slice());
        assert!(!engine.is_initialized());
        assert_eq!(engine.default_object(), None);
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut engine = engine();
        engine.initialize().unwrap();
        let object = engine.default_object();
        let calls = engine.backend().calls.len();

        engine.initialize().unwrap();

        assert!(engine.is_initialized());
        assert_eq!(engine.backend().calls.len(), calls);
        assert_eq!(engine.backend().banks.len(), 1);
        assert_eq!(engine.backend().objects.len(), 2);
        assert_eq!(engine.default_object(), object);
    }

    #[test]
    fn default_listener_is_bound() {
        let mut engine = engine();
        engine.initialize().unwrap();
        let listener = engine.default_listener().unwrap();
        assert_eq!(engine.backend().default_listeners, vec![listener]);
        assert_ne!(engine.default_object(), Some(listener));
    }

    #[test]
    fn terminate_without_initialize_is_a_no_op() {
        let mut engine = engine();
        engine.terminate();
        assert!(engine.backend().calls.is_empty());
    }

    #[test]
    fn calls_before_initialize_report_not_ready() {
        let mut engine = engine();
        assert!(!engine.render_audio());
        assert_eq!(engine.post_event("MusicTest", None), None);
        assert!(matches!(
            engine.load_bank("Music.bnk"),
            Err(AudioError::NotInitialized)
        ));
        assert!(engine.register_object(GameObjectId::new(9), "Early").is_err());
        assert!(engine.backend().calls.is_empty());
    }

    #[test]
    fn missing_target_routes_to_default_object() {
        let mut engine = engine();
        engine.initialize().unwrap();
        let default = engine.default_object().unwrap();

        assert!(engine.post_event("MusicTest", None).is_some());
        assert!(engine.post_event("MusicTest", GameObjectId::from_raw(0)).is_some());
        assert!(engine.post_event("MusicTest", GameObjectId::from_raw(-1)).is_some());

        let targets: Vec<_> = engine.backend().posted.iter().map(|(_, t)| *t).collect();
        assert_eq!(targets, vec![default, default, default]);
    }

    #[test]
    fn explicit_target_is_used_verbatim() {
        let mut engine = engine();
        engine.initialize().unwrap();
        let enemy = AudioEngine::<RecordingBackend>::new_object_id();
        engine.register_object(enemy, "Enemy").unwrap();

        engine.post_event("Hit", Some(enemy)).unwrap();
        assert_eq!(engine.backend().posted, vec![("Hit".to_string(), enemy)]);
    }

    #[test]
    fn end_to_end_lifecycle() {
        let mut engine = engine();
        engine.initialize().unwrap();

        let enemy = GameObjectId::new(5);
        assert!(engine.register_object(enemy, "Enemy").is_ok());
        let playing = engine.post_event("Hit", Some(enemy));
        assert!(playing.is_some_and(|id| id.get() != 0));
        assert!(engine.render_audio());

        engine.terminate();
        let calls = engine.backend().calls.len();
        assert!(!engine.render_audio());
        assert_eq!(engine.backend().calls.len(), calls);
    }

    #[test]
    fn failed_phase_stops_bring_up_without_rollback() {
        let mut engine = AudioEngine::new(
            RecordingBackend::failing_at("init_music"),
            AudioSettings::default(),
        );

        let err = engine.initialize().unwrap_err();
        assert!(matches!(
            err,
            AudioError::Subsystem {
                subsystem: Subsystem::Music,
                ..
            }
        ));
        let names = engine.backend().call_names();
        assert_eq!(names.last(), Some(&"init_music"));
        assert!(!names.iter().any(|n| n.starts_with("term")));
        assert!(engine.backend().banks.is_empty());
    }

    #[test]
    fn failed_init_bank_is_reported_as_init_bank() {
        let mut engine = AudioEngine::new(
            RecordingBackend::failing_at("load_bank"),
            AudioSettings::default(),
        );
        let err = engine.initialize().unwrap_err();
        assert!(matches!(
            err,
            AudioError::Subsystem {
                subsystem: Subsystem::InitBank,
                ..
            }
        ));
    }

    #[test]
    fn retry_after_init_bank_failure_finishes_startup() {
        let mut engine = AudioEngine::new(
            RecordingBackend::failing_at("load_bank"),
            AudioSettings::default(),
        );
        assert!(engine.initialize().is_err());
        assert!(engine.is_initialized());
        assert_eq!(engine.default_object(), None);

        // Still failing: the retry must report it rather than claim success.
        assert!(engine.initialize().is_err());
        assert_eq!(engine.default_object(), None);

        engine.backend_mut().clear_failure();
        engine.initialize().unwrap();
        let default = engine.default_object().unwrap();
        assert!(engine.post_event("Hit", None).is_some());
        assert_eq!(engine.backend().posted, vec![("Hit".to_string(), default)]);

        let memory_inits = engine
            .backend()
            .calls
            .iter()
            .filter(|c| **c == "init_memory")
            .count();
        assert_eq!(memory_inits, 1);
        assert_eq!(engine.backend().banks, vec!["Init.bnk".to_string()]);
    }

    #[test]
    fn unknown_target_yields_no_instance() {
        let mut engine = engine();
        engine.initialize().unwrap();
        assert_eq!(engine.post_event("Hit", Some(GameObjectId::new(u64::MAX))), None);
    }

    #[test]
    fn render_audio_reaches_backend_once_per_call() {
        let mut engine = engine();
        engine.initialize().unwrap();
        for _ in 0..3 {
            assert!(engine.render_audio());
        }
        assert_eq!(engine.backend().frames, 3);
    }
}
