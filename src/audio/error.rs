//! Error types for the audio engine and its backends.

use std::path::PathBuf;

use thiserror::Error;

/// One phase of the backend bring-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Memory,
    StreamManager,
    Language,
    LowLevelIo,
    BasePath,
    SoundEngine,
    Music,
    SpatialAudio,
    Communication,
    InitBank,
    DefaultObjects,
}

impl Subsystem {
    pub fn name(self) -> &'static str {
        match self {
            Self::Memory => "memory manager",
            Self::StreamManager => "streaming manager",
            Self::Language => "language",
            Self::LowLevelIo => "low-level I/O",
            Self::BasePath => "soundbank base path",
            Self::SoundEngine => "sound engine",
            Self::Music => "music engine",
            Self::SpatialAudio => "spatial audio",
            Self::Communication => "communication",
            Self::InitBank => "init bank",
            Self::DefaultObjects => "default game objects",
        }
    }
}

/// Errors produced by [`AudioEngine`](super::AudioEngine) and [`SoundBackend`](super::SoundBackend)s.
#[derive(Debug, Error)]
pub enum AudioError {
    /// A bring-up phase failed. Earlier phases stay up.
    #[error("could not initialize the {}: {reason}", subsystem.name())]
    Subsystem {
        subsystem: Subsystem,
        reason: String,
    },
    #[error("audio engine is not initialized")]
    NotInitialized,
    #[error("bank '{name}' not found under {searched:?}")]
    BankNotFound { name: String, searched: Vec<PathBuf> },
    #[error("bank '{name}' is malformed: {source}")]
    BankParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to load sound {path:?}: {reason}")]
    SoundLoad { path: PathBuf, reason: String },
    #[error("could not register game object {id} ('{name}'): {reason}")]
    Registration { id: u64, name: String, reason: String },
    #[error("event '{0}' is not defined by any loaded bank")]
    EventNotFound(String),
    #[error("game object {0} is not registered")]
    UnknownGameObject(u64),
    #[error("failed to start event '{event}': {reason}")]
    PlaybackFailed { event: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AudioError {
    pub(crate) fn subsystem(subsystem: Subsystem, reason: impl ToString) -> Self {
        Self::Subsystem {
            subsystem,
            reason: reason.to_string(),
        }
    }
}
