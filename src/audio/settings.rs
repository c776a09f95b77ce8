//! Initialization settings for every audio subsystem.
//!
//! Each group mirrors one phase of [`AudioEngine::initialize`](super::AudioEngine::initialize).
//! Defaults describe the shipped layout: banks under `assets/soundbanks/<platform>/`,
//! plugins under `plugins/audio`, English(US) as the localized language.

use std::path::PathBuf;

/// Bank loaded unconditionally during initialization.
pub const INIT_BANK: &str = "Init.bnk";

/// Platform folder name under the soundbank root.
#[cfg(target_os = "windows")]
pub const AUDIO_PLATFORM: &str = "Windows";
#[cfg(target_os = "macos")]
pub const AUDIO_PLATFORM: &str = "Mac";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const AUDIO_PLATFORM: &str = "Linux";

/// All options recognized by the audio engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSettings {
    pub memory: MemorySettings,
    pub streaming: StreamSettings,
    pub device: DeviceSettings,
    pub init: InitSettings,
    pub music: MusicSettings,
    pub spatial: SpatialSettings,
    /// Profiling/communication layer. Only compiled into debug builds.
    #[cfg(debug_assertions)]
    pub comm: CommSettings,
    /// Bank loaded right after the core engine is up.
    pub init_bank: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            memory: MemorySettings::default(),
            streaming: StreamSettings::default(),
            device: DeviceSettings::default(),
            init: InitSettings::default(),
            music: MusicSettings::default(),
            spatial: SpatialSettings::default(),
            #[cfg(debug_assertions)]
            comm: CommSettings::default(),
            init_bank: INIT_BANK.to_string(),
        }
    }
}

/// Capacities reserved up front so the per-frame tick never grows a table.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySettings {
    pub max_playing_instances: usize,
    pub max_game_objects: usize,
    pub max_banks: usize,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            max_playing_instances: 128,
            max_game_objects: 64,
            max_banks: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreamSettings {
    /// Language folder searched first for localized banks.
    pub language: String,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            language: "English(US)".to_string(),
        }
    }
}

/// Low-level I/O device settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSettings {
    /// Directory banks are resolved against.
    pub base_path: PathBuf,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("assets/soundbanks").join(AUDIO_PLATFORM),
        }
    }
}

/// Core sound engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InitSettings {
    /// Where dynamic effect plugins are searched for.
    pub plugin_path: PathBuf,
    /// Gain applied to the master output, in decibels.
    pub master_volume_db: f32,
}

impl Default for InitSettings {
    fn default() -> Self {
        Self {
            plugin_path: PathBuf::from("plugins/audio"),
            master_volume_db: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MusicSettings {
    pub volume_db: f32,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self { volume_db: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialSettings {
    pub listener_position: [f32; 3],
    /// Quaternion (x, y, z, w).
    pub listener_orientation: [f32; 4],
}

impl Default for SpatialSettings {
    fn default() -> Self {
        Self {
            listener_position: [0.0, 0.0, 0.0],
            listener_orientation: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[cfg(debug_assertions)]
#[derive(Debug, Clone, PartialEq)]
pub struct CommSettings {
    /// Frames between two profiler summaries in the log.
    pub report_interval_frames: u64,
}

#[cfg(debug_assertions)]
impl Default for CommSettings {
    fn default() -> Self {
        Self {
            report_interval_frames: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_follow_the_shipped_layout() {
        let settings = AudioSettings::default();
        assert!(settings.device.base_path.starts_with("assets/soundbanks"));
        assert!(settings.device.base_path.ends_with(AUDIO_PLATFORM));
        assert_eq!(settings.init.plugin_path, PathBuf::from("plugins/audio"));
        assert_eq!(settings.streaming.language, "English(US)");
        assert_eq!(settings.init_bank, INIT_BANK);
    }
}
