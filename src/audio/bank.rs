//! Bank manifests.
//!
//! A bank is a JSON file listing the events it defines. Each event points at an audio
//! file relative to the bank's own directory:
//!
//! ```json
//! { "events": { "MusicTest": { "file": "music/theme.ogg", "looping": true, "bus": "music" } } }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::AudioError;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BankManifest {
    #[serde(default)]
    pub events: HashMap<String, EventDefinition>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventDefinition {
    pub file: PathBuf,
    #[serde(default)]
    pub looping: bool,
    #[serde(default)]
    pub bus: Bus,
    #[serde(default)]
    pub volume_db: f32,
}

/// Output track an event plays on.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Bus {
    #[default]
    Master,
    Music,
}

impl BankManifest {
    pub fn parse(name: &str, text: &str) -> Result<Self, AudioError> {
        serde_json::from_str(text).map_err(|source| AudioError::BankParse {
            name: name.to_string(),
            source,
        })
    }
}

/// Candidate locations for a bank, localized folder first.
pub fn bank_search_paths(base: &Path, language: Option<&str>, name: &str) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(language) = language.filter(|l| !l.is_empty()) {
        paths.push(base.join(language).join(name));
    }
    paths.push(base.join(name));
    paths
}

/// Reads the first existing candidate and returns it with the directory it came from.
pub fn read_bank(
    base: &Path,
    language: Option<&str>,
    name: &str,
) -> Result<(BankManifest, PathBuf), AudioError> {
    let searched = bank_search_paths(base, language, name);
    let Some(path) = searched.iter().find(|p| p.is_file()) else {
        return Err(AudioError::BankNotFound {
            name: name.to_string(),
            searched,
        });
    };

    let text = std::fs::read_to_string(path)?;
    let manifest = BankManifest::parse(name, &text)?;
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((manifest, dir))
}
