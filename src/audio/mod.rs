//! Audio engine lifecycle.
//!
//! [`AudioEngine`] wraps a stateful [`SoundBackend`] behind a handful of operations:
//! initialize, terminate, a per-frame [`render_audio`](AudioEngine::render_audio), bank
//! loading, game object registration and event posting. [`KiraBackend`] is the backend
//! the application ships with.
//!
//! # Module Structure
//!
//! - [`engine`]: the lifecycle wrapper and facade
//! - [`backend`]: the trait a mixing library is adapted to
//! - [`kira_backend`]: kira implementation of [`SoundBackend`]
//! - [`bank`]: on-disk bank manifests
//! - [`settings`]: per-subsystem init settings
//! - [`object_id`]: game object, playing and bank ids
//! - [`error`]: [`AudioError`]

pub mod backend;
pub mod bank;
pub mod engine;
pub mod error;
pub mod kira_backend;
pub mod object_id;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::SoundBackend;
pub use engine::AudioEngine;
pub use error::AudioError;
pub use kira_backend::KiraBackend;
pub use object_id::{BankId, GameObjectId, PlayingId};
pub use settings::AudioSettings;
