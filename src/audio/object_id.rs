//! Identifiers handed out by the audio engine.
//!
//! [`GameObjectId`]s name logical emitters and listeners. They come from a single
//! process-wide counter, so an id is never handed out twice while the process lives.
//! [`PlayingId`] and [`BankId`] are tokens returned by the backend.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

/// Starts at 1 so that a minted id can never be confused with a zero sentinel.
static NEXT_GAME_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier of an emitter or listener known to the audio backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameObjectId(u64);

impl GameObjectId {
    /// Wraps an explicit id chosen by the caller.
    ///
    /// Explicit ids are not checked against the minting counter.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Converts a raw id that may use a non-positive value to mean "no target".
    ///
    /// Returns `None` for zero and negative values, which callers then route to the
    /// default object.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw <= 0 { None } else { Some(Self(raw as u64)) }
    }

    /// Mints the next unused id from the process-wide counter.
    pub fn next() -> Self {
        Self(NEXT_GAME_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw value passed to the backend.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Token for one playing event instance. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayingId(NonZeroU32);

impl PlayingId {
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Identifier of a loaded bank, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BankId(pub u32);

impl BankId {
    /// Hashes a bank name case-insensitively with 32-bit FNV-1a.
    pub fn from_name(name: &str) -> Self {
        Self(fnv1a_32(name))
    }
}

pub(crate) fn fnv1a_32(name: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    name.bytes()
        .map(|b| b.to_ascii_lowercase())
        .fold(OFFSET_BASIS, |hash, b| (hash ^ b as u32).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn minted_ids_are_never_repeated() {
        let ids: HashSet<_> = (0..10_000).map(|_| GameObjectId::next()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn minted_ids_are_positive_and_increasing() {
        let first = GameObjectId::next();
        let second = GameObjectId::next();
        assert!(first.get() > 0);
        assert!(second > first);
    }

    #[test]
    fn minting_from_many_threads_stays_unique() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..1000).map(|_| GameObjectId::next()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
    }

    #[test]
    fn non_positive_raw_ids_mean_no_target() {
        assert_eq!(GameObjectId::from_raw(0), None);
        assert_eq!(GameObjectId::from_raw(-7), None);
        assert_eq!(GameObjectId::from_raw(5), Some(GameObjectId::new(5)));
    }

    #[test]
    fn playing_id_rejects_zero() {
        assert!(PlayingId::new(0).is_none());
        assert_eq!(PlayingId::new(3).map(PlayingId::get), Some(3));
    }

    #[test]
    fn bank_id_ignores_case() {
        assert_eq!(BankId::from_name("Init.bnk"), BankId::from_name("INIT.BNK"));
        assert_ne!(BankId::from_name("Init.bnk"), BankId::from_name("Music.bnk"));
        // Known FNV-1a 32-bit vector for the empty input.
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
    }
}
