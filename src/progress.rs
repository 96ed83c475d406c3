//! Per-exercise progress tracking
//!
//! A flat mapping of exercise id to completion percentage, persisted as one
//! JSON blob under a fixed key. Updates are monotonic: a report only takes
//! effect when it beats the stored value. Storage failures are logged and
//! swallowed; they must never interrupt play.

use std::collections::BTreeMap;
use std::collections::HashMap;

/// Storage key for the progress blob
pub const STORAGE_KEY: &str = "trainer_progress";

/// Durable string key/value storage supplied by the embedding platform
/// (LocalStorage on web, a preferences file elsewhere).
pub trait Storage {
    /// The stored string for `key`, or `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`. Returns false if the write was lost.
    fn write(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory backend: the default for tests and native runs without a
/// platform store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        let _ = self.entries.insert(key.to_string(), value.to_string());
        true
    }
}

/// Progress blob shape on disk
type ProgressMap = BTreeMap<String, u8>;

/// Monotonic per-exercise progress percentages
#[derive(Debug, Clone)]
pub struct ProgressStore<S: Storage> {
    values: ProgressMap,
    storage: S,
}

impl<S: Storage + Default> Default for ProgressStore<S> {
    fn default() -> Self {
        Self::load(S::default())
    }
}

impl<S: Storage> ProgressStore<S> {
    /// Load stored progress, degrading to an empty mapping on missing or
    /// corrupt data.
    pub fn load(storage: S) -> Self {
        let values = match storage.read(STORAGE_KEY) {
            Some(json) => match serde_json::from_str::<ProgressMap>(&json) {
                Ok(values) => {
                    log::info!("loaded progress for {} exercises", values.len());
                    values.into_iter().map(|(k, v)| (k, v.min(100))).collect()
                }
                Err(err) => {
                    log::warn!("discarding corrupt progress blob: {err}");
                    ProgressMap::new()
                }
            },
            None => ProgressMap::new(),
        };
        Self { values, storage }
    }

    /// Stored percentage for one exercise (0 when never played).
    pub fn get(&self, exercise_id: &str) -> u8 {
        self.values.get(exercise_id).copied().unwrap_or(0)
    }

    /// The whole mapping, for the progress screen.
    pub fn snapshot(&self) -> &BTreeMap<String, u8> {
        &self.values
    }

    /// Record a new percentage. Values are clamped to 100 and only an
    /// improvement is kept and persisted. Returns whether anything changed.
    pub fn update(&mut self, exercise_id: &str, percentage: u8) -> bool {
        let percentage = percentage.min(100);
        if percentage <= self.get(exercise_id) {
            return false;
        }
        self.values.insert(exercise_id.to_string(), percentage);
        self.save();
        true
    }

    fn save(&mut self) {
        match serde_json::to_string(&self.values) {
            Ok(json) => {
                if !self.storage.write(STORAGE_KEY, &json) {
                    log::warn!("progress save was lost");
                }
            }
            Err(err) => log::warn!("failed to serialize progress: {err}"),
        }
    }
}
