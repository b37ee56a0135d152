//! Persistence layer: snapshot storage and offline progress.
//!
//! A save is one JSON-serialized [`GameState`] stored under [`SAVE_KEY`] in a
//! [`SaveStore`]. Anything unreadable is treated as "no save" so the host can
//! start a fresh game.

use chrono::{DateTime, Utc};
use sim_core::{normalize_generators, validate_state, GameState, SAVE_VERSION};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Key under which the current game is stored.
pub const SAVE_KEY: &str = "zombie-zoo.save.v1";
/// Longest stretch of offline time credited on resume (8 hours).
pub const MAX_OFFLINE_SECS: u64 = 8 * 3600;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Minimal string key-value storage.
pub trait SaveStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SaveStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let ok = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !key.starts_with('.');
        if !ok {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SaveStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a truncated save behind.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Directory used for local saves when none is configured.
pub fn default_save_dir() -> PathBuf {
    PathBuf::from("./saves")
}

/// Store a copy of `state` stamped with `now` as its save time.
pub fn save<S: SaveStore + ?Sized>(
    store: &mut S,
    state: &GameState,
    now: DateTime<Utc>,
) -> Result<(), PersistenceError> {
    let mut snapshot = state.clone();
    snapshot.last_saved_at = now;
    snapshot.version = SAVE_VERSION;
    let text = serde_json::to_string(&snapshot)?;
    store.set(SAVE_KEY, &text)?;
    debug!(bytes = text.len(), "game saved");
    Ok(())
}

/// Restore the stored game, or `None` when there is no usable save.
pub fn load<S: SaveStore + ?Sized>(store: &S) -> Option<GameState> {
    let text = match store.get(SAVE_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "could not read save");
            return None;
        }
    };
    let mut state: GameState = match serde_json::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "discarding unreadable save");
            return None;
        }
    };
    if state.version > SAVE_VERSION {
        warn!(version = state.version, "discarding save from a newer version");
        return None;
    }
    normalize_generators(&mut state);
    if let Err(e) = validate_state(&state) {
        warn!(error = %e, "discarding invalid save");
        return None;
    }
    Some(state)
}

/// Delete the stored game.
pub fn wipe<S: SaveStore + ?Sized>(store: &mut S) -> Result<(), PersistenceError> {
    store.remove(SAVE_KEY)
}

/// Whole seconds between `last_saved_at` and `now`, clamped to `[0, cap]`.
pub fn offline_seconds_capped(last_saved_at: DateTime<Utc>, now: DateTime<Utc>, cap: u64) -> u64 {
    let elapsed = (now - last_saved_at).num_seconds();
    u64::try_from(elapsed).unwrap_or(0).min(cap)
}

/// Whole seconds of offline progress, clamped to `[0, MAX_OFFLINE_SECS]`.
pub fn compute_offline_seconds(last_saved_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    offline_seconds_capped(last_saved_at, now, MAX_OFFLINE_SECS)
}
