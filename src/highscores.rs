//! High score tracking
//!
//! The best score is kept in a small key/value preferences store. The store
//! is a collaborator: an in-memory one for tests and embedding, and a JSON
//! file one for the native runner.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// Preferences key holding the best score
pub const HIGH_SCORE_KEY: &str = "highScore";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value store for small integer preferences
pub trait Preferences {
    fn get_integer(&self, key: &str, default: i64) -> i64;

    fn put_integer(&mut self, key: &str, value: i64);

    /// Make pending writes durable
    fn flush(&mut self) -> Result<(), PrefsError>;
}

/// Volatile preferences
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, i64>,
    flushes: usize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `flush` was called
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl Preferences for MemoryPreferences {
    fn get_integer(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_integer(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        self.flushes += 1;
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonFilePreferences {
    /// Open the store at `path`; a missing or unreadable file starts fresh
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => {
                    log::info!("Loaded preferences from {}", path.display());
                    values
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt preferences {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(_) => {
                log::info!("No preferences at {}, starting fresh", path.display());
                BTreeMap::new()
            }
        };
        Self { path, values }
    }
}

impl Preferences for JsonFilePreferences {
    fn get_integer(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_integer(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        log::debug!("Preferences saved to {}", self.path.display());
        Ok(())
    }
}

/// Best score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn load(prefs: &dyn Preferences) -> Self {
        let stored = prefs.get_integer(HIGH_SCORE_KEY, 0);
        Self {
            best: u32::try_from(stored).unwrap_or(0),
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a finished run; returns true if it set a new best
    pub fn submit(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Write the best score and flush the store
    pub fn save(&self, prefs: &mut dyn Preferences) -> Result<(), PrefsError> {
        prefs.put_integer(HIGH_SCORE_KEY, i64::from(self.best));
        prefs.flush()
    }
}
