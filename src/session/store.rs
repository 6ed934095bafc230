//! High score persistence
//!
//! The session tracker only sees the [`HighScoreStore`] port. The file-backed
//! store keeps a small JSON key-value document so other entries written next
//! to the high score survive a save.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::warn;

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Read and write the single persisted high score
pub trait HighScoreStore {
    /// Stored high score; missing or unreadable data counts as 0
    fn load(&self) -> u32;

    fn save(&mut self, score: u32) -> Result<()>;
}

/// Parse a stored decimal string, `None` when malformed
pub fn parse_high_score(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// JSON document on disk: `{ "snakeHighScore": "120" }`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let document: Map<String, Value> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score file {:?}", self.path))?;

        Ok(Some(document))
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        let document = match self.read_document() {
            Ok(Some(document)) => document,
            Ok(None) => return 0,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "ignoring unreadable high score file");
                return 0;
            }
        };

        let parsed = match document.get(HIGH_SCORE_KEY) {
            None => return 0,
            Some(Value::String(raw)) => parse_high_score(raw),
            Some(Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(_) => None,
        };

        parsed.unwrap_or_else(|| {
            warn!(path = ?self.path, "malformed high score entry, treating as 0");
            0
        })
    }

    fn save(&mut self, score: u32) -> Result<()> {
        // Keep unrelated entries; start over if the old document is unreadable
        let mut document = self.read_document().ok().flatten().unwrap_or_default();
        document.insert(HIGH_SCORE_KEY.to_string(), Value::String(score.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&Value::Object(document))
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// In-process store, nothing survives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            score: Some(score),
            writes: 0,
        }
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.score = Some(score);
        self.writes += 1;
        Ok(())
    }
}
