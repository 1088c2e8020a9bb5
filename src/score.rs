//! High-score persistence.
//!
//! A single record, one line on disk: `name;score`. Absent or malformed data
//! is not an error; the game simply starts with no prior record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The single persisted (scorer, score) pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighScoreRecord {
    /// `None` until anyone has set a score.
    pub name: Option<String>,
    pub score: u32,
}

impl HighScoreRecord {
    /// Name shown on the HUD; "None" before the first record exists.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("None")
    }
}

/// Reads and writes the high-score file.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    /// Store in the user's home directory (falls back to the working
    /// directory when `HOME` is unset).
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".invaders_score")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record. A missing file, malformed content or a
    /// parse failure all yield the default record.
    pub fn load(&self) -> HighScoreRecord {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    log::warn!(
                        "could not read high-score file {}: {}",
                        self.path.display(),
                        err
                    );
                }
                return HighScoreRecord::default();
            }
        };
        match parse_record(&text) {
            Some(record) => record,
            None => {
                log::warn!("malformed high-score file {}", self.path.display());
                HighScoreRecord::default()
            }
        }
    }

    /// Overwrite the persisted record. A write failure is logged and
    /// otherwise ignored; the in-memory record stays authoritative for the
    /// rest of the session.
    pub fn save(&self, record: &HighScoreRecord) {
        let line = format!("{};{}", record.display_name(), record.score);
        if let Err(err) = std::fs::write(&self.path, line) {
            log::error!(
                "failed to save high score to {}: {}",
                self.path.display(),
                err
            );
        }
    }
}

fn parse_record(text: &str) -> Option<HighScoreRecord> {
    let line = text.lines().next()?.trim();
    let (name, score) = line.split_once(';')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let score = score.trim().parse().ok()?;
    Some(HighScoreRecord {
        name: Some(name.to_string()),
        score,
    })
}
