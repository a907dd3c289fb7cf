//! Best-score persistence
//!
//! Keeps the fewest attempts needed to win each difficulty. The record lives in
//! a small JSON document under a single named key:
//!
//! ```json
//! { "best_scores": { "easy": 4, "expert": 9 } }
//! ```
//!
//! Loading never fails: a missing or unreadable file is treated as "no record".
//! Saving is best-effort; failures are logged and the in-memory record stays
//! authoritative for the rest of the run.

use crate::core::Difficulty;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name used inside the platform data directory
pub const SCORES_FILE_NAME: &str = "best_scores.json";

/// Directory name created under the platform data directory
pub const APP_DIR_NAME: &str = "guess-the-number";

/// Errors from reading or writing the score file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed score file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    best_scores: BTreeMap<String, u32>,
}

/// Lowest attempt count per difficulty, optionally backed by a file
#[derive(Debug, Default)]
pub struct BestScoreStore {
    path: Option<PathBuf>,
    scores: BTreeMap<Difficulty, u32>,
}

impl BestScoreStore {
    /// Default location: `<data dir>/guess-the-number/best_scores.json`
    ///
    /// Returns `None` on platforms without a data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(SCORES_FILE_NAME))
    }

    /// Store that is never written to disk
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`, loading any existing record
    ///
    /// A missing, empty or corrupt file yields an empty record.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match read_scores(&path) {
            Ok(scores) => scores,
            Err(err) => {
                warn!("Ignoring best scores: {err}");
                BTreeMap::new()
            }
        };
        debug!("Loaded {} best score(s) from {}", scores.len(), path.display());

        Self {
            path: Some(path),
            scores,
        }
    }

    /// Backing file, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Best attempt count for `difficulty`
    #[must_use]
    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        self.scores.get(&difficulty).copied()
    }

    /// All recorded scores, in level order
    #[must_use]
    pub const fn scores(&self) -> &BTreeMap<Difficulty, u32> {
        &self.scores
    }

    /// Record `attempts` if it beats the stored value (or nothing is stored)
    ///
    /// Persists immediately when the record improves. Returns `true` if the
    /// record changed.
    pub fn record_if_better(&mut self, difficulty: Difficulty, attempts: u32) -> bool {
        if self.best(difficulty).is_some_and(|best| attempts >= best) {
            return false;
        }

        self.scores.insert(difficulty, attempts);
        info!("New best score for {difficulty}: {attempts}");

        if let Some(path) = &self.path
            && let Err(err) = write_scores(path, &self.scores)
        {
            warn!("Could not save best scores: {err}");
        }
        true
    }
}

fn read_scores(path: &Path) -> Result<BTreeMap<Difficulty, u32>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let file: ScoreFile = serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(file
        .best_scores
        .into_iter()
        .filter_map(|(id, attempts)| match id.parse::<Difficulty>() {
            Ok(level) if attempts > 0 => Some((level, attempts)),
            _ => {
                debug!("Dropping unknown score entry {id}={attempts}");
                None
            }
        })
        .collect())
}

/// Write the record atomically: temp file in the same directory, then rename
fn write_scores(path: &Path, scores: &BTreeMap<Difficulty, u32>) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = ScoreFile {
        best_scores: scores
            .iter()
            .map(|(level, &attempts)| (level.id().to_string(), attempts))
            .collect(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let base = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(SCORES_FILE_NAME);
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{base}.tmp-{}-{counter}", std::process::id()));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                tmp.write_all(json.as_bytes()).map_err(io_err)?;
                tmp.flush().map_err(io_err)?;
                sync_best_effort(&tmp, &candidate);
                break candidate;
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(err) => return Err(io_err(err)),
        }
    };

    if let Err(err) = fs::rename(&tmp_path, path) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            debug!("Could not remove {}: {cleanup}", tmp_path.display());
        }
        return Err(io_err(err));
    }
    match File::open(dir) {
        Ok(dir_file) => {
            sync_best_effort(&dir_file, dir);
        }
        Err(err) => debug!("Could not open {} for fsync: {err}", dir.display()),
    }

    debug!("Saved {} best score(s) to {}", scores.len(), path.display());
    Ok(())
}

/// fsync `file`, logging instead of failing; returns whether it succeeded
fn sync_best_effort(file: &File, path: &Path) -> bool {
    match file.sync_all() {
        Ok(()) => true,
        Err(err) => {
            debug!("fsync of {} failed: {err}", path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> BestScoreStore {
        BestScoreStore::open(dir.path().join(SCORES_FILE_NAME))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.scores().is_empty());
        assert_eq!(store.best(Difficulty::Easy), None);
    }

    #[test]
    fn first_record_is_always_kept() {
        let mut store = BestScoreStore::in_memory();
        assert!(store.record_if_better(Difficulty::Hard, 9));
        assert_eq!(store.best(Difficulty::Hard), Some(9));
    }

    #[test]
    fn only_strictly_lower_overwrites() {
        let mut store = BestScoreStore::in_memory();
        store.record_if_better(Difficulty::Easy, 5);

        assert!(!store.record_if_better(Difficulty::Easy, 7));
        assert_eq!(store.best(Difficulty::Easy), Some(5));

        assert!(!store.record_if_better(Difficulty::Easy, 5));
        assert_eq!(store.best(Difficulty::Easy), Some(5));

        assert!(store.record_if_better(Difficulty::Easy, 3));
        assert_eq!(store.best(Difficulty::Easy), Some(3));
    }

    #[test]
    fn levels_are_tracked_independently() {
        let mut store = BestScoreStore::in_memory();
        store.record_if_better(Difficulty::Easy, 4);
        store.record_if_better(Difficulty::Expert, 11);

        assert_eq!(store.best(Difficulty::Easy), Some(4));
        assert_eq!(store.best(Difficulty::Medium), None);
        assert_eq!(store.best(Difficulty::Expert), Some(11));
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = store_in(&dir);
            store.record_if_better(Difficulty::Medium, 6);
            store.record_if_better(Difficulty::Medium, 4);
        }

        let reopened = store_in(&dir);
        assert_eq!(reopened.best(Difficulty::Medium), Some(4));
        assert_eq!(reopened.scores().len(), 1);
    }

    #[test]
    fn file_uses_named_key_and_level_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.record_if_better(Difficulty::Expert, 12);

        let raw = fs::read_to_string(dir.path().join(SCORES_FILE_NAME)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["best_scores"]["expert"], 12);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join(SCORES_FILE_NAME);
        let mut store = BestScoreStore::open(&path);
        store.record_if_better(Difficulty::Easy, 2);
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SCORES_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let store = BestScoreStore::open(&path);
        assert!(store.scores().is_empty());
    }

    #[test]
    fn unknown_levels_and_zero_scores_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SCORES_FILE_NAME);
        fs::write(
            &path,
            r#"{ "best_scores": { "easy": 3, "legendary": 1, "hard": 0 } }"#,
        )
        .unwrap();

        let store = BestScoreStore::open(&path);
        assert_eq!(store.best(Difficulty::Easy), Some(3));
        assert_eq!(store.best(Difficulty::Hard), None);
        assert_eq!(store.scores().len(), 1);
    }

    #[test]
    fn unwritable_path_still_updates_memory() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join(SCORES_FILE_NAME);
        fs::create_dir(&path).unwrap();

        let mut store = BestScoreStore::open(&path);
        assert!(store.record_if_better(Difficulty::Easy, 8));
        assert_eq!(store.best(Difficulty::Easy), Some(8));

        // The failed save cleans up its temp file
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn sync_reports_success_on_regular_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("synced.json");
        let file = File::create(&path).unwrap();
        assert!(sync_best_effort(&file, &path));
        assert!(sync_best_effort(&File::open(dir.path()).unwrap(), dir.path()));
    }
}
