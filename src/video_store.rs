//! Persisted mapping from catalog keys to chosen videos.
//!
//! The map is a flat JSON object, pretty-printed:
//!
//! ```json
//! {
//!   "day1": "dQw4w9WgXcQ",
//!   "day2": null
//! }
//! ```
//!
//! A string value is final and is never searched for again. `null` (or the
//! empty string found in older files) marks a key that should be retried.

use crate::error::{KalimaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stored value for a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum VideoEntry {
    Resolved(String),
    Pending,
}

impl From<Option<String>> for VideoEntry {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) if !id.trim().is_empty() => VideoEntry::Resolved(id),
            _ => VideoEntry::Pending,
        }
    }
}

impl From<VideoEntry> for Option<String> {
    fn from(entry: VideoEntry) -> Self {
        match entry {
            VideoEntry::Resolved(id) => Some(id),
            VideoEntry::Pending => None,
        }
    }
}

/// State of a key in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A video was chosen; never recomputed.
    Resolved(&'a str),
    /// Present but unresolved; retried on the next run.
    Pending,
    /// Never seen.
    Absent,
}

impl Resolution<'_> {
    pub fn needs_search(&self) -> bool {
        !matches!(self, Resolution::Resolved(_))
    }
}

/// In-memory view of a video map file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoMap {
    entries: BTreeMap<String, VideoEntry>,
}

impl VideoMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(&self, key: &str) -> Resolution<'_> {
        match self.entries.get(key) {
            Some(VideoEntry::Resolved(id)) => Resolution::Resolved(id.as_str()),
            Some(VideoEntry::Pending) => Resolution::Pending,
            None => Resolution::Absent,
        }
    }

    /// Record a video for a key.
    ///
    /// Returns false, leaving the map untouched, if the key already has one.
    pub fn resolve(&mut self, key: &str, video_id: &str) -> bool {
        if let Resolution::Resolved(_) = self.resolution(key) {
            return false;
        }
        if video_id.trim().is_empty() {
            return false;
        }
        self.entries
            .insert(key.to_string(), VideoEntry::Resolved(video_id.to_string()));
        true
    }

    /// Clear a key so the next run searches for it again.
    pub fn mark_pending(&mut self, key: &str) -> Option<VideoEntry> {
        self.entries.insert(key.to_string(), VideoEntry::Pending)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VideoEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys holding a chosen video.
    pub fn resolved_count(&self) -> usize {
        self.entries
            .values()
            .filter(|v| matches!(v, VideoEntry::Resolved(_)))
            .count()
    }
}

/// File-backed storage for a [`VideoMap`].
#[derive(Debug, Clone)]
pub struct VideoStore {
    path: PathBuf,
}

impl VideoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the map, starting empty if the file does not exist.
    pub fn load(&self) -> Result<VideoMap> {
        if !self.path.exists() {
            debug!("{} does not exist, starting empty", self.path.display());
            return Ok(VideoMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(VideoMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            KalimaError::Persistence(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Replace the file with the full map.
    ///
    /// Writes to a temporary file in the same directory and renames it over
    /// the target, so readers see either the old or the new map.
    pub fn save(&self, map: &VideoMap) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut json = serde_json::to_string_pretty(map)?;
        json.push('\n');

        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.path)?;

        debug!("Saved {} entries to {}", map.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path().join("videos.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_three_states() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, r#"{"day1": "abc", "day2": "", "day3": null}"#).unwrap();

        let map = VideoStore::new(&path).load().unwrap();
        assert_eq!(map.resolution("day1"), Resolution::Resolved("abc"));
        assert_eq!(map.resolution("day2"), Resolution::Pending);
        assert_eq!(map.resolution("day3"), Resolution::Pending);
        assert_eq!(map.resolution("day4"), Resolution::Absent);
        assert!(map.resolution("day2").needs_search());
        assert!(!map.resolution("day1").needs_search());
        assert_eq!(map.resolved_count(), 1);
    }

    #[test]
    fn test_resolved_entries_are_final() {
        let mut map = VideoMap::new();
        assert!(map.resolve("day1", "first"));
        assert!(!map.resolve("day1", "second"));
        assert_eq!(map.resolution("day1"), Resolution::Resolved("first"));

        map.mark_pending("day1");
        assert!(map.resolve("day1", "second"));
        assert_eq!(map.resolution("day1"), Resolution::Resolved("second"));
    }

    #[test]
    fn test_resolve_ignores_empty_id() {
        let mut map = VideoMap::new();
        assert!(!map.resolve("day1", ""));
        assert_eq!(map.resolution("day1"), Resolution::Absent);
    }

    #[test]
    fn test_save_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path().join("out").join("videos.json"));

        let mut map = VideoMap::new();
        map.resolve("day1", "abc");
        map.mark_pending("day2");
        store.save(&map).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{\n  \"day1\": \"abc\",\n  \"day2\": null\n}\n");
        assert_eq!(store.load().unwrap(), map);
    }

    #[test]
    fn test_load_save_cycle_keeps_resolved_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = VideoStore::new(dir.path().join("videos.json"));

        let mut map = store.load().unwrap();
        map.resolve("day1", "abc");
        store.save(&map).unwrap();

        let mut map = store.load().unwrap();
        map.resolve("day1", "zzz");
        map.resolve("day2", "def");
        store.save(&map).unwrap();

        let map = store.load().unwrap();
        assert_eq!(map.resolution("day1"), Resolution::Resolved("abc"));
        assert_eq!(map.resolution("day2"), Resolution::Resolved("def"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            VideoStore::new(&path).load(),
            Err(KalimaError::Persistence(_))
        ));
    }

    #[test]
    fn test_save_into_missing_parent_that_is_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = VideoStore::new(blocker.join("videos.json"));
        assert!(store.save(&VideoMap::new()).is_err());
    }
}
