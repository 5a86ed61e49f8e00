//! The on-disk replay index
//!
//! `ReplayIndex` keeps records in insertion order and persists them as a
//! record-collection document. Deduplication is the caller's job via
//! `exists`; `add` only guards the one hard invariant, that an indexed
//! record always carries an `id`.

use crate::index::{IndexError, IndexResult, Record};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of an [`ReplayIndex::add`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AddOutcome {
    /// The record was appended to the index
    Inserted,
    /// The record lacks an `id` field and was discarded
    Rejected,
}

impl AddOutcome {
    /// True if the record was appended
    pub fn is_inserted(self) -> bool {
        matches!(self, AddOutcome::Inserted)
    }
}

/// Ordered, file-backed collection of replay records
#[derive(Debug, Default)]
pub struct ReplayIndex {
    path: Option<PathBuf>,
    replays: Vec<Record>,
}

impl ReplayIndex {
    /// Opens an index attached to `path`
    ///
    /// The document is loaded if the file exists; a missing file is not an
    /// error, the index simply starts empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gosu_replays::index::ReplayIndex;
    ///
    /// let index = ReplayIndex::new("replays.json").unwrap();
    /// println!("{} replays indexed", index.len());
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> IndexResult<Self> {
        let path = path.into();
        let replays = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            replays,
        })
    }

    /// Creates an empty index with no attached file
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Appends a record, rejecting any candidate without an `id` field
    ///
    /// The `id` is kept in its string form; comparison elsewhere is always
    /// string equality. Duplicate suppression is not enforced here - callers
    /// check [`exists`](Self::exists) first.
    pub fn add(&mut self, replay: Record) -> AddOutcome {
        if replay.id().is_none() {
            tracing::debug!("rejecting record without an id field");
            return AddOutcome::Rejected;
        }

        self.replays.push(replay);
        AddOutcome::Inserted
    }

    /// True if any stored record has this `id`
    pub fn exists(&self, id: &str) -> bool {
        self.replays
            .iter()
            .any(|replay| replay.id() == Some(id))
    }

    /// Removes every record with this `id`
    pub fn remove(&mut self, id: &str) {
        self.replays.retain(|replay| replay.id() != Some(id));
    }

    /// Writes the full document to the attached path
    pub fn save(&self) -> IndexResult<()> {
        match &self.path {
            Some(path) => self.write_document(path),
            None => Err(IndexError::NoPath),
        }
    }

    /// Writes the full document to an explicit destination
    pub fn save_to(&self, path: impl AsRef<Path>) -> IndexResult<()> {
        self.write_document(path.as_ref())
    }

    fn write_document(&self, path: &Path) -> IndexResult<()> {
        let document = serde_json::to_string_pretty(&self.replays)?;
        fs::write(path, document)?;
        tracing::debug!("saved {} replays to {}", self.replays.len(), path.display());
        Ok(())
    }

    /// Iterates over stored records in insertion order
    ///
    /// The iterator is restartable: each call starts from the beginning.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.replays.iter()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.replays.len()
    }

    /// True if no records are stored
    pub fn is_empty(&self) -> bool {
        self.replays.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReplayIndex {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.replays.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn replay(id: &str, sentinel: &str) -> Record {
        Record::from_iter([("id", id), ("sentinel", sentinel)])
    }

    #[test]
    fn test_add_then_exists() {
        let mut index = ReplayIndex::in_memory();

        assert!(index.add(replay("100", "EHOME")).is_inserted());
        assert!(index.exists("100"));
        assert!(!index.exists("101"));
    }

    #[test]
    fn test_add_without_id_is_rejected() {
        let mut index = ReplayIndex::in_memory();
        let record = Record::from_iter([("sentinel", "LGD")]);

        assert_eq!(index.add(record), AddOutcome::Rejected);
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove_eliminates_all_matches() {
        let mut index = ReplayIndex::in_memory();
        // add enforces nothing about duplicates, so two records can share an id
        let _ = index.add(replay("7", "EHOME"));
        let _ = index.add(replay("7", "LGD"));
        let _ = index.add(replay("8", "Nirvana.cn"));

        index.remove("7");

        assert!(!index.exists("7"));
        assert!(index.exists("8"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let index = ReplayIndex::new(dir.path().join("absent.json")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");

        let mut index = ReplayIndex::new(&path).unwrap();
        let _ = index.add(Record::from_iter([
            ("id", "1"),
            ("sentinel", "EHOME"),
            ("scourge", "LGD"),
            ("date", "2010-07-02"),
        ]));
        let _ = index.add(Record::from_iter([("id", "2"), ("event", "ESWC 2010")]));
        index.save().unwrap();

        let reloaded = ReplayIndex::new(&path).unwrap();
        assert_eq!(reloaded.len(), 2);

        let records: Vec<&Record> = reloaded.iter().collect();
        assert_eq!(records[0].id(), Some("1"));
        assert_eq!(records[0].get("scourge"), Some("LGD"));
        assert_eq!(records[1].get("event"), Some("ESWC 2010"));

        // field order survives the round trip
        let names: Vec<&str> = records[0].fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "sentinel", "scourge", "date"]);
    }

    #[test]
    fn test_save_without_path_fails() {
        let index = ReplayIndex::in_memory();
        assert!(matches!(index.save(), Err(IndexError::NoPath)));
    }

    #[test]
    fn test_save_to_explicit_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elsewhere.json");

        let mut index = ReplayIndex::in_memory();
        let _ = index.add(replay("9", "MYM"));
        index.save_to(&path).unwrap();

        let reloaded = ReplayIndex::new(&path).unwrap();
        assert!(reloaded.exists("9"));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ReplayIndex::new(&path),
            Err(IndexError::Document(_))
        ));
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut index = ReplayIndex::in_memory();
        let _ = index.add(replay("1", "EHOME"));
        let _ = index.add(replay("2", "LGD"));

        let first: Vec<&str> = index.iter().filter_map(Record::id).collect();
        let second: Vec<&str> = index.iter().filter_map(Record::id).collect();
        assert_eq!(first, vec!["1", "2"]);
        assert_eq!(first, second);

        // derived sequence operations come from the same primitive
        let found = index.iter().find(|r| r.get("sentinel") == Some("LGD"));
        assert_eq!(found.and_then(Record::id), Some("2"));
    }
}
