//! Corpus store: owns the entries and their write-through persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RecallChatError, Result};
use crate::models::CorpusEntry;

use super::table;

/// In-memory corpus backed by a tabular file on disk.
///
/// The store is append-only. Every append is written through to disk before
/// it is considered committed, so a taught entry survives a crash that
/// happens right after the teaching call returns.
#[derive(Debug)]
pub struct CorpusStore {
    path: PathBuf,
    entries: Vec<CorpusEntry>,
}

impl CorpusStore {
    /// Load the corpus from disk.
    ///
    /// A missing, unreadable, or malformed file is a startup failure, as is
    /// a corpus with no data rows (the fallback entry would be undefined).
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        let content = fs::read_to_string(&path).map_err(|e| {
            RecallChatError::corpus_load(format!("cannot read {}: {}", path.display(), e))
        })?;

        let entries = table::parse_table(&content)?;
        if entries.is_empty() {
            return Err(RecallChatError::corpus_load(format!(
                "{} contains no entries",
                path.display()
            )));
        }

        Ok(Self { path, entries })
    }

    /// Create a store from already-built entries, persisted at `path` on the
    /// first append. Rejects an empty entry list for the same reason `load`
    /// does.
    pub fn with_entries<P: Into<PathBuf>>(path: P, entries: Vec<CorpusEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(RecallChatError::corpus_load(
                "corpus must contain at least one entry",
            ));
        }

        Ok(Self {
            path: path.into(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored queries in positional order, for batch encoding.
    pub fn queries(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.query.as_str()).collect()
    }

    /// Append one entry and persist the whole table write-through.
    ///
    /// Returns the new entry's index. On persist failure the in-memory
    /// append is rolled back before the error is returned, so the store
    /// never holds an entry the disk does not.
    pub fn append(&mut self, entry: CorpusEntry) -> Result<usize> {
        self.entries.push(entry);

        if let Err(e) = self.persist() {
            self.entries.pop();
            return Err(e);
        }

        Ok(self.entries.len() - 1)
    }

    /// The entry whose compound sentiment is closest to neutral, first in
    /// stored order among ties. `None` only for an empty store, which the
    /// constructors reject.
    pub fn safest_entry(&self) -> Option<&CorpusEntry> {
        let mut best: Option<&CorpusEntry> = None;

        for entry in &self.entries {
            match best {
                Some(current)
                    if entry.sentiment.neutral_distance()
                        < current.sentiment.neutral_distance() =>
                {
                    best = Some(entry);
                }
                None => best = Some(entry),
                _ => {}
            }
        }

        best
    }

    /// Write the current entries to disk via a temp file and rename, so a
    /// crash mid-write cannot corrupt the previous on-disk corpus.
    fn persist(&self) -> Result<()> {
        let content = table::format_table(&self.entries);

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, &content).map_err(|e| {
            RecallChatError::corpus_persist(format!(
                "cannot write {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            RecallChatError::corpus_persist(format!(
                "cannot replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
