//! Recency-weighted ordering of selection candidates.
//!
//! A history is a most-recent-first list of identifiers the user picked
//! before. [`rank`] surfaces candidates found in the history ahead of the
//! rest, and [`record_selection`] moves a fresh pick to the front.
//! [`HistoryStore`] persists one history per namespace, one entry per line.

use crate::error::Result;
use crate::{io, paths};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Reorder `candidates` so entries present in `history` come first, in
/// history order, followed by every other candidate in its original order.
///
/// History entries missing from `candidates` are ignored. The result is
/// always a permutation of `candidates`; a candidate repeated in the input
/// is repeated in the output.
pub fn rank(history: &[String], candidates: &[String]) -> Vec<String> {
    let known: HashSet<&str> = history.iter().map(String::as_str).collect();

    let mut matching: HashMap<&str, usize> = HashMap::new();
    let mut other = Vec::new();
    for candidate in candidates {
        if known.contains(candidate.as_str()) {
            *matching.entry(candidate.as_str()).or_default() += 1;
        } else {
            other.push(candidate.clone());
        }
    }

    let mut ranked = Vec::with_capacity(candidates.len());
    for entry in history {
        // remove() makes a duplicated history entry emit only once
        if let Some(count) = matching.remove(entry.as_str()) {
            ranked.extend(std::iter::repeat(entry.clone()).take(count));
        }
    }
    ranked.extend(other);
    ranked
}

/// Move `chosen` to the front of `history`, dropping any earlier occurrence.
pub fn record_selection(mut history: Vec<String>, chosen: &str) -> Vec<String> {
    history.retain(|h| h != chosen);
    history.insert(0, chosen.to_string());
    history
}

// ---------------------------------------------------------------------------
// HistoryStore
// ---------------------------------------------------------------------------

/// Namespaced history records stored as `<dir>/.vs_history-<namespace>`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
    limit: Option<usize>,
}

impl HistoryStore {
    /// `limit` caps the number of entries written back; `None` keeps all.
    pub fn new(dir: impl Into<PathBuf>, limit: Option<usize>) -> Self {
        Self {
            dir: dir.into(),
            limit,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, namespace: &str) -> Result<PathBuf> {
        paths::validate_namespace(namespace)?;
        Ok(paths::history_file(&self.dir, namespace))
    }

    /// Load a history, skipping blank and repeated lines. Missing records
    /// load as empty.
    pub fn load(&self, namespace: &str) -> Result<Vec<String>> {
        let path = self.path(namespace)?;
        let mut seen = HashSet::new();
        let entries: Vec<String> = io::read_lines(&path)?
            .into_iter()
            .filter(|line| seen.insert(line.clone()))
            .collect();
        tracing::debug!(namespace, entries = entries.len(), "loaded history");
        Ok(entries)
    }

    pub fn save(&self, namespace: &str, entries: &[String]) -> Result<()> {
        let path = self.path(namespace)?;
        let keep = self.limit.unwrap_or(entries.len()).min(entries.len());
        let mut data = String::new();
        for entry in &entries[..keep] {
            data.push_str(entry);
            data.push('\n');
        }
        io::atomic_write(&path, data.as_bytes())?;
        tracing::debug!(namespace, entries = keep, path = %path.display(), "saved history");
        Ok(())
    }

    /// Load, move `chosen` to the front and persist. Returns the new history.
    pub fn record(&self, namespace: &str, chosen: &str) -> Result<Vec<String>> {
        let history = record_selection(self.load(namespace)?, chosen);
        self.save(namespace, &history)?;
        Ok(history)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
