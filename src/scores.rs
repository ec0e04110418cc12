//! Ranked, capacity-bounded high-score table.

use serde::{Deserialize, Serialize};

/// Maximum number of entries a table retains.
pub const MAX_ENTRIES: usize = 10;

/// A single high-score entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final game score.
    pub score: u32,
    /// Unix timestamp (seconds) of when the game finished.
    pub timestamp: u64,
}

/// A ranked list of the best game scores, capped at [`MAX_ENTRIES`].
///
/// Entries are kept sorted descending by score. On exact score ties, newer
/// entries rank above older ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Entries in rank order, best first.
    entries: Vec<HighScoreEntry>,
}

impl ScoreTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a score and returns whether it became the new top entry.
    ///
    /// The new entry is ranked above any existing entry with the same score,
    /// and the table is truncated back to [`MAX_ENTRIES`].
    pub fn insert(&mut self, score: u32, timestamp: u64) -> bool {
        // Prepend, then stable-sort: the new entry keeps its position ahead
        // of equal scores.
        self.entries.insert(0, HighScoreEntry { score, timestamp });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);

        self.entries
            .first()
            .is_some_and(|top| top.score == score && top.timestamp == timestamp)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entries in rank order, best first.
    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Returns the best score, if any.
    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|entry| entry.score)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
