//! High score leaderboard and player name
//!
//! Persisted through a `KeyValueStore`, tracks top 10 scores. Storage
//! problems never reach the game: a failed read is an empty leaderboard,
//! a failed write is logged and forgotten.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest accepted player name, in characters
pub const MAX_NAME_CHARS: usize = 20;

/// Name recorded when the player never entered one
pub const ANONYMOUS_NAME: &str = "---";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make it onto the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score, keeping the list sorted and at most `MAX_HIGH_SCORES`
    /// long. Ties go after existing equal scores.
    /// Returns the rank achieved (1-indexed), or None if it fell off the end.
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best entry (if any)
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.best().map(|e| e.score)
    }

    /// Repair a list read from storage: order, length
    fn normalized(mut self) -> Self {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
        self
    }
}

/// Trim, reject empty, cap at `MAX_NAME_CHARS`
pub fn sanitize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_CHARS).collect::<String>().trim_end().to_string())
}

/// Player name and leaderboard on top of a key-value store
#[derive(Debug)]
pub struct HighscoreStore<S> {
    store: S,
}

impl<S: KeyValueStore> HighscoreStore<S> {
    const NAME_KEY: &'static str = "rocket_spin_player_name";
    const SCORES_KEY: &'static str = "rocket_spin_highscores";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Stored player name, if any
    pub fn player_name(&self) -> Option<String> {
        match self.store.get(Self::NAME_KEY) {
            Ok(name) => name.and_then(|n| sanitize_name(&n)),
            Err(err) => {
                log::warn!("Could not read player name: {err}");
                None
            }
        }
    }

    /// Store the player name. Returns the name as stored, or None if it was
    /// blank.
    pub fn set_player_name(&mut self, name: &str) -> Option<String> {
        let name = sanitize_name(name)?;
        if let Err(err) = self.store.set(Self::NAME_KEY, &name) {
            log::warn!("Could not save player name: {err}");
        }
        Some(name)
    }

    /// Current leaderboard; empty when storage is missing or corrupt
    pub fn highscores(&self) -> HighScores {
        let json = match self.store.get(Self::SCORES_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return HighScores::new(),
            Err(err) => {
                log::warn!("Could not read high scores: {err}");
                return HighScores::new();
            }
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(scores) => {
                log::debug!("Loaded {} high scores", scores.entries.len());
                scores.normalized()
            }
            Err(err) => {
                log::warn!("Stored high scores unreadable ({err}), starting fresh");
                HighScores::new()
            }
        }
    }

    /// Record a finished run and return the updated leaderboard.
    ///
    /// The score is rounded to the nearest integer; a missing or blank name
    /// is recorded as `ANONYMOUS_NAME`.
    pub fn add_highscore(&mut self, name: Option<&str>, score: f64) -> HighScores {
        let name = name
            .and_then(sanitize_name)
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
        let score = if score.is_finite() && score > 0.0 { score.round() as u64 } else { 0 };

        let mut scores = self.highscores();
        let rank = scores.add_score(&name, score);
        log::info!("High score {} for {}: rank {:?}", score, name, rank);

        match serde_json::to_string(&scores) {
            Ok(json) => {
                if let Err(err) = self.store.set(Self::SCORES_KEY, &json) {
                    log::warn!("Could not save high scores: {err}");
                }
            }
            Err(err) => log::warn!("Could not encode high scores: {err}"),
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};
    use proptest::prelude::*;

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("test".to_string()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("test".to_string()))
        }
        fn keys(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("test".to_string()))
        }
    }

    #[test]
    fn test_eleven_scores_keep_top_ten() {
        let mut store = HighscoreStore::new(MemoryStore::new());
        let scores = [50.0, 10.0, 90.0, 30.0, 70.0, 20.0, 110.0, 60.0, 80.0, 40.0, 100.0];
        let mut last = HighScores::new();
        for s in scores {
            last = store.add_highscore(Some("p"), s);
        }
        assert_eq!(last.entries.len(), MAX_HIGH_SCORES);
        let kept: Vec<u64> = last.entries.iter().map(|e| e.score).collect();
        assert_eq!(kept, vec![110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
        assert_eq!(store.highscores(), last);
    }

    #[test]
    fn test_ties_keep_older_entry_first() {
        let mut scores = HighScores::new();
        scores.add_score("first", 10);
        assert_eq!(scores.add_score("second", 10), Some(2));
        assert_eq!(scores.entries[0].name, "first");
    }

    #[test]
    fn test_add_score_reports_rank() {
        let mut scores = HighScores::new();
        for s in 1..=10 {
            scores.add_score("x", s * 10);
        }
        assert_eq!(scores.potential_rank(5), None);
        assert_eq!(scores.add_score("low", 5), None);
        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add_score("mid", 55), Some(6));
        assert_eq!(scores.top_score(), Some(100));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_score_rounded_and_name_defaulted() {
        let mut store = HighscoreStore::new(MemoryStore::new());
        let list = store.add_highscore(None, 41.6);
        assert_eq!(list.best().unwrap().name, ANONYMOUS_NAME);
        assert_eq!(list.best().unwrap().score, 42);
        let list = store.add_highscore(Some("   "), 1.2);
        assert_eq!(list.entries[1].name, ANONYMOUS_NAME);
    }

    #[test]
    fn test_player_name_rules() {
        let mut store = HighscoreStore::new(MemoryStore::new());
        assert_eq!(store.player_name(), None);
        assert_eq!(store.set_player_name("   "), None);
        assert_eq!(store.player_name(), None);

        let long = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(store.set_player_name(long).as_deref(), Some("abcdefghijklmnopqrst"));
        assert_eq!(store.player_name().as_deref(), Some("abcdefghijklmnopqrst"));

        store.set_player_name("  Ada ");
        assert_eq!(store.player_name().as_deref(), Some("Ada"));
    }

    #[test]
    fn test_broken_storage_degrades() {
        let mut store = HighscoreStore::new(BrokenStore);
        assert!(store.highscores().is_empty());
        assert_eq!(store.player_name(), None);
        assert_eq!(store.set_player_name("Ada").as_deref(), Some("Ada"));
        // Write fails, the in-memory result still reflects the run
        let list = store.add_highscore(Some("Ada"), 12.0);
        assert_eq!(list.entries.len(), 1);
    }

    #[test]
    fn test_corrupt_storage_reads_empty() {
        let mut mem = MemoryStore::new();
        mem.set("rocket_spin_highscores", "{{{").unwrap();
        let store = HighscoreStore::new(mem);
        assert!(store.highscores().is_empty());
    }

    #[test]
    fn test_stored_list_is_normalized() {
        let mut mem = MemoryStore::new();
        mem.set(
            "rocket_spin_highscores",
            r#"[{"name":"a","score":1},{"name":"b","score":9}]"#,
        )
        .unwrap();
        let store = HighscoreStore::new(mem);
        assert_eq!(store.highscores().top_score(), Some(9));
    }

    proptest! {
        #[test]
        fn prop_list_sorted_and_bounded(scores in proptest::collection::vec(0u64..1000, 0..40)) {
            let mut list = HighScores::new();
            for s in &scores {
                list.add_score("p", *s);
            }
            prop_assert!(list.entries.len() <= MAX_HIGH_SCORES);
            prop_assert!(list.entries.windows(2).all(|w| w[0].score >= w[1].score));

            let mut expected = scores.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(MAX_HIGH_SCORES);
            let kept: Vec<u64> = list.entries.iter().map(|e| e.score).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
