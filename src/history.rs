//! Linear undo/redo history over edited-content snapshots.
//!
//! The history is a plain stack with a cursor. Appending after an undo
//! truncates the redo tail (branching history is not supported), and
//! appending a snapshot equal to the current entry is a no-op so that
//! repeated commits of unchanged data never pile up duplicate entries.

use crate::model::AnalysisResult;

#[derive(Debug, Default)]
pub struct HistoryManager {
    entries: Vec<AnalysisResult>,
    cursor: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all history with a single seed entry and resets the
    /// cursor. Used when a session enters review.
    pub fn reset(&mut self, seed: AnalysisResult) {
        self.entries = vec![seed];
        self.cursor = 0;
    }

    /// Appends a snapshot after the cursor, discarding any redo tail.
    /// No-op when the snapshot equals the current entry. Returns
    /// whether an entry was actually added.
    pub fn append(&mut self, snapshot: AnalysisResult) -> bool {
        if let Some(current) = self.current() {
            if *current == snapshot {
                return false;
            }
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Moves the cursor back one entry and returns the snapshot now at
    /// the cursor, or `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&AnalysisResult> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Moves the cursor forward one entry and returns the snapshot now
    /// at the cursor, or `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<&AnalysisResult> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.entries.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplateId;

    fn snapshot(headline: &str) -> AnalysisResult {
        AnalysisResult {
            business_name_suggestion: "Luxe Local".to_string(),
            headline: headline.to_string(),
            story: "A story.".to_string(),
            suggested_template: TemplateId::Service,
            location_suggestion: None,
        }
    }

    #[test]
    fn test_reset_seeds_single_entry() {
        let mut history = HistoryManager::new();
        history.reset(snapshot("one"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current().unwrap().headline, "one");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_append_advances_cursor() {
        let mut history = HistoryManager::new();
        history.reset(snapshot("one"));
        assert!(history.append(snapshot("two")));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current().unwrap().headline, "two");
    }

    #[test]
    fn test_append_equal_snapshot_is_noop() {
        let mut history = HistoryManager::new();
        history.reset(snapshot("one"));
        assert!(!history.append(snapshot("one")));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_undo_redo_moves_cursor() {
        let mut history = HistoryManager::new();
        history.reset(snapshot("one"));
        history.append(snapshot("two"));
        history.append(snapshot("three"));

        assert_eq!(history.undo().unwrap().headline, "two");
        assert_eq!(history.undo().unwrap().headline, "one");
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);

        assert_eq!(history.redo().unwrap().headline, "two");
        assert_eq!(history.redo().unwrap().headline, "three");
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn test_append_after_undo_truncates_redo_tail() {
        let mut history = HistoryManager::new();
        history.reset(snapshot("one"));
        history.append(snapshot("two"));
        history.append(snapshot("three"));
        history.undo();
        history.undo();

        assert!(history.append(snapshot("four")));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current().unwrap().headline, "four");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_interleaved_sequence_matches_stack_semantics() {
        let mut history = HistoryManager::new();
        history.reset(snapshot("a"));
        history.append(snapshot("b"));
        history.undo();
        // Duplicate of the entry at the cursor after undo: no-op.
        assert!(!history.append(snapshot("a")));
        assert_eq!(history.len(), 2);
        history.redo();
        assert_eq!(history.current().unwrap().headline, "b");
        history.append(snapshot("c"));
        assert_eq!(history.len(), 3);
        history.undo();
        history.append(snapshot("d"));
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().unwrap().headline, "d");
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryManager::new();
        assert!(history.is_empty());
        assert!(history.current().is_none());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        // First append on an empty history establishes the seed.
        assert!(history.append(snapshot("one")));
        assert_eq!(history.cursor(), 0);
    }
}
