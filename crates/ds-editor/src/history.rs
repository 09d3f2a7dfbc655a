//! Undo/Redo history.
//!
//! A bounded, linear log of full element-list snapshots with a cursor.
//! Each entry is one user-visible action ("Move element", "Change fill").
//! Live edits between two pushes are not individually undoable; only their
//! net effect at the next push is.
//!
//! Snapshots are whole copies of the element list, no diffing. Scenes hold
//! tens to low hundreds of elements, so a copy per action is cheap.

use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use ds_core::model::Element;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub action: String,
    pub elements: Vec<Element>,
    pub timestamp: DateTime<Utc>,
}

/// Snapshot log plus cursor. The cursor is `None` until the first push and
/// otherwise always indexes a valid entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: Option<usize>,
    /// Maximum number of entries kept.
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: Vec::with_capacity(limit),
            index: None,
            limit,
        }
    }

    /// Record a snapshot of `elements` tagged with `action`.
    ///
    /// Any redo branch beyond the cursor is discarded. When the log is over
    /// its limit the oldest entry is evicted and the cursor shifts with it.
    pub fn push(&mut self, action: &str, elements: &[Element]) {
        let keep = self.index.map_or(0, |i| i + 1);
        if keep < self.entries.len() {
            log::trace!("discarding {} redo entries", self.entries.len() - keep);
            self.entries.truncate(keep);
        }

        self.entries.push(HistoryEntry {
            action: action.to_string(),
            elements: elements.to_vec(),
            timestamp: Utc::now(),
        });
        if self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.index = Some(self.entries.len() - 1);
        log::debug!("history push {action:?} ({} entries)", self.entries.len());
    }

    /// Step back one entry and install its snapshot into `store`.
    /// Returns the label of the action that was undone.
    pub fn undo(&mut self, store: &mut DocumentStore) -> Option<String> {
        let index = self.index.filter(|&i| i > 0)?;
        let undone = self.entries[index].action.clone();
        self.index = Some(index - 1);
        store.replace_elements(self.entries[index - 1].elements.clone());
        Some(undone)
    }

    /// Step forward one entry and install its snapshot into `store`.
    /// Returns the label of the action that was redone.
    pub fn redo(&mut self, store: &mut DocumentStore) -> Option<String> {
        let next = self.index.map(|i| i + 1).filter(|&i| i < self.entries.len())?;
        self.index = Some(next);
        store.replace_elements(self.entries[next].elements.clone());
        Some(self.entries[next].action.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// The entry the cursor points at.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.map(|i| &self.entries[i])
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Start a fresh log whose base entry is `elements`.
    pub fn reset(&mut self, action: &str, elements: &[Element]) {
        self.entries.clear();
        self.index = None;
        self.push(action, elements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::model::ElementType;
    use ds_core::patch::ElementPatch;
    use pretty_assertions::assert_eq;

    #[test]
    fn undo_redo_move() {
        let mut store = DocumentStore::default();
        let mut history = History::new(50);
        history.push("Initial", store.elements());

        let id = store.add_element(ElementType::Rectangle, &ElementPatch::position(10.0, 10.0));
        history.push("Add rectangle", store.elements());

        store.update_element(id, &ElementPatch::position(60.0, 40.0));
        history.push("Move element", store.elements());

        let desc = history.undo(&mut store);
        assert_eq!(desc.as_deref(), Some("Move element"));
        assert_eq!(store.element(id).unwrap().base.x, 10.0);

        let desc = history.redo(&mut store);
        assert_eq!(desc.as_deref(), Some("Move element"));
        assert_eq!(store.element(id).unwrap().base.x, 60.0);
    }

    #[test]
    fn redo_clears_on_new_action() {
        let mut store = DocumentStore::default();
        let mut history = History::new(50);
        history.push("Initial", store.elements());
        store.add_element(ElementType::Circle, &ElementPatch::default());
        history.push("Add circle", store.elements());

        history.undo(&mut store);
        assert!(history.can_redo());

        store.add_element(ElementType::Star, &ElementPatch::default());
        history.push("Add star", store.elements());
        assert!(!history.can_redo());
        assert_eq!(history.redo(&mut store), None);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn limit_evicts_oldest() {
        let store = DocumentStore::default();
        let mut history = History::new(3);
        for i in 0..5 {
            history.push(&format!("step {i}"), store.elements());
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), Some(2));
        assert_eq!(history.entries()[0].action, "step 2");
    }

    #[test]
    fn boundaries_are_noops() {
        let mut store = DocumentStore::default();
        let mut history = History::default();
        assert_eq!(history.undo(&mut store), None);
        assert_eq!(history.redo(&mut store), None);
        assert_eq!(history.current(), None);

        history.push("Initial", store.elements());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(&mut store), None);
        assert_eq!(history.index(), Some(0));
    }

    #[test]
    fn live_edits_between_pushes_are_not_separate_steps() {
        let mut store = DocumentStore::default();
        let mut history = History::default();
        history.push("Initial", store.elements());

        let id = store.add_element(ElementType::Rectangle, &ElementPatch::default());
        for x in 1..=5 {
            store.update_element(id, &ElementPatch::position(x as f32 * 10.0, 0.0));
        }
        history.push("Add and drag", store.elements());

        assert_eq!(history.undo(&mut store).as_deref(), Some("Add and drag"));
        assert!(store.is_empty());
        history.redo(&mut store);
        assert_eq!(store.element(id).unwrap().base.x, 50.0);
    }

    #[test]
    fn reset_seeds_a_single_base_entry() {
        let mut store = DocumentStore::default();
        let mut history = History::default();
        history.push("a", store.elements());
        history.push("b", store.elements());
        store.add_element(ElementType::Line, &ElementPatch::default());
        history.reset("Open project", store.elements());
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().unwrap().elements, store.elements());
    }
}
