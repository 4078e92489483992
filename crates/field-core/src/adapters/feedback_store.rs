//! In-memory feedback store.

use parking_lot::RwLock;
use shared_types::{Feedback, FeedbackQuery};

use crate::ports::FeedbackStore;

/// Feedback entries in insertion order, one per slot.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackStore {
    entries: RwLock<Vec<Feedback>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of every entry.
    pub fn all(&self) -> Vec<Feedback> {
        self.entries.read().clone()
    }
}

impl FeedbackStore for InMemoryFeedbackStore {
    fn find(&self, query: &FeedbackQuery) -> Vec<Feedback> {
        self.entries
            .read()
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect()
    }

    fn update(&self, entries: Vec<Feedback>) {
        let mut stored = self.entries.write();
        for entry in entries {
            let slot = stored.iter().position(|e| e.same_slot(&entry));
            match (slot, entry.messages.is_empty()) {
                (Some(index), true) => {
                    stored.remove(index);
                }
                (Some(index), false) => stored[index] = entry,
                (None, false) => stored.push(entry),
                (None, true) => {}
            }
        }
    }

    fn clear(&self, query: &FeedbackQuery) {
        self.entries.write().retain(|entry| !query.matches(entry));
    }
}
