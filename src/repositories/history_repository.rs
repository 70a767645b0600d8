// src/repositories/history_repository.rs

use std::sync::{PoisonError, RwLock};

use crate::domain::HistoryEntry;

/// Storage for purchase history entries, most recent first.
///
/// Entries are only ever prepended; nothing is edited or removed.
pub trait HistoryRepository: Send + Sync {
    fn prepend(&self, entry: HistoryEntry);
    fn list_all(&self) -> Vec<HistoryEntry>;
}

/// Process-lifetime history storage
#[derive(Default)]
pub struct InMemoryHistoryRepository {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn prepend(&self, entry: HistoryEntry) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(0, entry);
    }

    fn list_all(&self) -> Vec<HistoryEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
