// src/services/history_service.rs
//
// Purchase History Store
//
// - Single owner of the ordered history (most recent first)
// - Writes are prepend-only and never fail
// - Every write republishes the whole ordered view to subscribers

use chrono::Utc;
use log::info;
use rand::Rng;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use crate::domain::HistoryEntry;
use crate::events::{EventBus, HistoryEntryAppended};
use crate::repositories::HistoryRepository;

/// Immutable ordered view handed to readers
pub type HistorySnapshot = Arc<Vec<HistoryEntry>>;

/// Computes the monetary total stamped on a new entry
pub trait TotalPolicy: Send + Sync {
    fn total_for(&self, items: &[String]) -> f64;
}

/// Stand-in total: a random whole amount in [1, 100].
/// Placeholder until the real pricing rule is known.
pub struct PlaceholderTotal;

impl TotalPolicy for PlaceholderTotal {
    fn total_for(&self, _items: &[String]) -> f64 {
        rand::thread_rng().gen_range(1..=100u32) as f64
    }
}

pub struct HistoryService {
    history_repo: Arc<dyn HistoryRepository>,
    event_bus: Arc<EventBus>,
    total_policy: Arc<dyn TotalPolicy>,
    publisher: watch::Sender<HistorySnapshot>,
    write_lock: Mutex<()>,
}

impl HistoryService {
    pub fn new(history_repo: Arc<dyn HistoryRepository>, event_bus: Arc<EventBus>) -> Self {
        Self::with_total_policy(history_repo, event_bus, Arc::new(PlaceholderTotal))
    }

    pub fn with_total_policy(
        history_repo: Arc<dyn HistoryRepository>,
        event_bus: Arc<EventBus>,
        total_policy: Arc<dyn TotalPolicy>,
    ) -> Self {
        let (publisher, _) = watch::channel(Arc::new(history_repo.list_all()));

        Self {
            history_repo,
            event_bus,
            total_policy,
            publisher,
            write_lock: Mutex::new(()),
        }
    }

    /// Record a purchase. Stamped with today's (UTC) date and prepended.
    pub fn append(&self, items: Vec<String>) -> HistoryEntry {
        let entry = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

            let total = self.total_policy.total_for(&items);
            let entry = HistoryEntry::new(Utc::now().date_naive(), items, total);

            self.history_repo.prepend(entry.clone());
            self.publisher
                .send_replace(Arc::new(self.history_repo.list_all()));
            entry
        };

        info!(
            "History entry {} recorded ({} item(s), {})",
            entry.id,
            entry.items.len(),
            entry.formatted_total()
        );

        self.event_bus.emit(HistoryEntryAppended::new(
            entry.id,
            entry.date,
            entry.items.len(),
        ));

        entry
    }

    /// Current ordered view, most recent first
    pub fn entries(&self) -> HistorySnapshot {
        Arc::clone(&self.publisher.borrow())
    }

    /// Receiver that observes every republished view
    pub fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.publisher.subscribe()
    }

    pub fn len(&self) -> usize {
        self.publisher.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::repositories::InMemoryHistoryRepository;

    /// Deterministic total for assertions
    pub(crate) struct FixedTotal(pub f64);

    impl TotalPolicy for FixedTotal {
        fn total_for(&self, _items: &[String]) -> f64 {
            self.0
        }
    }

    pub(crate) fn history_service(event_bus: Arc<EventBus>) -> HistoryService {
        HistoryService::with_total_policy(
            Arc::new(InMemoryHistoryRepository::new()),
            event_bus,
            Arc::new(FixedTotal(9.5)),
        )
    }

    #[test]
    fn test_starts_empty() {
        let service = history_service(Arc::new(EventBus::new()));
        assert!(service.is_empty());
        assert!(service.entries().is_empty());
    }

    #[test]
    fn test_append_orders_most_recent_first() {
        let service = history_service(Arc::new(EventBus::new()));

        let e1 = service.append(vec!["Milk".to_string()]);
        let e2 = service.append(vec!["Bread".to_string()]);

        let entries = service.entries();
        assert_eq!(entries.as_slice(), &[e2, e1]);
    }

    #[test]
    fn test_append_stamps_today_and_total() {
        let service = history_service(Arc::new(EventBus::new()));

        let entry = service.append(vec!["Widget".to_string()]);
        assert_eq!(entry.date, Utc::now().date_naive());
        assert_eq!(entry.total, 9.5);
        assert_eq!(entry.items, vec!["Widget".to_string()]);
    }

    #[test]
    fn test_placeholder_total_range() {
        let policy = PlaceholderTotal;
        for _ in 0..200 {
            let total = policy.total_for(&[]);
            assert!((1.0..=100.0).contains(&total));
            assert_eq!(total.fract(), 0.0);
        }
    }

    #[test]
    fn test_append_emits_event() {
        let bus = Arc::new(EventBus::new());
        let service = history_service(Arc::clone(&bus));

        service.append(vec!["Eggs".to_string(), "Flour".to_string()]);

        let log = bus.get_event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "HistoryEntryAppended");
    }

    #[tokio::test]
    async fn test_subscribers_observe_each_append() {
        let service = history_service(Arc::new(EventBus::new()));
        let mut receiver = service.subscribe();
        assert!(receiver.borrow_and_update().is_empty());

        let entry = service.append(vec!["Apples".to_string()]);

        receiver.changed().await.unwrap();
        let view = receiver.borrow_and_update().clone();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, entry.id);
    }
}
