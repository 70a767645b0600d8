// src/domain/history.rs
//
// Purchase History Entry
//
// CRITICAL INVARIANTS:
// - Created only by the history service
// - Immutable once created
// - Lives for the process lifetime only

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One confirmed purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Opaque, collision-free identifier
    pub id: Uuid,

    /// Calendar date of the purchase, serialized as YYYY-MM-DD
    pub date: NaiveDate,

    /// Item names in the order they were recorded
    pub items: Vec<String>,

    /// Monetary amount
    pub total: f64,
}

impl HistoryEntry {
    pub fn new(date: NaiveDate, items: Vec<String>, total: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            items,
            total,
        }
    }

    /// Item names joined for list display
    pub fn item_summary(&self) -> String {
        self.items.join(", ")
    }

    pub fn formatted_total(&self) -> String {
        format!("${:.2}", self.total)
    }
}
