// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types
// - Discarded camera detections are NOT events (they arrive at frame rate)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ScanMode, Symbology};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// SCAN GATE EVENTS
// ============================================================================

/// Emitted when capture is pressed and the gate moves Idle -> Armed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanArmed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub ticket: u64,
}

impl ScanArmed {
    pub fn new(session_id: Uuid, ticket: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            ticket,
        }
    }
}

impl DomainEvent for ScanArmed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ScanArmed" }
}

/// Emitted when the single accepted detection of an arm starts a lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeAccepted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub ticket: u64,
    pub symbology: Symbology,
    pub payload: String,
}

impl BarcodeAccepted {
    pub fn new(session_id: Uuid, ticket: u64, symbology: Symbology, payload: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            ticket,
            symbology,
            payload,
        }
    }
}

impl DomainEvent for BarcodeAccepted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BarcodeAccepted" }
}

/// Emitted when the user switches between barcode and receipt capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanModeChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub mode: ScanMode,
}

impl ScanModeChanged {
    pub fn new(session_id: Uuid, mode: ScanMode) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            mode,
        }
    }
}

impl DomainEvent for ScanModeChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ScanModeChanged" }
}

// ============================================================================
// LOOKUP EVENTS
// ============================================================================

/// Emitted when the catalog resolved a barcode and confirmation is shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub ticket: u64,
    pub barcode: String,
    pub product_name: String,
}

impl ProductResolved {
    pub fn new(session_id: Uuid, ticket: u64, barcode: String, product_name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            ticket,
            barcode,
            product_name,
        }
    }
}

impl DomainEvent for ProductResolved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ProductResolved" }
}

/// Emitted when a lookup failed; the gate is already back to Idle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub ticket: u64,
    pub barcode: String,
    pub reason: String,
}

impl LookupFailed {
    pub fn new(session_id: Uuid, ticket: u64, barcode: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            ticket,
            barcode,
            reason,
        }
    }
}

impl DomainEvent for LookupFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "LookupFailed" }
}

// ============================================================================
// CONFIRMATION EVENTS
// ============================================================================

/// Emitted after an accepted product was recorded in history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfirmed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub barcode: String,
    pub history_entry_id: Uuid,
}

impl ScanConfirmed {
    pub fn new(barcode: String, history_entry_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            barcode,
            history_entry_id,
        }
    }
}

impl DomainEvent for ScanConfirmed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ScanConfirmed" }
}

/// Emitted when the user rejected a resolved product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub barcode: String,
}

impl ScanRejected {
    pub fn new(barcode: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            barcode,
        }
    }
}

impl DomainEvent for ScanRejected {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ScanRejected" }
}

// ============================================================================
// HISTORY EVENTS
// ============================================================================

/// Emitted after a new entry was prepended to the purchase history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryAppended {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entry_id: Uuid,
    pub date: NaiveDate,
    pub item_count: usize,
}

impl HistoryEntryAppended {
    pub fn new(entry_id: Uuid, date: NaiveDate, item_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entry_id,
            date,
            item_count,
        }
    }
}

impl DomainEvent for HistoryEntryAppended {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "HistoryEntryAppended" }
}
