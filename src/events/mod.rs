// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Scan gate
    BarcodeAccepted,
    ScanArmed,
    ScanModeChanged,

    // Lookup
    LookupFailed,
    ProductResolved,

    // Confirmation
    ScanConfirmed,
    ScanRejected,

    // History
    HistoryEntryAppended,
};

pub use bus::{EventBus, EventLogEntry, DEFAULT_LOG_CAPACITY};

