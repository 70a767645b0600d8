// src/lib.rs
// ShopScan - Shopping assistant core
//
// Architecture:
// - Domain-centric: gate, product and history rules live in the domain
// - Event-driven: services report what happened through the event bus
// - Single-flight: one camera detection per capture press reaches the catalog
// - Application Layer: UI boundary (commands + DTOs)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_barcode_event,
    validate_scan_gate,
    ArmTicket,
    // Camera input
    BarcodeEvent,
    DomainError,
    // Purchase history
    HistoryEntry,
    // Catalog product
    ProductRecord,
    // Scan gate
    ScanGate,
    ScanGateState,
    ScanMode,
    Symbology,
    NOT_AVAILABLE,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, LookupError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    BarcodeAccepted,
    DomainEvent,
    EventBus,
    EventLogEntry,
    HistoryEntryAppended,
    LookupFailed,
    ProductResolved,
    ScanArmed,
    ScanConfirmed,
    ScanModeChanged,
    ScanRejected,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{HistoryRepository, InMemoryHistoryRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CaptureOutcome,
    // Confirmation Workflow
    ConfirmationOutcome,
    ConfirmationWorkflow,
    Decision,
    DetectionOutcome,
    // Purchase History Store
    HistoryService,
    HistorySnapshot,
    PendingConfirmation,
    PlaceholderTotal,
    // Scan Session
    ScanSession,
    ScanStatus,
    TotalPolicy,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use app::{assemble_app_state, init_app_state, AppConfig};
pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CatalogClient, CatalogConfig, CatalogLookup};
