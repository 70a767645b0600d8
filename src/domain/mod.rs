// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod barcode;
pub mod history;
pub mod product;
pub mod scan_gate;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Camera input
pub use barcode::{validate_barcode_event, BarcodeEvent, Symbology};

// Catalog product
pub use product::{ProductRecord, NOT_AVAILABLE};

// Purchase history
pub use history::HistoryEntry;

// Scan gate (single-flight state machine)
pub use scan_gate::{validate_scan_gate, ArmTicket, ScanGate, ScanGateState, ScanMode};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
