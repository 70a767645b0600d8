// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod confirmation_service;
pub mod history_service;
pub mod scan_service;

// Re-export all services and their types
pub use confirmation_service::{
    ConfirmationOutcome,
    ConfirmationWorkflow,
    Decision,
    PendingConfirmation,
    ACCEPTED_ACKNOWLEDGMENT,
    CONFIRMATION_TITLE,
};

pub use history_service::{
    HistoryService,
    HistorySnapshot,
    PlaceholderTotal,
    TotalPolicy,
};

pub use scan_service::{
    CaptureOutcome,
    DetectionOutcome,
    ScanSession,
    ScanStatus,
    RECEIPT_UNSUPPORTED_MESSAGE,
};
