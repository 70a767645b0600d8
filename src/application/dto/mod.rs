// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{HistoryEntry, ProductRecord};
use crate::services::{
    CaptureOutcome, ConfirmationOutcome, PendingConfirmation, ScanStatus, CONFIRMATION_TITLE,
    RECEIPT_UNSUPPORTED_MESSAGE,
};

pub const EMPTY_HISTORY_MESSAGE: &str = "No purchases yet";

// ============================================================================
// SCAN DTOs
// ============================================================================

/// Raw camera detection as delivered by the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeEventDto {
    pub symbology: String,
    pub payload: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub model: String,
    pub brand: String,
}

impl From<&ProductRecord> for ProductDto {
    fn from(product: &ProductRecord) -> Self {
        Self {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            model: product.model.clone(),
            brand: product.brand.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStatusDto {
    pub session_id: String,
    pub gate_state: String,
    pub mode: String,
    pub controls_enabled: bool,
    pub pending_product: Option<ProductDto>,
    pub closed: bool,
}

impl From<ScanStatus> for ScanStatusDto {
    fn from(status: ScanStatus) -> Self {
        Self {
            session_id: status.session_id.to_string(),
            gate_state: status.gate_state.to_string(),
            mode: status.mode.to_string(),
            controls_enabled: status.controls_enabled,
            pending_product: status.pending.as_ref().map(ProductDto::from),
            closed: status.closed,
        }
    }
}

/// What the capture button press did
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureResultDto {
    pub armed: bool,
    /// Notice for the user, if any
    pub notice: Option<String>,
}

impl From<CaptureOutcome> for CaptureResultDto {
    fn from(outcome: CaptureOutcome) -> Self {
        match outcome {
            CaptureOutcome::Armed(_) => Self {
                armed: true,
                notice: None,
            },
            CaptureOutcome::Ignored(_) => Self {
                armed: false,
                notice: None,
            },
            CaptureOutcome::ReceiptUnsupported => Self {
                armed: false,
                notice: Some(RECEIPT_UNSUPPORTED_MESSAGE.to_string()),
            },
            CaptureOutcome::Closed => Self {
                armed: false,
                notice: None,
            },
        }
    }
}

// ============================================================================
// CONFIRMATION DTOs
// ============================================================================

/// Modal prompt shown once a product is resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationDto {
    pub title: String,
    pub message: String,
    pub product: ProductDto,
}

impl From<&PendingConfirmation> for ConfirmationDto {
    fn from(pending: &PendingConfirmation) -> Self {
        Self {
            title: CONFIRMATION_TITLE.to_string(),
            message: pending.message(),
            product: ProductDto::from(&pending.product),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConfirmationResultDto {
    Accepted {
        entry: HistoryEntryDto,
        acknowledgment: String,
    },
    Rejected {
        barcode: String,
    },
}

impl From<ConfirmationOutcome> for ConfirmationResultDto {
    fn from(outcome: ConfirmationOutcome) -> Self {
        match outcome {
            ConfirmationOutcome::Accepted {
                entry,
                acknowledgment,
            } => Self::Accepted {
                entry: HistoryEntryDto::from(&entry),
                acknowledgment,
            },
            ConfirmationOutcome::Rejected { barcode } => Self::Rejected { barcode },
        }
    }
}

/// Result of a detection callback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DetectionDto {
    /// Nothing happened (gate not armed, duplicate, or stale)
    Ignored,
    Confirm(ConfirmationDto),
}

// ============================================================================
// HISTORY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub id: String,
    pub date: String,
    pub items: Vec<String>,
    pub item_summary: String,
    pub total: f64,
    pub formatted_total: String,
}

impl From<&HistoryEntry> for HistoryEntryDto {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date.to_string(),
            items: entry.items.clone(),
            item_summary: entry.item_summary(),
            total: entry.total,
            formatted_total: entry.formatted_total(),
        }
    }
}

/// Rendered history screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryViewDto {
    pub entries: Vec<HistoryEntryDto>,
    /// Set only when there is nothing to show
    pub empty_message: Option<String>,
}

impl HistoryViewDto {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        Self {
            entries: entries.iter().map(HistoryEntryDto::from).collect(),
            empty_message: entries
                .is_empty()
                .then(|| EMPTY_HISTORY_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPurchaseDto {
    pub items: Vec<String>,
}

// ============================================================================
// RESPONSE DTOs
// ============================================================================

/// Dismissible notice shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDto {
    pub title: String,
    pub message: String,
}

impl NotificationDto {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
