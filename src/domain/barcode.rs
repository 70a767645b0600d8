// src/domain/barcode.rs
//
// Barcode Detection Event
//
// Produced continuously by the camera subsystem whenever a recognizable code
// is in frame. Never deduplicated at the source, never stored.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{DomainError, DomainResult};

/// Encoding scheme of a scanned code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Qr,
}

impl Symbology {
    /// Every symbology the scanner is configured to recognise
    pub const ALL: [Symbology; 5] = [
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Qr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "ean13",
            Symbology::Ean8 => "ean8",
            Symbology::UpcA => "upc_a",
            Symbology::UpcE => "upc_e",
            Symbology::Qr => "qr",
        }
    }
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Symbology {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "ean13" | "ean_13" => Ok(Symbology::Ean13),
            "ean8" | "ean_8" => Ok(Symbology::Ean8),
            "upc_a" | "upca" => Ok(Symbology::UpcA),
            "upc_e" | "upce" => Ok(Symbology::UpcE),
            "qr" => Ok(Symbology::Qr),
            other => Err(DomainError::InvariantViolation(format!(
                "Unsupported barcode symbology: {}",
                other
            ))),
        }
    }
}

/// A single detection callback from the camera
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeEvent {
    pub symbology: Symbology,

    /// Raw decoded payload, forwarded verbatim to the catalog
    pub payload: String,
}

impl BarcodeEvent {
    pub fn new(symbology: Symbology, payload: impl Into<String>) -> Self {
        Self {
            symbology,
            payload: payload.into(),
        }
    }
}

/// The only requirement on a payload is that it is non-empty.
/// No format validation happens before dispatch: malformed codes still go upstream.
pub fn validate_barcode_event(event: &BarcodeEvent) -> DomainResult<()> {
    if event.payload.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Barcode payload cannot be empty".to_string(),
        ));
    }
    Ok(())
}
