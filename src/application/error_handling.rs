// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing notifications
// - Provides consistent error format for UI
// - Lookup failures carry their message so the notice can show it
// - Logs errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Invalid input/validation error
    Validation,

    /// Request not allowed in the current scan state
    DomainError,

    /// Catalog lookup failed
    ExternalService,

    /// Session torn down
    SessionClosed,

    /// Bad configuration
    Configuration,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                domain_error.to_string(),
                None,
            ),

            // All lookup failures are surfaced the same way
            AppError::Lookup(lookup_error) => Self::new(
                ErrorType::ExternalService,
                lookup_error.to_string(),
                None,
            ),

            AppError::SessionClosed => Self::new(
                ErrorType::SessionClosed,
                "Scan session has been closed",
                None,
            ),

            AppError::Config(message) => {
                error!("Configuration error: {}", message);
                Self::new(ErrorType::Configuration, "Invalid configuration", Some(message))
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}
