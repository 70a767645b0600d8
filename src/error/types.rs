// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Catalog lookup failures.
///
/// Missing product attributes are not an error: they are defaulted at the
/// parse boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Network failure or non-success HTTP status (None when no response arrived)
    #[error("Catalog request failed ({})", describe_status(.0))]
    Transport(Option<u16>),

    /// Response was not structured JSON data
    #[error("Catalog returned an unexpected response format")]
    UnexpectedFormat,

    /// Catalog answered with an application-level error
    #[error("Catalog error: {0}")]
    Upstream(String),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP status {}", code),
        None => "no response".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scan session has been closed")]
    SessionClosed,

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Other(format!("HTTP client error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
