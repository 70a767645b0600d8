// src/integrations/catalog/client.rs
//
// Product Catalog HTTP Client
//
// ARCHITECTURE:
// - GET <base>?mode=json&keycode=<key>&find=<barcode>
// - Validates status, content type and application status, in that order
// - Maps the nested product/attributes payload into a ProductRecord
// - Used by the scan session through the CatalogLookup trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - No caching, no retry
// - The barcode is sent verbatim, no format validation
// - Missing attributes are defaulted here, once, never at display sites

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::Value;

use super::config::CatalogConfig;
use super::lookup::CatalogLookup;
use crate::domain::ProductRecord;
use crate::error::{AppResult, LookupError};

/// Top-level catalog response.
///
/// `status` is usually a plain string ("ok" / "error"); some feeds send an
/// object with `code` and `message`, which is accepted too. Everything but
/// the top-level shape is kept as raw JSON so a wrong-typed field degrades
/// to a sentinel instead of failing the lookup.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    product: Option<Value>,
}

/// Catalog API Client
pub struct CatalogClient {
    config: CatalogConfig,
    http_client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(config: CatalogConfig) -> AppResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.lookup_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Look up a barcode in the catalog
    pub async fn lookup(&self, barcode: &str) -> Result<ProductRecord, LookupError> {
        debug!("Catalog lookup for barcode {}", barcode);

        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(&[
                ("mode", "json"),
                ("keycode", self.config.keycode.as_str()),
                ("find", barcode),
            ])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Catalog request for {} failed: {}", barcode, e);
                LookupError::Transport(e.status().map(|s| s.as_u16()))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Catalog returned status {} for {}", status, barcode);
            return Err(LookupError::Transport(Some(status.as_u16())));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read catalog body for {}: {}", barcode, e);
            LookupError::Transport(Some(status.as_u16()))
        })?;

        decode_response(barcode, content_type.as_deref(), &body)
    }
}

#[async_trait]
impl CatalogLookup for CatalogClient {
    async fn lookup(&self, barcode: &str) -> Result<ProductRecord, LookupError> {
        CatalogClient::lookup(self, barcode).await
    }
}

// ========================================================================
// INTERNAL: Response validation
// ========================================================================

/// Validate a successful HTTP response and map it into a ProductRecord
pub(crate) fn decode_response(
    barcode: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<ProductRecord, LookupError> {
    if !content_type.map(is_json_content_type).unwrap_or(false) {
        warn!(
            "Catalog answered {} with content type {:?}",
            barcode, content_type
        );
        return Err(LookupError::UnexpectedFormat);
    }

    let parsed: CatalogResponse = serde_json::from_slice(body).map_err(|e| {
        warn!("Catalog body for {} is not valid JSON: {}", barcode, e);
        LookupError::UnexpectedFormat
    })?;

    if let Some(message) = upstream_error(&parsed) {
        return Err(LookupError::Upstream(message));
    }

    // A non-object product or attributes block counts as absent
    let attributes = parsed
        .product
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|p| p.get("attributes"))
        .and_then(Value::as_object);
    let attribute = |key: &str| text(attributes.and_then(|a| a.get(key)));

    let product = ProductRecord::from_attributes(
        barcode,
        attribute("product"),
        attribute("description"),
        attribute("model"),
        attribute("brand"),
    );

    let missing = product.missing_fields();
    if !missing.is_empty() {
        debug!("Catalog entry for {} lacks {}", barcode, missing.join(", "));
    }

    Ok(product)
}

/// `application/json`, `text/json` or any `+json` structured syntax suffix
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || essence == "text/json" || essence.ends_with("+json")
}

fn upstream_error(response: &CatalogResponse) -> Option<String> {
    const UNKNOWN: &str = "Unknown catalog error";

    match &response.status {
        Some(Value::String(s)) if s.eq_ignore_ascii_case("error") => {
            Some(text(response.message.as_ref()).unwrap_or_else(|| UNKNOWN.to_string()))
        }
        Some(Value::Object(status)) => {
            let code = status.get("code").and_then(|c| match c {
                Value::String(s) => s.parse::<u16>().ok(),
                Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
                _ => None,
            });
            match code {
                Some(code) if !(200..300).contains(&code) => Some(
                    text(status.get("message"))
                        .or_else(|| text(response.message.as_ref()))
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                ),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Lenient attribute extraction: strings as-is, numbers and booleans rendered
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
