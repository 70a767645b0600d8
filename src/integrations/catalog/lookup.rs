// src/integrations/catalog/lookup.rs
//
// Seam between the scan session and whatever resolves barcodes.
// The HTTP client is the production implementation.

use async_trait::async_trait;

use crate::domain::ProductRecord;
use crate::error::LookupError;

/// Resolves a barcode payload into a product.
///
/// The scan gate stays Resolving until the returned future completes; a
/// lookup that never completes keeps the scanner busy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn lookup(&self, barcode: &str) -> Result<ProductRecord, LookupError>;
}
