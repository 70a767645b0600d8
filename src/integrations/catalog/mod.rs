// src/integrations/catalog/mod.rs
//
// Product catalog integration: barcode -> ProductRecord

pub mod client;
pub mod config;
pub mod lookup;

pub use client::CatalogClient;
pub use config::CatalogConfig;
pub use lookup::CatalogLookup;

#[cfg(test)]
pub use lookup::MockCatalogLookup;
