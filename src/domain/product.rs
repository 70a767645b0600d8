// src/domain/product.rs
//
// Product Record
//
// A catalog product resolved from a barcode. Missing upstream fields are
// replaced by the sentinel once, at construction, and never re-derived later.

use serde::{Deserialize, Serialize};

/// Placeholder for genuinely absent catalog data. Never a valid catalog value.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Barcode the product was looked up with
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub model: String,
    pub brand: String,
}

impl ProductRecord {
    /// Build a record from optional catalog attributes.
    /// Absent or blank values become `NOT_AVAILABLE`.
    pub fn from_attributes(
        barcode: impl Into<String>,
        name: Option<String>,
        description: Option<String>,
        model: Option<String>,
        brand: Option<String>,
    ) -> Self {
        Self {
            barcode: barcode.into(),
            name: or_sentinel(name),
            description: or_sentinel(description),
            model: or_sentinel(model),
            brand: or_sentinel(brand),
        }
    }

    /// Labelled fields in display order, values verbatim (sentinels included)
    pub fn display_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("Barcode", self.barcode.as_str()),
            ("Product", self.name.as_str()),
            ("Description", self.description.as_str()),
            ("Model", self.model.as_str()),
            ("Brand", self.brand.as_str()),
        ]
    }

    /// Names of the attributes that fell back to the sentinel
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.display_fields()
            .iter()
            .skip(1)
            .filter(|(_, value)| *value == NOT_AVAILABLE)
            .map(|(label, _)| *label)
            .collect()
    }
}

fn or_sentinel(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_default_to_sentinel() {
        let product = ProductRecord::from_attributes(
            "012345678905",
            Some("Widget".to_string()),
            None,
            None,
            Some("Acme".to_string()),
        );

        assert_eq!(product.name, "Widget");
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.description, NOT_AVAILABLE);
        assert_eq!(product.model, NOT_AVAILABLE);
        assert_eq!(product.missing_fields(), vec!["Description", "Model"]);
    }

    #[test]
    fn test_blank_attribute_counts_as_missing() {
        let product =
            ProductRecord::from_attributes("1", Some("   ".to_string()), None, None, None);
        assert_eq!(product.name, NOT_AVAILABLE);
    }

    #[test]
    fn test_display_fields_are_verbatim() {
        let product = ProductRecord::from_attributes("42", None, None, None, None);
        let fields = product.display_fields();
        assert_eq!(fields[0], ("Barcode", "42"));
        assert!(fields[1..].iter().all(|(_, v)| *v == "N/A"));
    }
}
