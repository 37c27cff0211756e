//! Product catalog shown on the storefront page.
//!
//! Products are loaded once at startup from a JSON file:
//!
//! ```json
//! [
//!   { "sku": "kaffee-crema", "name": "Kaffee Crema", "description": "...", "price": "12.90", "badge": "Neu" },
//!   { "name": "Grüner Tee", "price": "7.50" }
//! ]
//! ```
//!
//! A missing sku is derived from the name. The catalog is the authority for
//! names and prices of the items it knows.

use std::collections::HashSet;
use std::path::Path;

use kiosk_core::{CurrencyCode, Price, Sku};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Errors loading the product catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid sku for product {name:?}: {source}")]
    InvalidSku {
        name: String,
        #[source]
        source: kiosk_core::SkuError,
    },
    #[error("duplicate sku in catalog: {0}")]
    DuplicateSku(Sku),
    #[error("product {0:?} has a negative price")]
    NegativePrice(String),
    #[error("catalog contains no products")]
    Empty,
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    /// Short highlight such as "Neu" or "Bestseller".
    pub badge: Option<String>,
}

/// Product as written in the catalog file.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    sku: Option<String>,
    name: String,
    description: Option<String>,
    price: Decimal,
    badge: Option<String>,
}

/// The products offered on the storefront, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn load(path: &Path, currency: CurrencyCode) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json, currency)
    }

    /// Parse the catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, invalid or duplicate skus,
    /// negative prices, or an empty product list.
    pub fn from_json(json: &str, currency: CurrencyCode) -> Result<Self, CatalogError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Self::from_records(records, currency)
    }

    fn from_records(records: Vec<ProductRecord>, currency: CurrencyCode) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(records.len());

        for record in records {
            let name = record.name.trim().to_string();
            let sku = match record.sku.as_deref() {
                Some(raw) => Sku::parse(raw).map_err(|source| CatalogError::InvalidSku {
                    name: name.clone(),
                    source,
                })?,
                None => Sku::from_name(&name),
            };

            if record.price.is_sign_negative() && !record.price.is_zero() {
                return Err(CatalogError::NegativePrice(name));
            }

            if !seen.insert(sku.clone()) {
                return Err(CatalogError::DuplicateSku(sku));
            }

            products.push(Product {
                sku,
                name,
                description: record.description.filter(|d| !d.trim().is_empty()),
                price: Price::new(record.price, currency),
                badge: record.badge.filter(|b| !b.trim().is_empty()),
            });
        }

        Ok(Self { products })
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by sku.
    #[must_use]
    pub fn get(&self, sku: &Sku) -> Option<&Product> {
        self.products.iter().find(|product| &product.sku == sku)
    }
}
