//! Catalog error model.

use thiserror::Error;

use crate::id::{ProductId, SupplierId};

/// Result type used across the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Missing products and suppliers are normally reported as values (`Option`,
/// outcome enums). These variants exist for the callers that explicitly ask
/// for a failing contract, e.g. strict order processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product id was not present in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// No order-number supplier is registered under this id.
    #[error("order-number supplier not found: {0}")]
    SupplierNotFound(SupplierId),

    /// A value failed validation (e.g. malformed configuration).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl CatalogError {
    pub fn product_not_found(id: impl Into<ProductId>) -> Self {
        Self::ProductNotFound(id.into())
    }

    pub fn supplier_not_found(id: impl Into<SupplierId>) -> Self {
        Self::SupplierNotFound(id.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
