use serde::{Deserialize, Serialize};

use stockwise_core::{Entity, ProductId};

/// Product lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
}

/// Catalog entity: Product.
///
/// Identity, category and status are fixed once the product is built.
/// Stock (and, for policies that need it, price) is changed in place by
/// stock-update policies running inside the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    category: String,
    status: ProductStatus,
    stock_quantity: i64,
}

impl Product {
    /// Create an active product with no stock. The name defaults to the id.
    pub fn new(id: impl Into<ProductId>, price: f64, category: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            price,
            category: category.into(),
            status: ProductStatus::Active,
            stock_quantity: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_stock(mut self, stock_quantity: i64) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Overwrite the stock level. No bounds are enforced.
    pub fn set_stock_quantity(&mut self, stock_quantity: i64) {
        self.stock_quantity = stock_quantity;
    }

    /// Add `delta` (possibly negative) to the stock level and return the new level.
    pub fn adjust_stock(&mut self, delta: i64) -> i64 {
        self.stock_quantity = self.stock_quantity.saturating_add(delta);
        self.stock_quantity
    }

    /// Change the unit price. Orders already processed keep the price they captured.
    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
