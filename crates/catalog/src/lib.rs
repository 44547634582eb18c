//! `stockwise-catalog` — the in-memory catalog and order engine.
//!
//! [`CatalogManager`] owns the product store, the registered order-number
//! suppliers and the processed-order history. All status output goes through
//! an injected [`CatalogReporter`]; the manager itself performs no IO.

pub mod config;
pub mod manager;
pub mod reporter;

pub use config::{CatalogConfig, MISSING_PRODUCT_POLICY_ENV, MissingProductPolicy};
pub use manager::{CatalogManager, StockUpdateOutcome};
pub use reporter::{CatalogReporter, NullReporter, TracingReporter};

pub use stockwise_core::{CatalogError, CatalogResult, Entity, OrderId, ProductId, SupplierId};
pub use stockwise_inventory::{StockAdjustment, StockUpdatePolicy};
pub use stockwise_orders::{
    Order, OrderLine, OrderLineSummary, OrderNumberSupplier, OrderSummary, SequentialOrderNumbers,
    UuidOrderNumbers,
};
pub use stockwise_products::{Product, ProductStatus, ProductView, SharedProduct};
