//! Orders module.
//!
//! Processed orders (immutable once built) and the order-number suppliers
//! callers register with the catalog.

pub mod number;
pub mod order;

pub use number::{OrderNumberSupplier, SequentialOrderNumbers, UuidOrderNumbers};
pub use order::{Order, OrderLine, OrderLineSummary, OrderSummary};
