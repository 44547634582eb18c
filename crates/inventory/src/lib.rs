//! Inventory module.
//!
//! Stock-update policies: the capability the catalog uses to change stock
//! levels, plus the common adjustments most embedders need.

pub mod policy;

pub use policy::{StockAdjustment, StockUpdatePolicy};
