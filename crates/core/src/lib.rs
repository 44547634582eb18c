//! `stockwise-core` — shared building blocks for the catalog crates.
//!
//! Identifiers, the entity trait and the error model. No IO, no state.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{CatalogError, CatalogResult};
pub use id::{OrderId, ProductId, SupplierId};
