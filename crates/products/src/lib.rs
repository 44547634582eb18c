//! Products module.
//!
//! The product entity plus the shared handles the catalog and processed
//! orders use to point at the same instance.

pub mod product;
pub mod shared;

pub use product::{Product, ProductStatus};
pub use shared::{ProductView, SharedProduct};
