//! Shared product handles.
//!
//! The catalog and the orders it has processed point at the same product
//! instance. The catalog holds a [`SharedProduct`] and is the only writer;
//! everyone else gets a [`ProductView`], which can read but never mutate.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockwise_core::ProductId;

use crate::product::Product;

/// Catalog-owned, writable handle to a product.
#[derive(Debug, Clone)]
pub struct SharedProduct {
    inner: Arc<RwLock<Product>>,
}

impl SharedProduct {
    pub fn new(product: Product) -> Self {
        Self {
            inner: Arc::new(RwLock::new(product)),
        }
    }

    /// Lock for reading.
    ///
    /// A poisoned lock only means a stock policy panicked mid-update; the
    /// product itself is still a valid value, so the guard is recovered.
    pub fn read(&self) -> RwLockReadGuard<'_, Product> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for writing. Same poisoning rule as [`SharedProduct::read`].
    pub fn write(&self) -> RwLockWriteGuard<'_, Product> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read-only handle onto the same instance.
    pub fn view(&self) -> ProductView {
        ProductView {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Read-only handle to a product owned by a catalog.
///
/// Reads always observe the current state of the instance, so a view held by
/// an old order sees later stock changes made through the catalog (but not a
/// replacement product added under the same id).
#[derive(Debug, Clone)]
pub struct ProductView {
    inner: Arc<RwLock<Product>>,
}

impl ProductView {
    pub fn read(&self) -> RwLockReadGuard<'_, Product> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the product as it is right now.
    pub fn snapshot(&self) -> Product {
        self.read().clone()
    }

    pub fn id(&self) -> ProductId {
        self.read().id_typed().clone()
    }

    pub fn price(&self) -> f64 {
        self.read().price()
    }

    pub fn stock_quantity(&self) -> i64 {
        self.read().stock_quantity()
    }

    /// True when both handles point at the same product instance.
    pub fn is_same_instance(&self, other: &ProductView) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
