use serde::{Deserialize, Serialize};

use stockwise_products::Product;

/// How a requested quantity changes a product's stock.
///
/// The catalog hands the policy the product (under its write lock) and the
/// quantity from the request; interpreting that quantity is entirely up to
/// the policy. Any `FnMut(&mut Product, i64)` closure is a policy.
///
/// The write lock is held for the whole call. A policy must not read the
/// product it is updating through any other handle: a captured `ProductView`
/// of it, or an `Order` whose lines contain it (`quantity_of`, `summary`).
/// Such a read blocks forever.
pub trait StockUpdatePolicy {
    fn apply(&mut self, product: &mut Product, quantity: i64);
}

impl<F> StockUpdatePolicy for F
where
    F: FnMut(&mut Product, i64),
{
    fn apply(&mut self, product: &mut Product, quantity: i64) {
        self(product, quantity)
    }
}

/// Built-in stock policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAdjustment {
    /// Add the quantity (receiving goods).
    Increment,
    /// Subtract the quantity (fulfilling an order). Stock may go negative.
    Decrement,
    /// Overwrite the stock level with the quantity.
    Set,
    /// Leave stock untouched.
    Reject,
}

impl StockUpdatePolicy for StockAdjustment {
    fn apply(&mut self, product: &mut Product, quantity: i64) {
        match self {
            StockAdjustment::Increment => {
                product.adjust_stock(quantity);
            }
            StockAdjustment::Decrement => {
                product.adjust_stock(quantity.saturating_neg());
            }
            StockAdjustment::Set => product.set_stock_quantity(quantity),
            StockAdjustment::Reject => {
                tracing::debug!(
                    product_id = %product.id_typed(),
                    quantity,
                    "stock update rejected by policy"
                );
            }
        }
    }
}
