use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockwise_core::{Entity, OrderId, ProductId};
use stockwise_products::ProductView;

/// Order line: product, aggregated quantity, unit price captured when the
/// order was built.
#[derive(Debug, Clone)]
pub struct OrderLine {
    product: ProductView,
    quantity: i64,
    unit_price: f64,
}

impl OrderLine {
    pub fn product(&self) -> &ProductView {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// A processed order.
///
/// The total is a point-in-time snapshot: it is computed once from the
/// prices at construction and never re-derived, even though the lines keep
/// pointing at live catalog products.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    lines: Vec<OrderLine>,
    total_amount: f64,
    processed_at: DateTime<Utc>,
}

impl Order {
    /// Build an order from aggregated `(product, quantity)` pairs, in the
    /// order they should be listed.
    pub fn new(
        id: impl Into<OrderId>,
        lines: impl IntoIterator<Item = (ProductView, i64)>,
        processed_at: DateTime<Utc>,
    ) -> Self {
        let lines: Vec<OrderLine> = lines
            .into_iter()
            .map(|(product, quantity)| {
                let unit_price = product.price();
                OrderLine {
                    product,
                    quantity,
                    unit_price,
                }
            })
            .collect();
        let total_amount = lines
            .iter()
            .map(OrderLine::line_total)
            .fold(0.0, |acc, v| acc + v);

        Self {
            id: id.into(),
            lines,
            total_amount,
            processed_at,
        }
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }

    /// Quantity ordered for a product id, if it is on the order.
    pub fn quantity_of(&self, product_id: &str) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.product_id().as_str() == product_id)
            .map(OrderLine::quantity)
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            order_id: self.id.clone(),
            lines: self
                .lines
                .iter()
                .map(|line| {
                    let product = line.product.read();
                    OrderLineSummary {
                        product_id: product.id_typed().clone(),
                        name: product.name().to_string(),
                        quantity: line.quantity,
                        unit_price: line.unit_price,
                        line_total: line.line_total(),
                    }
                })
                .collect(),
            total_amount: self.total_amount,
            processed_at: self.processed_at,
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Serializable, detached description of an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineSummary {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Serializable, detached description of an order (used for reporting).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub lines: Vec<OrderLineSummary>,
    pub total_amount: f64,
    pub processed_at: DateTime<Utc>,
}
