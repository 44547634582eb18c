//! Reporting channel for catalog outcomes.
//!
//! The manager never prints. Stock-update outcomes and processed orders are
//! handed to a [`CatalogReporter`] chosen by the embedder.

use std::sync::Arc;

use stockwise_orders::Order;
use stockwise_products::Product;

/// Receives human-facing status from the catalog.
pub trait CatalogReporter {
    /// A stock policy ran against `product` (state shown is after the update).
    fn stock_updated(&self, product: &Product, quantity: i64);

    /// A stock update targeted an id that is not in the catalog.
    fn product_not_found(&self, product_id: &str);

    /// An order was built and appended to the history.
    fn order_processed(&self, order: &Order);
}

impl<R> CatalogReporter for Arc<R>
where
    R: CatalogReporter + ?Sized,
{
    fn stock_updated(&self, product: &Product, quantity: i64) {
        (**self).stock_updated(product, quantity)
    }

    fn product_not_found(&self, product_id: &str) {
        (**self).product_not_found(product_id)
    }

    fn order_processed(&self, order: &Order) {
        (**self).order_processed(order)
    }
}

/// Default reporter: structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CatalogReporter for TracingReporter {
    fn stock_updated(&self, product: &Product, quantity: i64) {
        tracing::info!(
            product_id = %product.id_typed(),
            quantity,
            stock_quantity = product.stock_quantity(),
            "stock updated successfully"
        );
    }

    fn product_not_found(&self, product_id: &str) {
        tracing::warn!(product_id, "stock update skipped: product not found");
    }

    fn order_processed(&self, order: &Order) {
        let summary = order.summary();
        let lines = serde_json::to_string(&summary.lines).unwrap_or_default();
        tracing::info!(
            order_id = %summary.order_id,
            line_count = summary.lines.len(),
            lines = %lines,
            total_amount = summary.total_amount,
            processed_at = %order.processed_at(),
            "order processed successfully"
        );
    }
}

/// Reporter that discards everything (headless embedding, benchmarks).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl CatalogReporter for NullReporter {
    fn stock_updated(&self, _product: &Product, _quantity: i64) {}

    fn product_not_found(&self, _product_id: &str) {}

    fn order_processed(&self, _order: &Order) {}
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use stockwise_products::SharedProduct;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    #[test]
    fn order_processed_logs_id_lines_and_total() {
        let product = SharedProduct::new(Product::new("KB-01", 10.0, "x").with_name("Keyboard"));
        let order = Order::new("ORD-1", [(product.view(), 2)], Utc::now());

        let logs = capture(|| TracingReporter.order_processed(&order));

        assert!(logs.contains("order processed successfully"));
        assert!(logs.contains(r#""order_id":"ORD-1""#));
        assert!(logs.contains(r#""line_count":1"#));
        assert!(logs.contains("KB-01"));
        assert!(logs.contains("Keyboard"));
        assert!(logs.contains(r#""total_amount":20.0"#));
    }

    #[test]
    fn stock_outcomes_are_logged() {
        let product = Product::new("KB-01", 10.0, "x").with_stock(7);

        let logs = capture(|| {
            TracingReporter.stock_updated(&product, 3);
            TracingReporter.product_not_found("ghost");
        });

        assert!(logs.contains("stock updated successfully"));
        assert!(logs.contains(r#""stock_quantity":7"#));
        assert!(logs.contains("product not found"));
        assert!(logs.contains("ghost"));
    }

    #[test]
    fn null_reporter_emits_nothing() {
        let product = SharedProduct::new(Product::new("KB-01", 10.0, "x"));
        let order = Order::new("ORD-1", [(product.view(), 1)], Utc::now());

        let logs = capture(|| {
            NullReporter.stock_updated(&product.view().snapshot(), 1);
            NullReporter.order_processed(&order);
        });

        assert!(logs.is_empty());
    }
}
