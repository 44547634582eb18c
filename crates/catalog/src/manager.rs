use std::collections::HashMap;

use chrono::Utc;

use stockwise_core::{CatalogError, CatalogResult, OrderId, ProductId, SupplierId};
use stockwise_inventory::StockUpdatePolicy;
use stockwise_orders::{Order, OrderNumberSupplier};
use stockwise_products::{Product, ProductView, SharedProduct};

use crate::config::{CatalogConfig, MissingProductPolicy};
use crate::reporter::{CatalogReporter, TracingReporter};

/// Result of a single stock update.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockUpdateOutcome {
    Updated,
    ProductNotFound,
}

impl StockUpdateOutcome {
    pub fn is_updated(self) -> bool {
        self == StockUpdateOutcome::Updated
    }
}

type BoxedSupplier = Box<dyn OrderNumberSupplier + Send>;

/// In-memory catalog: products, order-number suppliers and order history.
///
/// - Products are keyed by id; adding an existing id replaces the entry.
/// - The catalog is the only writer of product state. Callers and processed
///   orders get read-only [`ProductView`]s onto the same instances.
/// - Order history is append-only.
///
/// Mutating operations take `&mut self`; wrap the manager in a lock to share
/// it between threads.
pub struct CatalogManager<R = TracingReporter> {
    products: HashMap<ProductId, SharedProduct>,
    suppliers: HashMap<SupplierId, BoxedSupplier>,
    orders: Vec<Order>,
    reporter: R,
    config: CatalogConfig,
}

impl CatalogManager<TracingReporter> {
    pub fn new() -> Self {
        Self::with_reporter(TracingReporter)
    }
}

impl Default for CatalogManager<TracingReporter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CatalogReporter> CatalogManager<R> {
    pub fn with_reporter(reporter: R) -> Self {
        Self {
            products: HashMap::new(),
            suppliers: HashMap::new(),
            orders: Vec::new(),
            reporter,
            config: CatalogConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Insert a product, replacing any product with the same id.
    ///
    /// Returns a view of the replaced instance. Orders that already reference
    /// it keep pointing at the old instance.
    pub fn add_product(&mut self, product: Product) -> Option<ProductView> {
        let id = product.id_typed().clone();
        let previous = self.products.insert(id.clone(), SharedProduct::new(product));
        if previous.is_some() {
            tracing::debug!(product_id = %id, "product replaced");
        }
        previous.map(|p| p.view())
    }

    pub fn get_product_by_id(&self, product_id: &str) -> Option<ProductView> {
        self.products.get(product_id).map(SharedProduct::view)
    }

    pub fn contains_product(&self, product_id: &str) -> bool {
        self.products.contains_key(product_id)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// All products, in store iteration order.
    pub fn products(&self) -> Vec<ProductView> {
        self.products.values().map(SharedProduct::view).collect()
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Products matching `predicate`, in store iteration order (unspecified).
    pub fn filter_products<F>(&self, predicate: F) -> Vec<ProductView>
    where
        F: Fn(&Product) -> bool,
    {
        self.products
            .values()
            .filter(|p| predicate(&*p.read()))
            .map(SharedProduct::view)
            .collect()
    }

    /// Active products, cheapest first. Equal prices keep iteration order.
    pub fn active_products_sorted_by_price(&self) -> Vec<ProductView> {
        let mut active = self.filter_products(Product::is_active);
        active.sort_by(|a, b| a.price().total_cmp(&b.price()));
        active
    }

    /// Mean price over products in `category` (exact match), `0.0` when none match.
    pub fn average_price_in_category(&self, category: &str) -> f64 {
        let (sum, count) = self
            .products
            .values()
            .map(|p| p.read())
            .filter(|p| p.category() == category)
            .fold((0.0_f64, 0_usize), |(sum, count), p| (sum + p.price(), count + 1));

        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Sum of prices per category.
    pub fn category_price_sum(&self) -> HashMap<String, f64> {
        let mut sums: HashMap<String, f64> = HashMap::new();
        for product in self.products.values() {
            let product = product.read();
            *sums.entry(product.category().to_string()).or_insert(0.0) += product.price();
        }
        sums
    }

    /// Sum of `value_fn` over every product.
    pub fn calculate_total_value<F>(&self, value_fn: F) -> f64
    where
        F: Fn(&Product) -> f64,
    {
        self.products
            .values()
            .map(|p| value_fn(&*p.read()))
            .fold(0.0, |acc, v| acc + v)
    }

    // ---------------------------------------------------------------------
    // Stock
    // ---------------------------------------------------------------------

    /// Run `policy` against the product, if it exists.
    ///
    /// A missing product is reported and returned as
    /// [`StockUpdateOutcome::ProductNotFound`]; it is never an error.
    pub fn update_stock<P>(&mut self, product_id: &str, quantity: i64, mut policy: P) -> StockUpdateOutcome
    where
        P: StockUpdatePolicy,
    {
        match self.apply_stock_policy(product_id, quantity, &mut policy) {
            Some(_) => StockUpdateOutcome::Updated,
            None => {
                self.reporter.product_not_found(product_id);
                StockUpdateOutcome::ProductNotFound
            }
        }
    }

    /// Run `policy` under the product's write lock and report the update.
    /// Returns a view of the updated product, `None` if the id is unknown.
    fn apply_stock_policy<P>(&self, product_id: &str, quantity: i64, policy: &mut P) -> Option<ProductView>
    where
        P: StockUpdatePolicy + ?Sized,
    {
        let product = self.products.get(product_id)?;

        let mut guard = product.write();
        policy.apply(&mut *guard, quantity);
        self.reporter.stock_updated(&*guard, quantity);
        Some(product.view())
    }

    // ---------------------------------------------------------------------
    // Order numbers
    // ---------------------------------------------------------------------

    /// Register `supplier` under `supplier_id`, replacing any previous one.
    pub fn register_order_number_supplier<S>(&mut self, supplier_id: impl Into<SupplierId>, supplier: S)
    where
        S: OrderNumberSupplier + Send + 'static,
    {
        let supplier_id = supplier_id.into();
        if self.suppliers.insert(supplier_id.clone(), Box::new(supplier)).is_some() {
            tracing::debug!(supplier_id = %supplier_id, "order-number supplier replaced");
        }
    }

    pub fn has_order_number_supplier(&self, supplier_id: &str) -> bool {
        self.suppliers.contains_key(supplier_id)
    }

    /// Next order number from the named supplier, or `None` if none is registered.
    ///
    /// Every call invokes the supplier.
    pub fn generate_order_number(&mut self, supplier_id: &str) -> Option<String> {
        match self.suppliers.get_mut(supplier_id) {
            Some(supplier) => Some(supplier.next_order_number()),
            None => {
                tracing::debug!(supplier_id, "order-number supplier not found");
                None
            }
        }
    }

    /// Like [`CatalogManager::generate_order_number`], failing with
    /// [`CatalogError::SupplierNotFound`].
    pub fn require_order_number(&mut self, supplier_id: &str) -> CatalogResult<String> {
        self.generate_order_number(supplier_id)
            .ok_or_else(|| CatalogError::supplier_not_found(supplier_id))
    }

    // ---------------------------------------------------------------------
    // Orders
    // ---------------------------------------------------------------------

    /// Process an order using the configured [`MissingProductPolicy`].
    pub fn process_order<I, K, P>(
        &mut self,
        order_id: impl Into<OrderId>,
        items: I,
        policy: P,
    ) -> CatalogResult<&Order>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<ProductId>,
        P: StockUpdatePolicy,
    {
        let missing = self.config.missing_product_policy;
        self.process_order_with(order_id, items, policy, missing)
    }

    /// Process an order.
    ///
    /// For each `(product id, quantity)` in iteration order the stock policy
    /// runs against the product and the quantity is added to that product's
    /// line (repeated ids aggregate into one line). The resulting order is
    /// appended to the history and reported.
    ///
    /// Unknown ids are dropped under [`MissingProductPolicy::Skip`]; an order
    /// with no surviving lines is still recorded. Under
    /// [`MissingProductPolicy::Abort`] every id is checked first and the call
    /// fails without touching stock or history.
    pub fn process_order_with<I, K, P>(
        &mut self,
        order_id: impl Into<OrderId>,
        items: I,
        mut policy: P,
        missing: MissingProductPolicy,
    ) -> CatalogResult<&Order>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<ProductId>,
        P: StockUpdatePolicy,
    {
        let order_id = order_id.into();
        let items: Vec<(ProductId, i64)> = items
            .into_iter()
            .map(|(id, quantity)| (id.into(), quantity))
            .collect();

        if missing == MissingProductPolicy::Abort {
            if let Some((product_id, _)) = items.iter().find(|(id, _)| !self.contains_product(id.as_str())) {
                tracing::warn!(
                    order_id = %order_id,
                    product_id = %product_id,
                    "order rejected: product not found"
                );
                return Err(CatalogError::ProductNotFound(product_id.clone()));
            }
        }

        let mut lines: Vec<(ProductView, i64)> = Vec::new();
        let mut positions: HashMap<ProductId, usize> = HashMap::new();

        for (product_id, quantity) in items {
            let Some(view) = self.apply_stock_policy(product_id.as_str(), quantity, &mut policy) else {
                tracing::debug!(
                    order_id = %order_id,
                    product_id = %product_id,
                    "line item dropped: product not found"
                );
                continue;
            };

            match positions.get(&product_id) {
                Some(&index) => {
                    let line = &mut lines[index];
                    line.1 = line.1.saturating_add(quantity);
                }
                None => {
                    positions.insert(product_id, lines.len());
                    lines.push((view, quantity));
                }
            }
        }

        let index = self.orders.len();
        self.orders.push(Order::new(order_id, lines, Utc::now()));

        let order = &self.orders[index];
        self.reporter.order_processed(order);
        Ok(order)
    }

    /// Processed orders, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl<R: core::fmt::Debug> core::fmt::Debug for CatalogManager<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut suppliers: Vec<&SupplierId> = self.suppliers.keys().collect();
        suppliers.sort();
        f.debug_struct("CatalogManager")
            .field("products", &self.products.len())
            .field("suppliers", &suppliers)
            .field("orders", &self.orders.len())
            .field("reporter", &self.reporter)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use stockwise_core::Entity;
    use stockwise_inventory::StockAdjustment;
    use stockwise_products::ProductStatus;

    fn test_catalog() -> CatalogManager<NullReporter> {
        let mut catalog = CatalogManager::with_reporter(NullReporter);
        catalog.add_product(Product::new("A", 10.0, "x").with_stock(10));
        catalog.add_product(Product::new("B", 20.0, "x").with_stock(10));
        catalog.add_product(Product::new("C", 5.0, "y").with_stock(10));
        catalog
    }

    #[test]
    fn get_product_by_id_returns_none_for_unknown_id() {
        let catalog = test_catalog();
        assert!(catalog.get_product_by_id("missing").is_none());
        assert_eq!(catalog.get_product_by_id("A").unwrap().price(), 10.0);
    }

    #[test]
    fn add_product_returns_replaced_instance() {
        let mut catalog = test_catalog();
        let before = catalog.get_product_by_id("A").unwrap();

        let replaced = catalog.add_product(Product::new("A", 11.0, "x")).unwrap();

        assert!(replaced.is_same_instance(&before));
        assert_eq!(catalog.product_count(), 3);
        assert_eq!(catalog.get_product_by_id("A").unwrap().price(), 11.0);
        assert!(catalog.add_product(Product::new("D", 1.0, "z")).is_none());
    }

    #[test]
    fn active_products_are_sorted_by_price() {
        let mut catalog = test_catalog();
        catalog.add_product(Product::new("D", 1.0, "z").with_status(ProductStatus::Inactive));

        let prices: Vec<f64> = catalog
            .active_products_sorted_by_price()
            .iter()
            .map(ProductView::price)
            .collect();
        assert_eq!(prices, vec![5.0, 10.0, 20.0]);
    }

    #[test]
    fn average_price_uses_exact_category_match() {
        let catalog = test_catalog();
        assert_eq!(catalog.average_price_in_category("x"), 15.0);
        assert_eq!(catalog.average_price_in_category("X"), 0.0);
    }

    #[test]
    fn total_value_applies_value_function() {
        let catalog = test_catalog();
        assert_eq!(catalog.calculate_total_value(Product::price), 35.0);
        assert_eq!(
            catalog.calculate_total_value(|p| p.price() * p.stock_quantity() as f64),
            350.0
        );
    }

    #[test]
    fn total_value_of_empty_catalog_is_positive_zero() {
        let catalog = CatalogManager::with_reporter(NullReporter);
        let total = catalog.calculate_total_value(Product::price);
        assert_eq!(total.to_bits(), 0.0f64.to_bits());
        assert!(total.is_sign_positive());
    }

    #[test]
    fn process_order_runs_policy_once_per_present_line() {
        let mut catalog = test_catalog();
        let mut seen = Vec::new();
        let order = catalog
            .process_order(
                "O-1",
                [("A", 1), ("missing", 4), ("A", 2), ("B", 1)],
                |p: &mut Product, q: i64| {
                    seen.push((p.id().to_string(), q));
                    p.adjust_stock(-q);
                },
            )
            .unwrap();

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.quantity_of("A"), Some(3));
        assert_eq!(
            seen,
            vec![("A".to_string(), 1), ("A".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn update_stock_reports_not_found_without_side_effects() {
        let mut catalog = test_catalog();
        let outcome = catalog.update_stock("missing", 3, StockAdjustment::Increment);
        assert_eq!(outcome, StockUpdateOutcome::ProductNotFound);
        assert_eq!(catalog.calculate_total_value(|p| p.stock_quantity() as f64), 30.0);
    }

    #[test]
    fn update_stock_runs_policy_on_found_product() {
        let mut catalog = test_catalog();
        let outcome = catalog.update_stock("A", 3, StockAdjustment::Decrement);
        assert!(outcome.is_updated());
        assert_eq!(catalog.get_product_by_id("A").unwrap().stock_quantity(), 7);
    }

    #[test]
    fn process_order_aggregates_repeated_ids() {
        let mut catalog = test_catalog();
        let order = catalog
            .process_order("O-1", [("A", 2), ("B", 1), ("A", 3)], StockAdjustment::Decrement)
            .unwrap();

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.quantity_of("A"), Some(5));
        assert_eq!(order.quantity_of("B"), Some(1));
        assert_eq!(order.total_amount(), 70.0);
        assert_eq!(order.lines()[0].product_id().as_str(), "A");
        assert_eq!(catalog.get_product_by_id("A").unwrap().stock_quantity(), 5);
    }

    #[test]
    fn abort_policy_leaves_catalog_untouched() {
        let mut catalog = test_catalog();
        let err = catalog
            .process_order_with(
                "O-1",
                [("A", 2), ("missing", 1)],
                StockAdjustment::Decrement,
                MissingProductPolicy::Abort,
            )
            .unwrap_err();

        assert_eq!(err, CatalogError::product_not_found("missing"));
        assert_eq!(catalog.order_count(), 0);
        assert_eq!(catalog.get_product_by_id("A").unwrap().stock_quantity(), 10);
    }

    #[test]
    fn configured_abort_policy_applies_to_process_order() {
        let mut catalog = test_catalog()
            .with_config(CatalogConfig::default().with_missing_product_policy(MissingProductPolicy::Abort));
        assert!(catalog.process_order("O-1", [("zzz", 1)], StockAdjustment::Decrement).is_err());

        let order = catalog.process_order("O-2", [("C", 1)], StockAdjustment::Decrement).unwrap();
        assert_eq!(order.id().as_str(), "O-2");
        assert_eq!(catalog.order_count(), 1);
    }

    #[test]
    fn require_order_number_fails_for_unknown_supplier() {
        let mut catalog = test_catalog();
        assert_eq!(
            catalog.require_order_number("web"),
            Err(CatalogError::supplier_not_found("web"))
        );

        catalog.register_order_number_supplier("web", || "W-1".to_string());
        assert!(catalog.has_order_number_supplier("web"));
        assert_eq!(catalog.require_order_number("web"), Ok("W-1".to_string()));
    }

    #[test]
    fn debug_output_lists_counts() {
        let mut catalog = test_catalog();
        catalog.register_order_number_supplier("web", || "W".to_string());
        let debug = format!("{catalog:?}");
        assert!(debug.contains("products: 3"));
        assert!(debug.contains("\"web\""));
    }
}
