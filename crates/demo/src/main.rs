use anyhow::Context;

use stockwise_catalog::{
    CatalogConfig, CatalogManager, Product, ProductStatus, SequentialOrderNumbers, StockAdjustment,
    UuidOrderNumbers,
};

fn main() -> anyhow::Result<()> {
    stockwise_observability::tracing::init(stockwise_observability::LogFormat::from_env());

    let mut catalog = CatalogManager::new().with_config(CatalogConfig::from_env());
    tracing::info!(
        missing_product_policy = %catalog.config().missing_product_policy,
        "starting catalog demo"
    );

    catalog.add_product(Product::new("KB-01", 49.9, "peripherals").with_name("Keyboard").with_stock(25));
    catalog.add_product(Product::new("MS-01", 19.5, "peripherals").with_name("Mouse").with_stock(40));
    catalog.add_product(Product::new("MN-27", 229.0, "displays").with_name("27\" Monitor").with_stock(8));
    catalog.add_product(
        Product::new("MN-19", 99.0, "displays")
            .with_name("19\" Monitor")
            .with_status(ProductStatus::Inactive),
    );

    catalog.register_order_number_supplier("web", SequentialOrderNumbers::new("WEB"));
    catalog.register_order_number_supplier("uuid", UuidOrderNumbers);

    for product in catalog.active_products_sorted_by_price() {
        let product = product.read();
        tracing::info!(
            product_id = %product.id_typed(),
            name = product.name(),
            price = product.price(),
            "active product"
        );
    }

    tracing::info!(
        average = catalog.average_price_in_category("displays"),
        "average display price"
    );
    tracing::info!(
        inventory_value = catalog.calculate_total_value(|p| p.price() * p.stock_quantity() as f64),
        "total inventory value"
    );

    let order_id = catalog
        .require_order_number("web")
        .context("order-number supplier 'web' is not registered")?;
    let total = catalog
        .process_order(
            order_id,
            [("KB-01", 2), ("MS-01", 2), ("XX-00", 1)],
            StockAdjustment::Decrement,
        )
        .context("failed to process web order")?
        .total_amount();
    tracing::info!(total, "web order total");

    let receipt = catalog.update_stock("MN-27", 10, StockAdjustment::Increment);
    tracing::info!(updated = receipt.is_updated(), "goods received");

    for (category, sum) in catalog.category_price_sum() {
        tracing::info!(category = %category, sum, "category price sum");
    }

    tracing::info!(orders = catalog.order_count(), "demo finished");
    Ok(())
}
