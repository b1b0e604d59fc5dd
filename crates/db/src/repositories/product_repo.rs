//! Repository for the `products` table.

use catalog_core::entities::Product;
use sqlx::PgExecutor;

use crate::models::product::ProductRow;

/// Column list for `products` queries.
const COLUMNS: &str = "\
    id, active, name, cost_values, unit_box, weight_unit, validity, sku, \
    description, category_line_id, supplier_id, on_create, on_update";

pub struct ProductRepo;

impl ProductRepo {
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        product: &Product,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(&product.meta.id)
            .bind(product.meta.active)
            .bind(&product.name)
            .bind(product.cost_values)
            .bind(product.unit_box)
            .bind(product.weight_unit)
            .bind(product.validity)
            .bind(&product.sku)
            .bind(&product.description)
            .bind(&product.category_line_id)
            .bind(&product.supplier_id)
            .bind(product.meta.on_create)
            .bind(product.meta.on_update)
            .fetch_one(executor)
            .await
            .map(Product::from)
    }

    /// Replace every writable column. Returns `None` if the id is unknown.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        product: &Product,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                active = $2, name = $3, cost_values = $4, unit_box = $5, \
                weight_unit = $6, validity = $7, sku = $8, description = $9, \
                category_line_id = $10, supplier_id = $11, on_update = $12 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(&product.meta.id)
            .bind(product.meta.active)
            .bind(&product.name)
            .bind(product.cost_values)
            .bind(product.unit_box)
            .bind(product.weight_unit)
            .bind(product.validity)
            .bind(&product.sku)
            .bind(&product.description)
            .bind(&product.category_line_id)
            .bind(&product.supplier_id)
            .bind(product.meta.on_update)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Product::from))
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Product::from))
    }

    /// List all products, oldest first.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY on_create, id");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
