use catalog_core::entities::{Meta, Product};
use catalog_core::types::Timestamp;
use chrono::NaiveDate;
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: String,
    pub active: bool,
    pub name: String,
    pub cost_values: f64,
    pub unit_box: i64,
    pub weight_unit: f64,
    pub validity: NaiveDate,
    pub sku: String,
    pub description: Option<String>,
    pub category_line_id: String,
    pub supplier_id: String,
    pub on_create: Timestamp,
    pub on_update: Timestamp,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            meta: Meta {
                id: row.id,
                active: row.active,
                on_create: row.on_create,
                on_update: row.on_update,
            },
            name: row.name,
            cost_values: row.cost_values,
            unit_box: row.unit_box,
            weight_unit: row.weight_unit,
            validity: row.validity,
            sku: row.sku,
            description: row.description,
            category_line_id: row.category_line_id,
            supplier_id: row.supplier_id,
        }
    }
}
