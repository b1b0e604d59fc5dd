use catalog_core::entities::{CategoryLine, Meta};
use catalog_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `category_lines` table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryLineRow {
    pub id: String,
    pub active: bool,
    pub category_line: String,
    pub category_id: String,
    pub profit_percentage: f64,
    pub on_create: Timestamp,
    pub on_update: Timestamp,
}

impl From<CategoryLineRow> for CategoryLine {
    fn from(row: CategoryLineRow) -> Self {
        Self {
            meta: Meta {
                id: row.id,
                active: row.active,
                on_create: row.on_create,
                on_update: row.on_update,
            },
            category_line: row.category_line,
            category_id: row.category_id,
            profit_percentage: row.profit_percentage,
        }
    }
}
