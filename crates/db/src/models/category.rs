use catalog_core::entities::{Category, Meta};
use catalog_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: String,
    pub active: bool,
    pub name: String,
    pub profit_percentage: f64,
    pub on_create: Timestamp,
    pub on_update: Timestamp,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            meta: Meta {
                id: row.id,
                active: row.active,
                on_create: row.on_create,
                on_update: row.on_update,
            },
            name: row.name,
            profit_percentage: row.profit_percentage,
        }
    }
}
