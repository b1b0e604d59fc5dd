use catalog_core::entities::{Meta, Supplier};
use catalog_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `suppliers` table.
#[derive(Debug, Clone, FromRow)]
pub struct SupplierRow {
    pub id: String,
    pub active: bool,
    pub company_name: String,
    pub cnpj: String,
    pub trading_name: String,
    pub phone: String,
    pub email: String,
    pub address_id: String,
    pub category_id: String,
    pub on_create: Timestamp,
    pub on_update: Timestamp,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            meta: Meta {
                id: row.id,
                active: row.active,
                on_create: row.on_create,
                on_update: row.on_update,
            },
            company_name: row.company_name,
            cnpj: row.cnpj,
            trading_name: row.trading_name,
            phone: row.phone,
            email: row.email,
            address_id: row.address_id,
            category_id: row.category_id,
        }
    }
}
