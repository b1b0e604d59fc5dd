use catalog_core::entities::{Address, Meta};
use catalog_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `addresses` table.
#[derive(Debug, Clone, FromRow)]
pub struct AddressRow {
    pub id: String,
    pub active: bool,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub zip_code: String,
    pub city: String,
    pub state: String,
    pub on_create: Timestamp,
    pub on_update: Timestamp,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            meta: Meta {
                id: row.id,
                active: row.active,
                on_create: row.on_create,
                on_update: row.on_update,
            },
            street: row.street,
            number: row.number,
            complement: row.complement,
            zip_code: row.zip_code,
            city: row.city,
            state: row.state,
        }
    }
}
