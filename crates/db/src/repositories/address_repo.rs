//! Repository for the `addresses` table.

use catalog_core::entities::Address;
use sqlx::PgExecutor;

use crate::models::address::AddressRow;

/// Column list for `addresses` queries.
const COLUMNS: &str = "\
    id, active, street, number, complement, zip_code, city, state, \
    on_create, on_update";

pub struct AddressRepo;

impl AddressRepo {
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        address: &Address,
    ) -> Result<Address, sqlx::Error> {
        let query = format!(
            "INSERT INTO addresses ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AddressRow>(&query)
            .bind(&address.meta.id)
            .bind(address.meta.active)
            .bind(&address.street)
            .bind(&address.number)
            .bind(&address.complement)
            .bind(&address.zip_code)
            .bind(&address.city)
            .bind(&address.state)
            .bind(address.meta.on_create)
            .bind(address.meta.on_update)
            .fetch_one(executor)
            .await
            .map(Address::from)
    }

    /// Replace every writable column. Returns `None` if the id is unknown.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        address: &Address,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!(
            "UPDATE addresses SET \
                active = $2, street = $3, number = $4, complement = $5, \
                zip_code = $6, city = $7, state = $8, on_update = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AddressRow>(&query)
            .bind(&address.meta.id)
            .bind(address.meta.active)
            .bind(&address.street)
            .bind(&address.number)
            .bind(&address.complement)
            .bind(&address.zip_code)
            .bind(&address.city)
            .bind(&address.state)
            .bind(address.meta.on_update)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Address::from))
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE id = $1");
        sqlx::query_as::<_, AddressRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Address::from))
    }

    /// List all addresses, oldest first.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses ORDER BY on_create, id");
        let rows = sqlx::query_as::<_, AddressRow>(&query)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Address::from).collect())
    }
}
