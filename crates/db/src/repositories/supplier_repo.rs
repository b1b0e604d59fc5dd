//! Repository for the `suppliers` table.

use catalog_core::entities::Supplier;
use sqlx::PgExecutor;

use crate::models::supplier::SupplierRow;

/// Column list for `suppliers` queries.
const COLUMNS: &str = "\
    id, active, company_name, cnpj, trading_name, phone, email, \
    address_id, category_id, on_create, on_update";

pub struct SupplierRepo;

impl SupplierRepo {
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        supplier: &Supplier,
    ) -> Result<Supplier, sqlx::Error> {
        let query = format!(
            "INSERT INTO suppliers ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupplierRow>(&query)
            .bind(&supplier.meta.id)
            .bind(supplier.meta.active)
            .bind(&supplier.company_name)
            .bind(&supplier.cnpj)
            .bind(&supplier.trading_name)
            .bind(&supplier.phone)
            .bind(&supplier.email)
            .bind(&supplier.address_id)
            .bind(&supplier.category_id)
            .bind(supplier.meta.on_create)
            .bind(supplier.meta.on_update)
            .fetch_one(executor)
            .await
            .map(Supplier::from)
    }

    /// Replace every writable column. Returns `None` if the id is unknown.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        supplier: &Supplier,
    ) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!(
            "UPDATE suppliers SET \
                active = $2, company_name = $3, cnpj = $4, trading_name = $5, \
                phone = $6, email = $7, address_id = $8, category_id = $9, \
                on_update = $10 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupplierRow>(&query)
            .bind(&supplier.meta.id)
            .bind(supplier.meta.active)
            .bind(&supplier.company_name)
            .bind(&supplier.cnpj)
            .bind(&supplier.trading_name)
            .bind(&supplier.phone)
            .bind(&supplier.email)
            .bind(&supplier.address_id)
            .bind(&supplier.category_id)
            .bind(supplier.meta.on_update)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Supplier::from))
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
    ) -> Result<Option<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers WHERE id = $1");
        sqlx::query_as::<_, SupplierRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Supplier::from))
    }

    /// List all suppliers, oldest first.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers ORDER BY on_create, id");
        let rows = sqlx::query_as::<_, SupplierRow>(&query)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Supplier::from).collect())
    }
}
