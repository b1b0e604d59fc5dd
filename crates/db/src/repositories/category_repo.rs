//! Repository for the `categories` table.

use catalog_core::entities::Category;
use sqlx::PgExecutor;

use crate::models::category::CategoryRow;

/// Column list for `categories` queries.
const COLUMNS: &str = "id, active, name, profit_percentage, on_create, on_update";

pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        category: &Category,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(&category.meta.id)
            .bind(category.meta.active)
            .bind(&category.name)
            .bind(category.profit_percentage)
            .bind(category.meta.on_create)
            .bind(category.meta.on_update)
            .fetch_one(executor)
            .await
            .map(Category::from)
    }

    /// Replace every writable column. Returns `None` if the id is unknown.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        category: &Category,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                active = $2, name = $3, profit_percentage = $4, on_update = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(&category.meta.id)
            .bind(category.meta.active)
            .bind(&category.name)
            .bind(category.profit_percentage)
            .bind(category.meta.on_update)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Category::from))
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(Category::from))
    }

    /// List all categories, oldest first.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY on_create, id");
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}
