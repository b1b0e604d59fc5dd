//! Repository for the `category_lines` table.

use catalog_core::entities::CategoryLine;
use sqlx::PgExecutor;

use crate::models::category_line::CategoryLineRow;

/// Column list for `category_lines` queries.
const COLUMNS: &str = "\
    id, active, category_line, category_id, profit_percentage, on_create, on_update";

pub struct CategoryLineRepo;

impl CategoryLineRepo {
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        line: &CategoryLine,
    ) -> Result<CategoryLine, sqlx::Error> {
        let query = format!(
            "INSERT INTO category_lines ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryLineRow>(&query)
            .bind(&line.meta.id)
            .bind(line.meta.active)
            .bind(&line.category_line)
            .bind(&line.category_id)
            .bind(line.profit_percentage)
            .bind(line.meta.on_create)
            .bind(line.meta.on_update)
            .fetch_one(executor)
            .await
            .map(CategoryLine::from)
    }

    /// Replace every writable column. Returns `None` if the id is unknown.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        line: &CategoryLine,
    ) -> Result<Option<CategoryLine>, sqlx::Error> {
        let query = format!(
            "UPDATE category_lines SET \
                active = $2, category_line = $3, category_id = $4, \
                profit_percentage = $5, on_update = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryLineRow>(&query)
            .bind(&line.meta.id)
            .bind(line.meta.active)
            .bind(&line.category_line)
            .bind(&line.category_id)
            .bind(line.profit_percentage)
            .bind(line.meta.on_update)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(CategoryLine::from))
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &str,
    ) -> Result<Option<CategoryLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category_lines WHERE id = $1");
        sqlx::query_as::<_, CategoryLineRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map(|row| row.map(CategoryLine::from))
    }

    /// List all category lines, oldest first.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<CategoryLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category_lines ORDER BY on_create, id");
        let rows = sqlx::query_as::<_, CategoryLineRow>(&query)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(CategoryLine::from).collect())
    }
}
