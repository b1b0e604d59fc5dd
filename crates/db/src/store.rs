//! PostgreSQL implementation of the catalog store.

use async_trait::async_trait;
use catalog_core::entities::{Address, Category, CategoryLine, Product, Supplier};
use catalog_core::store::{BatchFailure, CatalogStore, Repository, StoreError, Write};

use crate::repositories::{AddressRepo, CategoryLineRepo, CategoryRepo, ProductRepo, SupplierRepo};
use crate::DbPool;

/// PostgreSQL error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL error code for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Classify a sqlx error as a constraint conflict or a backend failure.
pub fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        if matches!(code.as_deref(), Some(UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION)) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            tracing::debug!(constraint, "Write rejected by constraint");
            return StoreError::Conflict(constraint.to_string());
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}

/// A [`CatalogStore`] backed by a connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

macro_rules! pg_repository {
    ($entity:ty, $repo:ty) => {
        #[async_trait]
        impl Repository<$entity> for PgStore {
            async fn insert(&self, entity: &$entity) -> Result<$entity, StoreError> {
                <$repo>::insert(&self.pool, entity)
                    .await
                    .map_err(classify_sqlx_error)
            }

            async fn update(&self, entity: &$entity) -> Result<Option<$entity>, StoreError> {
                <$repo>::update(&self.pool, entity)
                    .await
                    .map_err(classify_sqlx_error)
            }

            async fn find_by_id(&self, id: &str) -> Result<Option<$entity>, StoreError> {
                <$repo>::find_by_id(&self.pool, id)
                    .await
                    .map_err(classify_sqlx_error)
            }

            async fn list(&self) -> Result<Vec<$entity>, StoreError> {
                <$repo>::list(&self.pool).await.map_err(classify_sqlx_error)
            }

            /// Runs every write in one transaction; the first failure rolls
            /// the whole batch back.
            async fn apply_batch(
                &self,
                writes: Vec<Write<$entity>>,
            ) -> Result<Vec<$entity>, BatchFailure> {
                let fail = |index: usize| move |error: sqlx::Error| BatchFailure {
                    index,
                    error: classify_sqlx_error(error),
                };

                let mut tx = self.pool.begin().await.map_err(fail(0))?;
                let mut written = Vec::with_capacity(writes.len());
                for (index, write) in writes.iter().enumerate() {
                    let entity = match write {
                        Write::Insert(entity) => <$repo>::insert(&mut *tx, entity)
                            .await
                            .map_err(fail(index))?,
                        Write::Update(entity) => <$repo>::update(&mut *tx, entity)
                            .await
                            .map_err(fail(index))?
                            .ok_or_else(|| BatchFailure {
                                index,
                                error: StoreError::Conflict(format!(
                                    "no row with id {}",
                                    entity.meta.id
                                )),
                            })?,
                    };
                    written.push(entity);
                }
                tx.commit()
                    .await
                    .map_err(fail(writes.len().saturating_sub(1)))?;
                tracing::debug!(count = written.len(), "Batch committed");
                Ok(written)
            }
        }
    };
}

pg_repository!(Address, AddressRepo);
pg_repository!(Category, CategoryRepo);
pg_repository!(CategoryLine, CategoryLineRepo);
pg_repository!(Supplier, SupplierRepo);
pg_repository!(Product, ProductRepo);

#[async_trait]
impl CatalogStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }
}
