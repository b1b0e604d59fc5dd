//! Persistence contract shared by the PostgreSQL and in-memory stores.

use async_trait::async_trait;

use crate::entities::{Address, Category, CategoryLine, Entity, Product, Supplier};

/// Failures a store can report.
///
/// `Conflict` covers every unique or foreign-key violation; callers map it
/// to the entity's fixed conflict error without inspecting it further.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Constraint violation: {0}")]
    Conflict(String),

    #[error("Store failure: {0}")]
    Backend(String),
}

/// One write of an atomic batch.
#[derive(Debug, Clone)]
pub enum Write<E> {
    Insert(E),
    Update(E),
}

impl<E> Write<E> {
    pub fn entity(&self) -> &E {
        match self {
            Self::Insert(entity) | Self::Update(entity) => entity,
        }
    }
}

/// A failed batch: the position of the write that failed and why.
#[derive(Debug, thiserror::Error)]
#[error("write {index} of batch failed: {error}")]
pub struct BatchFailure {
    pub index: usize,
    #[source]
    pub error: StoreError,
}

/// Storage for one entity table.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Persist a new entity and return it as stored.
    async fn insert(&self, entity: &E) -> Result<E, StoreError>;

    /// Replace a persisted entity and return it as stored. Returns `None`
    /// when its id is unknown.
    async fn update(&self, entity: &E) -> Result<Option<E>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<E>, StoreError>;

    /// Every entity, oldest first.
    async fn list(&self) -> Result<Vec<E>, StoreError>;

    /// Apply every write or none of them.
    async fn apply_batch(&self, writes: Vec<Write<E>>) -> Result<Vec<E>, BatchFailure>;
}

/// The complete catalog store.
#[async_trait]
pub trait CatalogStore:
    Repository<Address>
    + Repository<Category>
    + Repository<CategoryLine>
    + Repository<Supplier>
    + Repository<Product>
{
    /// Human-readable backend name for health reporting.
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), StoreError>;
}
