//! In-memory [`CatalogStore`] used for local runs and tests.
//!
//! Enforces the same unique and foreign-key constraints as the database
//! schema. Batches are applied to a scratch copy of the tables which
//! replaces the live tables only when every write succeeded.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{Address, Category, CategoryLine, Entity, EntityKind, Product, Supplier};
use crate::store::{BatchFailure, CatalogStore, Repository, StoreError, Write};

#[derive(Debug, Default, Clone)]
struct Tables {
    addresses: Vec<Address>,
    categories: Vec<Category>,
    category_lines: Vec<CategoryLine>,
    suppliers: Vec<Supplier>,
    products: Vec<Product>,
}

/// Typed access to the table holding `E`.
trait Table<E> {
    fn rows(&self) -> &Vec<E>;
    fn rows_mut(&mut self) -> &mut Vec<E>;
}

macro_rules! table {
    ($entity:ty, $field:ident) => {
        impl Table<$entity> for Tables {
            fn rows(&self) -> &Vec<$entity> {
                &self.$field
            }
            fn rows_mut(&mut self) -> &mut Vec<$entity> {
                &mut self.$field
            }
        }
    };
}

table!(Address, addresses);
table!(Category, categories);
table!(CategoryLine, category_lines);
table!(Supplier, suppliers);
table!(Product, products);

impl Tables {
    fn contains(&self, kind: EntityKind, id: &str) -> bool {
        fn has<E: Entity>(rows: &[E], id: &str) -> bool {
            rows.iter().any(|row| row.id() == id)
        }
        match kind {
            EntityKind::Address => has(&self.addresses, id),
            EntityKind::Category => has(&self.categories, id),
            EntityKind::CategoryLine => has(&self.category_lines, id),
            EntityKind::Supplier => has(&self.suppliers, id),
            EntityKind::Product => has(&self.products, id),
        }
    }

    fn check<E: Entity>(&self, entity: &E) -> Result<(), StoreError>
    where
        Self: Table<E>,
    {
        if let Some(value) = entity.unique_value() {
            let taken = self
                .rows()
                .iter()
                .any(|row| row.id() != entity.id() && row.unique_value() == Some(value));
            if taken {
                return Err(StoreError::Conflict(format!(
                    "{} with value {value:?} already exists",
                    E::KIND
                )));
            }
        }
        for key in entity.foreign_keys() {
            if !self.contains(key.target, key.id) {
                return Err(StoreError::Conflict(format!(
                    "{} references unknown {} {}",
                    E::KIND,
                    key.target,
                    key.id
                )));
            }
        }
        Ok(())
    }

    fn insert<E: Entity>(&mut self, entity: E) -> Result<(), StoreError>
    where
        Self: Table<E>,
    {
        if self.rows().iter().any(|row| row.id() == entity.id()) {
            return Err(StoreError::Conflict(format!(
                "{} {} already exists",
                E::KIND,
                entity.id()
            )));
        }
        self.check(&entity)?;
        self.rows_mut().push(entity);
        Ok(())
    }

    fn update<E: Entity>(&mut self, entity: E) -> Result<bool, StoreError>
    where
        Self: Table<E>,
    {
        let Some(position) = self.rows().iter().position(|row| row.id() == entity.id()) else {
            return Ok(false);
        };
        self.check(&entity)?;
        self.rows_mut()[position] = entity;
        Ok(true)
    }

    fn apply<E: Entity>(&mut self, write: Write<E>) -> Result<E, StoreError>
    where
        Self: Table<E>,
    {
        match write {
            Write::Insert(entity) => {
                self.insert(entity.clone())?;
                Ok(entity)
            }
            Write::Update(entity) => {
                if self.update(entity.clone())? {
                    Ok(entity)
                } else {
                    Err(StoreError::Conflict(format!(
                        "{} {} does not exist",
                        E::KIND,
                        entity.id()
                    )))
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! repository {
    ($entity:ty) => {
        #[async_trait]
        impl Repository<$entity> for MemoryStore {
            async fn insert(&self, entity: &$entity) -> Result<$entity, StoreError> {
                self.tables.write().await.insert(entity.clone())?;
                Ok(entity.clone())
            }

            async fn update(&self, entity: &$entity) -> Result<Option<$entity>, StoreError> {
                let found = self.tables.write().await.update(entity.clone())?;
                Ok(found.then(|| entity.clone()))
            }

            async fn find_by_id(&self, id: &str) -> Result<Option<$entity>, StoreError> {
                let tables = self.tables.read().await;
                let rows: &Vec<$entity> = tables.rows();
                Ok(rows.iter().find(|row| row.id() == id).cloned())
            }

            async fn list(&self) -> Result<Vec<$entity>, StoreError> {
                let tables = self.tables.read().await;
                let rows: &Vec<$entity> = tables.rows();
                Ok(rows.clone())
            }

            async fn apply_batch(
                &self,
                writes: Vec<Write<$entity>>,
            ) -> Result<Vec<$entity>, BatchFailure> {
                let mut tables = self.tables.write().await;
                let mut scratch = tables.clone();
                let mut written = Vec::with_capacity(writes.len());
                for (index, write) in writes.into_iter().enumerate() {
                    let entity = scratch
                        .apply(write)
                        .map_err(|error| BatchFailure { index, error })?;
                    written.push(entity);
                }
                *tables = scratch;
                Ok(written)
            }
        }
    };
}

repository!(Address);
repository!(Category);
repository!(CategoryLine);
repository!(Supplier);
repository!(Product);

#[async_trait]
impl CatalogStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
