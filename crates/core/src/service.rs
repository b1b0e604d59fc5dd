//! Catalog operations over any store.
//!
//! Every write goes through the entity's policy first. Store failures are
//! translated into the entity's fixed conflict error.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::entities::{
    build_new, build_updated, create_record, merge_update, Category, CategoryLine, Entity,
    PricedProduct, Product, Supplier, SupplierSummary,
};
use crate::error::CoreError;
use crate::import::{export_csv, plan_import, ImportAction, ImportStrategy};
use crate::store::{BatchFailure, Repository, StoreError};
use crate::types::{Moment, Record};

/// What a CSV import wrote.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome<E> {
    pub created: Vec<E>,
    pub updated: Vec<E>,
    pub skipped: Vec<String>,
    pub repeated: Vec<String>,
}

fn store_failure<E: Entity>(error: StoreError, record: &Record) -> CoreError {
    match error {
        StoreError::Conflict(_) => E::conflict_error(record),
        StoreError::Backend(message) => CoreError::Internal(message),
    }
}

fn backend(error: StoreError) -> CoreError {
    CoreError::Internal(error.to_string())
}

pub async fn list<E, S>(store: &S) -> Result<Vec<E>, CoreError>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    store.list().await.map_err(backend)
}

pub async fn get<E, S>(store: &S, id: &str) -> Result<E, CoreError>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    store
        .find_by_id(id)
        .await
        .map_err(backend)?
        .ok_or(CoreError::IdNotFound)
}

/// Validate a create payload and persist the new entity.
pub async fn create<E, S>(store: &S, payload: &Value) -> Result<E, CoreError>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    let record = create_record::<E>(payload)?;
    let entity = build_new::<E>(&record, Moment::now())?;
    store
        .insert(&entity)
        .await
        .map_err(|e| store_failure::<E>(e, &record))
}

/// Replace the update fields of an existing entity with `payload`.
pub async fn update<E, S>(store: &S, id: &str, payload: &Value) -> Result<E, CoreError>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    let current: E = get(store, id).await?;
    let Some(payload) = payload.as_object() else {
        return Err(CoreError::invalid_json(E::UPDATE_REQUIRED_FIELDS));
    };
    let merged = merge_update(&current, payload);
    let entity = build_updated(&current, &merged, Moment::now())?;
    match store.update(&entity).await {
        Ok(Some(stored)) => Ok(stored),
        Ok(None) => Err(CoreError::IdNotFound),
        Err(e) => Err(store_failure::<E>(e, &merged)),
    }
}

/// Reconcile parsed CSV rows against the persisted entities and write the
/// result atomically.
pub async fn import<E, S>(
    store: &S,
    rows: Vec<Record>,
    key_field: &str,
    strategy: ImportStrategy,
) -> Result<ImportOutcome<E>, CoreError>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    let existing: Vec<E> = store.list().await.map_err(backend)?;
    let plan = plan_import(rows, key_field, &existing, strategy, Moment::now())?;
    if plan.writes.is_empty() {
        return Err(CoreError::DataAlreadyExists);
    }

    let written = match store.apply_batch(plan.batch()).await {
        Ok(written) => written,
        Err(BatchFailure { index, error }) => {
            return Err(match (strategy, error) {
                (_, StoreError::Backend(message)) => CoreError::Internal(message),
                (ImportStrategy::SkipExisting, StoreError::Conflict(reason)) => {
                    match plan.writes.get(index) {
                        Some(planned) => E::import_conflict_error(&planned.record),
                        None => CoreError::Internal(reason),
                    }
                }
                (ImportStrategy::Upsert, StoreError::Conflict(_)) => CoreError::IdNotFound,
            });
        }
    };

    let mut outcome = ImportOutcome {
        created: Vec::new(),
        updated: Vec::new(),
        skipped: plan.skipped,
        repeated: plan.repeated,
    };
    for (planned, entity) in plan.writes.iter().zip(written) {
        match planned.action() {
            ImportAction::Update => outcome.updated.push(entity),
            ImportAction::Create => outcome.created.push(entity),
        }
    }
    Ok(outcome)
}

/// Every entity of the table as CSV.
pub async fn export<E, S>(store: &S, columns: &[&str]) -> Result<String, CoreError>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    let entities: Vec<E> = list(store).await?;
    export_csv(&entities, columns)
}

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

pub async fn list_supplier_summaries<S>(store: &S) -> Result<Vec<SupplierSummary>, CoreError>
where
    S: Repository<Supplier> + ?Sized,
{
    let suppliers: Vec<Supplier> = list(store).await?;
    Ok(suppliers.iter().map(SupplierSummary::from).collect())
}

/// Category and line profit percentages, keyed by category line id.
async fn markups<S>(store: &S) -> Result<HashMap<String, (f64, f64)>, CoreError>
where
    S: Repository<Category> + Repository<CategoryLine> + ?Sized,
{
    let categories: Vec<Category> = list(store).await?;
    let lines: Vec<CategoryLine> = list(store).await?;
    let category_percentages: HashMap<&str, f64> = categories
        .iter()
        .map(|category| (category.meta.id.as_str(), category.profit_percentage))
        .collect();

    let mut markups = HashMap::new();
    for line in &lines {
        if let Some(category_percentage) = category_percentages.get(line.category_id.as_str()) {
            markups.insert(
                line.meta.id.clone(),
                (*category_percentage, line.profit_percentage),
            );
        }
    }
    Ok(markups)
}

fn priced(
    product: Product,
    markups: &HashMap<String, (f64, f64)>,
) -> Result<PricedProduct, CoreError> {
    let (category, line) = markups
        .get(&product.category_line_id)
        .copied()
        .ok_or(CoreError::IdNotFound)?;
    Ok(PricedProduct::new(product, category, line))
}

pub async fn list_priced_products<S>(store: &S) -> Result<Vec<PricedProduct>, CoreError>
where
    S: Repository<Category> + Repository<CategoryLine> + Repository<Product> + ?Sized,
{
    let markups = markups(store).await?;
    let products: Vec<Product> = list(store).await?;
    products
        .into_iter()
        .map(|product| priced(product, &markups))
        .collect()
}

pub async fn get_priced_product<S>(store: &S, id: &str) -> Result<PricedProduct, CoreError>
where
    S: Repository<Category> + Repository<CategoryLine> + Repository<Product> + ?Sized,
{
    let product: Product = get(store, id).await?;
    let markups = markups(store).await?;
    priced(product, &markups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Address, Meta};
    use crate::import::{parse_products, parse_single_column};
    use crate::memory_store::MemoryStore;
    use assert_matches::assert_matches;
    use serde_json::json;

    async fn seed_category(store: &MemoryStore, name: &str, profit: f64) -> Category {
        create(store, &json!({"name": name, "profit_percentage": profit}))
            .await
            .unwrap()
    }

    /// A category, a line, an address and a supplier products can point at.
    async fn seed_product_refs(store: &MemoryStore) -> (CategoryLine, Supplier) {
        let category = seed_category(store, "dairy", 5.0).await;
        let line: CategoryLine = create(
            store,
            &json!({
                "category_line": "whole milk",
                "category_id": category.meta.id,
                "profit_percentage": 2.5,
            }),
        )
        .await
        .unwrap();
        let address: Address = create(
            store,
            &json!({
                "street": "Rua das Flores",
                "number": "120",
                "zip_code": "13000000",
                "city": "Campinas",
                "state": "SP",
            }),
        )
        .await
        .unwrap();
        let supplier: Supplier = create(
            store,
            &json!({
                "company_name": "Laticinios Serra",
                "cnpj": "12345678000190",
                "trading_name": "Serra",
                "phone": "1932324545",
                "email": "vendas@serra.com",
                "address_id": address.meta.id,
                "category_id": category.meta.id,
            }),
        )
        .await
        .unwrap();
        (line, supplier)
    }

    fn product_payload(sku: &str, name: &str, line: &CategoryLine, supplier: &Supplier) -> Value {
        json!({
            "name": name,
            "cost_values": 10.0,
            "unit_box": 12,
            "weight_unit": 1.5,
            "validity": "2099-01-01",
            "sku": sku,
            "category_line_id": line.meta.id,
            "supplier_id": supplier.meta.id,
        })
    }

    fn product_csv(rows: &[(&str, &str)], line: &CategoryLine, supplier: &Supplier) -> String {
        let mut csv = String::from(
            "name,cost_values,unit_box,weight_unit,validity,sku,description,category_line_id,supplier_id\n",
        );
        for (sku, name) in rows {
            csv.push_str(&format!(
                "{name},10.5,6,1.25,2099-01-01,{sku},,{},{}\n",
                line.meta.id, supplier.meta.id
            ));
        }
        csv
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::new();
        let created = seed_category(&store, "dairy", 5.0).await;
        let fetched: Category = get(&store, &created.meta.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        assert_matches!(
            get::<Category, _>(&store, "missing").await,
            Err(CoreError::IdNotFound)
        );
    }

    #[tokio::test]
    async fn duplicate_category_reports_value() {
        let store = MemoryStore::new();
        seed_category(&store, "dairy", 5.0).await;
        let err = create::<Category, _>(&store, &json!({"name": "dairy", "profit_percentage": 1.5}))
            .await
            .unwrap_err();
        assert_matches!(err, CoreError::DuplicateValue { ref values } if values == &["dairy"]);
    }

    #[tokio::test]
    async fn line_with_unknown_category_is_invalid_value() {
        let store = MemoryStore::new();
        let err = create::<CategoryLine, _>(
            &store,
            &json!({"category_line": "x", "category_id": "nope", "profit_percentage": 1.5}),
        )
        .await
        .unwrap_err();
        assert_matches!(err, CoreError::InvalidValue { ref fields } if fields == &["category_line"]);
    }

    #[tokio::test]
    async fn update_deactivates_and_renames() {
        let store = MemoryStore::new();
        let created = seed_category(&store, "dairy", 5.0).await;
        let updated: Category = update(
            &store,
            &created.meta.id,
            &json!({"name": "bakery", "active": false}),
        )
        .await
        .unwrap();
        assert!(!updated.meta.active);
        assert_eq!(updated.name, "bakery");
        assert!(updated.meta.on_update >= created.meta.on_update);
        let fetched: Category = get(&store, &created.meta.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_rejects_non_object_payload() {
        let store = MemoryStore::new();
        let created = seed_category(&store, "dairy", 5.0).await;
        assert_matches!(
            update::<Category, _>(&store, &created.meta.id, &json!("dairy")).await,
            Err(CoreError::InvalidJson { .. })
        );
    }

    #[tokio::test]
    async fn category_line_update_names_its_own_required_fields() {
        let store = MemoryStore::new();
        let category = seed_category(&store, "dairy", 5.0).await;
        let line: CategoryLine = create(
            &store,
            &json!({
                "category_line": "whole milk",
                "category_id": category.meta.id,
                "profit_percentage": 2.5,
            }),
        )
        .await
        .unwrap();

        assert_matches!(
            update::<CategoryLine, _>(&store, &line.meta.id, &json!(["whole milk"])).await,
            Err(CoreError::InvalidJson { ref fields })
                if fields == &["category_line", "category_id"]
        );
        assert_matches!(
            create::<CategoryLine, _>(&store, &json!({})).await,
            Err(CoreError::InvalidJson { ref fields }) if fields == &["category_line"]
        );
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        assert_matches!(
            update::<Category, _>(&store, "missing", &json!({"name": "x"})).await,
            Err(CoreError::IdNotFound)
        );
    }

    #[tokio::test]
    async fn category_import_skips_persisted_names() {
        let store = MemoryStore::new();
        seed_category(&store, "milk", 5.0).await;

        let rows = parse_single_column(b"name\nMilk\nbread\n", "name").unwrap();
        let outcome: ImportOutcome<Category> =
            import(&store, rows, "name", ImportStrategy::SkipExisting)
                .await
                .unwrap();
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.created[0].name, "bread");
        assert_eq!(outcome.skipped, vec!["milk"]);

        let rows = parse_single_column(b"name\nmilk\n", "name").unwrap();
        assert_matches!(
            import::<Category, _>(&store, rows, "name", ImportStrategy::SkipExisting).await,
            Err(CoreError::DataAlreadyExists)
        );
    }

    #[tokio::test]
    async fn failing_import_row_writes_nothing() {
        let store = MemoryStore::new();
        let rows = parse_single_column(b"name\nbread\nbr3ad\n", "name").unwrap();
        assert_matches!(
            import::<Category, _>(&store, rows, "name", ImportStrategy::SkipExisting).await,
            Err(CoreError::WrongShape { .. })
        );
        let categories: Vec<Category> = list(&store).await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn product_import_by_supplier_upserts() {
        let store = MemoryStore::new();
        let (line, supplier) = seed_product_refs(&store).await;
        let existing: Product = create(&store, &product_payload("X", "milk", &line, &supplier))
            .await
            .unwrap();

        let csv = product_csv(&[("X", "cream"), ("Y", "butter")], &line, &supplier);
        let rows = parse_products(csv.as_bytes()).unwrap();
        let outcome: ImportOutcome<Product> = import(&store, rows, "sku", ImportStrategy::Upsert)
            .await
            .unwrap();

        assert_eq!(outcome.updated.len(), 1);
        assert_eq!(outcome.updated[0].meta.id, existing.meta.id);
        assert_eq!(outcome.updated[0].name, "cream");
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.created[0].sku, "Y");

        let products: Vec<Product> = list(&store).await.unwrap();
        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn product_import_with_unknown_line_is_invalid_sku() {
        let store = MemoryStore::new();
        let (_, supplier) = seed_product_refs(&store).await;
        let mut ghost_line: CategoryLine = CategoryLine::from_record(
            Meta::fresh(chrono::Utc::now()),
            &crate::entities::test_support::data(&[
                ("category_line", json!("ghost")),
                ("category_id", json!("none")),
                ("profit_percentage", json!(1.5)),
            ]),
        )
        .unwrap();
        ghost_line.meta.id = "00000000-0000-4000-8000-000000000000".to_string();

        let csv = product_csv(&[("Z", "cheese")], &ghost_line, &supplier);
        let rows = parse_products(csv.as_bytes()).unwrap();
        assert_matches!(
            import::<Product, _>(&store, rows, "sku", ImportStrategy::SkipExisting).await,
            Err(CoreError::InvalidValue { ref fields }) if fields == &["sku"]
        );
    }

    #[tokio::test]
    async fn priced_products_add_both_percentages() {
        let store = MemoryStore::new();
        let (line, supplier) = seed_product_refs(&store).await;
        let product: Product = create(&store, &product_payload("X", "milk", &line, &supplier))
            .await
            .unwrap();

        let priced = get_priced_product(&store, &product.meta.id).await.unwrap();
        assert_eq!(priced.0.cost_values, 17.5);
        let all = list_priced_products(&store).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0.cost_values, 17.5);
    }

    #[tokio::test]
    async fn supplier_summaries_carry_trading_name() {
        let store = MemoryStore::new();
        let (_, supplier) = seed_product_refs(&store).await;
        let summaries = list_supplier_summaries(&store).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, supplier.meta.id);
        assert_eq!(summaries[0].trading_name, "Serra");
    }

    #[tokio::test]
    async fn export_of_empty_table_is_refused() {
        let store = MemoryStore::new();
        assert_matches!(
            export::<Category, _>(&store, Category::EXPORT_COLUMNS).await,
            Err(CoreError::NothingToExport)
        );
        seed_category(&store, "dairy", 5.0).await;
        let csv = export::<Category, _>(&store, Category::EXPORT_COLUMNS)
            .await
            .unwrap();
        assert!(csv.starts_with("id,active,name,profit_percentage,on_create,on_update\n"));
        assert_eq!(csv.lines().count(), 2);
    }
}
