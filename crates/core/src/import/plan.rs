//! Import planning: every row is classified and validated before any write.

use std::collections::{HashMap, HashSet};

use crate::entities::{build_new, build_updated, display_value, merge_update, Entity};
use crate::error::CoreError;
use crate::store::Write;
use crate::types::{Moment, Record};

/// What an import does with rows whose key is already persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Leave the persisted record alone.
    SkipExisting,
    /// Replace the persisted record with the row's values.
    Upsert,
}

/// What a planned write does to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAction {
    Create,
    Update,
}

/// Lower-case, trimmed form used to match keys.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Persisted entities indexed by their normalized unique value.
#[derive(Debug)]
pub struct CsvIndex<'a, E> {
    by_key: HashMap<String, &'a E>,
}

impl<'a, E: Entity> CsvIndex<'a, E> {
    pub fn build(existing: &'a [E]) -> Self {
        let by_key = existing
            .iter()
            .filter_map(|entity| {
                entity
                    .unique_value()
                    .map(|value| (normalize_key(value), entity))
            })
            .collect();
        Self { by_key }
    }

    pub fn get(&self, key: &str) -> Option<&'a E> {
        self.by_key.get(&normalize_key(key)).copied()
    }
}

/// A validated write together with the row it came from.
#[derive(Debug, Clone)]
pub struct PlannedWrite<E> {
    pub record: Record,
    pub write: Write<E>,
}

impl<E> PlannedWrite<E> {
    pub fn action(&self) -> ImportAction {
        match self.write {
            Write::Insert(_) => ImportAction::Create,
            Write::Update(_) => ImportAction::Update,
        }
    }
}

/// The complete outcome of planning, before anything is written.
#[derive(Debug, Clone)]
pub struct ImportPlan<E> {
    pub writes: Vec<PlannedWrite<E>>,
    /// Keys left alone because they are already persisted.
    pub skipped: Vec<String>,
    /// Keys that appeared more than once in the file; only the first
    /// occurrence is written.
    pub repeated: Vec<String>,
}

impl<E: Clone> ImportPlan<E> {
    pub fn batch(&self) -> Vec<Write<E>> {
        self.writes.iter().map(|planned| planned.write.clone()).collect()
    }
}

/// Classify and validate every row against the persisted entities.
///
/// The first row that fails its policy aborts the whole plan.
pub fn plan_import<E: Entity>(
    rows: Vec<Record>,
    key_field: &str,
    existing: &[E],
    strategy: ImportStrategy,
    at: Moment,
) -> Result<ImportPlan<E>, CoreError> {
    let index = CsvIndex::build(existing);
    let mut plan = ImportPlan {
        writes: Vec::new(),
        skipped: Vec::new(),
        repeated: Vec::new(),
    };
    let mut seen = HashSet::new();

    for record in rows {
        let key = display_value(&record, key_field);
        if !seen.insert(normalize_key(&key)) {
            plan.repeated.push(key);
            continue;
        }

        let write = match (index.get(&key), strategy) {
            (Some(_), ImportStrategy::SkipExisting) => {
                plan.skipped.push(key);
                continue;
            }
            (Some(current), ImportStrategy::Upsert) => {
                let merged = merge_update(current, &record);
                Write::Update(build_updated(current, &merged, at)?)
            }
            (None, _) => Write::Insert(build_new(&record, at)?),
        };
        plan.writes.push(PlannedWrite {
            record,
            write,
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{create_record, Category, Product};
    use crate::entities::test_support::{data, now};
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    fn at() -> Moment {
        Moment {
            utc: chrono::Utc::now(),
            local: now(),
        }
    }

    fn category(name: &str) -> Category {
        build_new(
            &create_record::<Category>(&json!({"name": name, "profit_percentage": 1.5})).unwrap(),
            at(),
        )
        .unwrap()
    }

    fn name_row(name: &str) -> Record {
        data(&[("name", json!(name))])
    }

    fn product_row(sku: &str, name: &str) -> Record {
        data(&[
            ("name", json!(name)),
            ("cost_values", json!(10.5)),
            ("unit_box", json!(6)),
            ("weight_unit", json!(1.0)),
            ("validity", json!("2099-01-01")),
            ("sku", json!(sku)),
            ("description", json!("")),
            ("category_line_id", json!("a1b2c3d4-0000-4000-8000-000000000003")),
            ("supplier_id", json!("a1b2c3d4-0000-4000-8000-000000000004")),
        ])
    }

    #[test]
    fn index_matches_case_and_whitespace_insensitively() {
        let existing = vec![category("Milk")];
        let index = CsvIndex::build(&existing);
        assert!(index.get("MILK").is_some());
        assert!(index.get(" milk ").is_some());
        assert!(index.get("bread").is_none());
    }

    #[test]
    fn skip_existing_inserts_only_new_keys() {
        let existing = vec![category("milk")];
        let plan = plan_import(
            vec![name_row("milk"), name_row("bread")],
            "name",
            &existing,
            ImportStrategy::SkipExisting,
            at(),
        )
        .unwrap();
        assert_eq!(plan.writes.len(), 1);
        assert_eq!(plan.writes[0].action(), ImportAction::Create);
        assert_eq!(plan.writes[0].record["name"], "bread");
        assert_eq!(plan.skipped, vec!["milk"]);
    }

    #[test]
    fn skip_existing_with_only_known_keys_plans_nothing() {
        let existing = vec![category("milk")];
        let plan = plan_import(
            vec![name_row("milk")],
            "name",
            &existing,
            ImportStrategy::SkipExisting,
            at(),
        )
        .unwrap();
        assert!(plan.writes.is_empty());
    }

    #[test]
    fn repeated_keys_are_written_once() {
        let plan = plan_import::<Category>(
            vec![name_row("bread"), name_row("bread"), name_row("milk")],
            "name",
            &[],
            ImportStrategy::SkipExisting,
            at(),
        )
        .unwrap();
        assert_eq!(plan.writes.len(), 2);
        assert_eq!(plan.repeated, vec!["bread"]);
    }

    #[test]
    fn invalid_row_aborts_the_plan() {
        let result = plan_import::<Category>(
            vec![name_row("bread"), name_row("br3ad")],
            "name",
            &[],
            ImportStrategy::SkipExisting,
            at(),
        );
        assert_matches!(result, Err(CoreError::WrongShape { .. }));
    }

    #[test]
    fn upsert_updates_known_sku_and_inserts_new_one() {
        let current: Product = build_new(&product_row("X", "milk"), at()).unwrap();
        let existing = vec![current.clone()];
        let plan = plan_import(
            vec![product_row("X", "cream"), product_row("Y", "butter")],
            "sku",
            &existing,
            ImportStrategy::Upsert,
            at(),
        )
        .unwrap();
        assert_eq!(plan.writes.len(), 2);

        assert_eq!(plan.writes[0].action(), ImportAction::Update);
        let updated = plan.writes[0].write.entity();
        assert_eq!(updated.meta.id, current.meta.id);
        assert_eq!(updated.name, "cream");
        assert_eq!(updated.description.as_deref(), Some(""));

        assert_eq!(plan.writes[1].action(), ImportAction::Create);
        assert_eq!(plan.writes[1].write.entity().sku, "Y");
    }

    #[test]
    fn upsert_keeps_active_flag_of_persisted_product() {
        let mut current: Product = build_new(&product_row("X", "milk"), at()).unwrap();
        current.meta.active = false;
        let plan = plan_import(
            vec![product_row("x", "cream")],
            "sku",
            &[current],
            ImportStrategy::Upsert,
            at(),
        )
        .unwrap();
        let updated = plan.writes[0].write.entity();
        assert!(!updated.meta.active);
        assert_eq!(updated.sku, "x");
        assert_ne!(plan.writes[0].record["sku"], Value::Null);
    }
}
