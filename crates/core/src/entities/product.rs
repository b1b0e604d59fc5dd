use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::{
    date, float, integer, optional_text, record_with_active, text, Entity,
    EntityKind, ForeignKey, Meta,
};
use crate::error::{CoreError, SizeKind};
use crate::types::{EntityId, Record};
use crate::validation::evaluator::DATE_FORMAT;
use crate::validation::{EntityPolicy, SizeBound, ValidationRule};

static POLICY: EntityPolicy = EntityPolicy {
    rules: &[
        ValidationRule::NotEmpty {
            optional: &["active", "description"],
        },
        ValidationRule::IsString {
            except: &["active", "cost_values", "unit_box", "weight_unit", "validity"],
        },
        ValidationRule::IsBool { fields: &["active"] },
        ValidationRule::Alpha { fields: &["name"] },
        ValidationRule::Validity {
            fields: &["validity"],
        },
        ValidationRule::IsPositiveInt {
            fields: &["unit_box"],
        },
        ValidationRule::IsPositiveFloat {
            fields: &["cost_values", "weight_unit"],
        },
        ValidationRule::Size {
            kind: SizeKind::Maximum,
            bounds: &[
                SizeBound::chars("name", 80),
                SizeBound::chars("description", 150),
                SizeBound::chars("category_line_id", 36),
                SizeBound::chars("supplier_id", 36),
                SizeBound::decimal_places("cost_values", 2),
                SizeBound::decimal_places("weight_unit", 3),
            ],
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(flatten)]
    pub meta: Meta,
    pub name: String,
    pub cost_values: f64,
    pub unit_box: i64,
    pub weight_unit: f64,
    pub validity: NaiveDate,
    pub sku: String,
    pub description: Option<String>,
    pub category_line_id: EntityId,
    pub supplier_id: EntityId,
}

impl Product {
    /// Columns written by the CSV export, in order.
    pub const EXPORT_COLUMNS: &'static [&'static str] = &[
        "id",
        "active",
        "name",
        "cost_values",
        "unit_box",
        "weight_unit",
        "validity",
        "sku",
        "description",
        "category_line_id",
        "supplier_id",
        "on_create",
        "on_update",
    ];
}

/// A product whose `cost_values` carries the profit percentages of its
/// category and category line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PricedProduct(pub Product);

impl PricedProduct {
    pub fn new(mut product: Product, category_percentage: f64, line_percentage: f64) -> Self {
        product.cost_values += category_percentage + line_percentage;
        Self(product)
    }
}

impl Entity for Product {
    const KIND: EntityKind = EntityKind::Product;
    const CREATE_FIELDS: &'static [&'static str] = &[
        "name",
        "cost_values",
        "unit_box",
        "weight_unit",
        "validity",
        "sku",
        "description",
        "category_line_id",
        "supplier_id",
    ];
    const OPTIONAL_FIELDS: &'static [&'static str] = &["description"];
    const UPDATE_FIELDS: &'static [&'static str] = Self::CREATE_FIELDS;
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "name",
        "cost_values",
        "unit_box",
        "weight_unit",
        "validity",
        "sku",
        "category_line_id",
        "supplier_id",
    ];

    fn policy() -> &'static EntityPolicy {
        &POLICY
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn from_record(meta: Meta, record: &Record) -> Result<Self, CoreError> {
        Ok(Self {
            meta,
            name: text(record, "name")?,
            cost_values: float(record, "cost_values")?,
            unit_box: integer(record, "unit_box")?,
            weight_unit: float(record, "weight_unit")?,
            validity: date(record, "validity")?,
            sku: text(record, "sku")?,
            description: optional_text(record, "description")?,
            category_line_id: text(record, "category_line_id")?,
            supplier_id: text(record, "supplier_id")?,
        })
    }

    fn to_record(&self) -> Record {
        let mut record = record_with_active(self.meta.active);
        record.insert("name".into(), Value::from(self.name.as_str()));
        record.insert("cost_values".into(), Value::from(self.cost_values));
        record.insert("unit_box".into(), Value::from(self.unit_box));
        record.insert("weight_unit".into(), Value::from(self.weight_unit));
        record.insert(
            "validity".into(),
            Value::from(self.validity.format(DATE_FORMAT).to_string()),
        );
        record.insert("sku".into(), Value::from(self.sku.as_str()));
        record.insert(
            "description".into(),
            self.description.as_deref().map_or(Value::Null, Value::from),
        );
        record.insert(
            "category_line_id".into(),
            Value::from(self.category_line_id.as_str()),
        );
        record.insert("supplier_id".into(), Value::from(self.supplier_id.as_str()));
        record
    }

    fn conflict_error(_record: &Record) -> CoreError {
        CoreError::InvalidValue {
            fields: vec!["sku".to_string()],
        }
    }

    fn unique_value(&self) -> Option<&str> {
        Some(&self.sku)
    }

    fn foreign_keys(&self) -> Vec<ForeignKey<'_>> {
        vec![
            ForeignKey {
                target: EntityKind::CategoryLine,
                id: &self.category_line_id,
            },
            ForeignKey {
                target: EntityKind::Supplier,
                id: &self.supplier_id,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{data, now};
    use crate::error::{DateProblem, ExpectedType, SizeLimit};
    use assert_matches::assert_matches;
    use serde_json::json;

    fn with(field: &str, value: Value) -> Record {
        let mut record = data(&[
            ("name", json!("milk")),
            ("cost_values", json!(10.15)),
            ("unit_box", json!(12)),
            ("weight_unit", json!(1.5)),
            ("validity", json!("2099-01-01")),
            ("sku", json!("MLK-001")),
            ("description", Value::Null),
            ("category_line_id", json!("a1b2c3d4-0000-4000-8000-000000000003")),
            ("supplier_id", json!("a1b2c3d4-0000-4000-8000-000000000004")),
        ]);
        record.insert(field.to_string(), value);
        record
    }

    #[test]
    fn valid_product_builds() {
        let record = with("description", json!("semi-skimmed"));
        assert!(POLICY.validate_at(&record, now()).is_ok());
        let product = Product::from_record(Meta::fresh(chrono::Utc::now()), &record).unwrap();
        assert_eq!(product.validity, NaiveDate::from_ymd_opt(2099, 1, 1).unwrap());
        assert_eq!(product.description.as_deref(), Some("semi-skimmed"));
    }

    #[test]
    fn empty_fields_are_named_in_record_order() {
        let mut record = with("name", json!(""));
        record.insert("sku".into(), json!(" "));
        assert_matches!(
            POLICY.validate_at(&record, now()),
            Err(CoreError::EmptyField { ref fields }) if fields == &["name", "sku"]
        );
    }

    #[test]
    fn validity_checks() {
        assert_matches!(
            POLICY.validate_at(&with("validity", json!("2019-01-01")), now()),
            Err(CoreError::InvalidDate(DateProblem::Expired))
        );
        assert_matches!(
            POLICY.validate_at(&with("validity", json!("01-2099-01")), now()),
            Err(CoreError::InvalidDate(DateProblem::Incorrect))
        );
    }

    #[test]
    fn fractional_unit_box_is_not_an_int() {
        assert_matches!(
            POLICY.validate_at(&with("unit_box", json!(1.5)), now()),
            Err(CoreError::WrongType { expected: ExpectedType::PositiveInt, .. })
        );
    }

    #[test]
    fn cost_with_three_decimals_is_too_precise() {
        assert_matches!(
            POLICY.validate_at(&with("cost_values", json!(10.155)), now()),
            Err(CoreError::WrongSize { ref fields, ref limits, .. })
                if fields == &["cost_values"] && limits == &[SizeLimit::DecimalPlaces(2)]
        );
    }

    #[test]
    fn record_round_trip_is_idempotent() {
        let product = Product::from_record(Meta::fresh(chrono::Utc::now()), &with("sku", json!("X"))).unwrap();
        let record = product.to_record();
        assert!(POLICY.validate_at(&record, now()).is_ok());
        let again = Product::from_record(product.meta.clone(), &record).unwrap();
        assert_eq!(again, product);
        assert_eq!(
            serde_json::to_string(&again).unwrap(),
            serde_json::to_string(&product).unwrap()
        );
    }

    #[test]
    fn priced_view_adds_both_percentages() {
        let product = Product::from_record(Meta::fresh(chrono::Utc::now()), &with("cost_values", json!(10.0))).unwrap();
        let priced = PricedProduct::new(product, 5.0, 2.5);
        assert_eq!(priced.0.cost_values, 17.5);
        assert_eq!(serde_json::to_value(&priced).unwrap()["cost_values"], json!(17.5));
    }
}
