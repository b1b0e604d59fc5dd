use serde::Serialize;
use serde_json::Value;

use super::{display_value, float, record_with_active, text, Entity, EntityKind, Meta};
use crate::error::{CoreError, SizeKind};
use crate::types::Record;
use crate::validation::{EntityPolicy, SizeBound, ValidationRule};

static POLICY: EntityPolicy = EntityPolicy {
    rules: &[
        ValidationRule::NotEmpty {
            optional: &["active"],
        },
        ValidationRule::IsString {
            except: &["active", "profit_percentage"],
        },
        ValidationRule::IsBool { fields: &["active"] },
        ValidationRule::Alpha { fields: &["name"] },
        ValidationRule::IsPositiveFloat {
            fields: &["profit_percentage"],
        },
        ValidationRule::Size {
            kind: SizeKind::Maximum,
            bounds: &[SizeBound::chars("name", 80)],
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    #[serde(flatten)]
    pub meta: Meta,
    pub name: String,
    pub profit_percentage: f64,
}

impl Category {
    /// Columns written by the CSV export, in order.
    pub const EXPORT_COLUMNS: &'static [&'static str] =
        &["id", "active", "name", "profit_percentage", "on_create", "on_update"];
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Category;
    const CREATE_FIELDS: &'static [&'static str] = &["name", "profit_percentage"];
    const OPTIONAL_FIELDS: &'static [&'static str] = &[];
    const UPDATE_FIELDS: &'static [&'static str] = &["active", "name"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["name"];

    fn policy() -> &'static EntityPolicy {
        &POLICY
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    /// A record without `profit_percentage` (a CSV row) yields zero.
    fn from_record(meta: Meta, record: &Record) -> Result<Self, CoreError> {
        let profit_percentage = match record.get("profit_percentage") {
            None | Some(Value::Null) => 0.0,
            Some(_) => float(record, "profit_percentage")?,
        };
        Ok(Self {
            meta,
            name: text(record, "name")?,
            profit_percentage,
        })
    }

    fn to_record(&self) -> Record {
        let mut record = record_with_active(self.meta.active);
        record.insert("name".into(), Value::from(self.name.as_str()));
        record.insert(
            "profit_percentage".into(),
            Value::from(self.profit_percentage),
        );
        record
    }

    fn conflict_error(record: &Record) -> CoreError {
        CoreError::DuplicateValue {
            values: vec![display_value(record, "name")],
        }
    }

    fn import_conflict_error(record: &Record) -> CoreError {
        CoreError::RepeatedInFile {
            values: vec![display_value(record, "name")],
        }
    }

    fn unique_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{data, now};
    use crate::error::{ExpectedShape, ExpectedType, SizeLimit};
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn valid_category_builds() {
        let record = data(&[("name", json!("dairy")), ("profit_percentage", json!(12.5))]);
        assert!(POLICY.validate_at(&record, now()).is_ok());
        let category = Category::from_record(Meta::fresh(chrono::Utc::now()), &record).unwrap();
        assert_eq!(category.profit_percentage, 12.5);
        assert!(category.meta.active);
    }

    #[test]
    fn name_with_digits_is_wrong_shape() {
        let record = data(&[("name", json!("dairy2")), ("profit_percentage", json!(1.5))]);
        assert_matches!(
            POLICY.validate_at(&record, now()),
            Err(CoreError::WrongShape { expected: ExpectedShape::Alpha, .. })
        );
    }

    #[test]
    fn integer_profit_is_not_a_float() {
        let record = data(&[("name", json!("dairy")), ("profit_percentage", json!(10))]);
        let err = POLICY.validate_at(&record, now()).unwrap_err();
        assert_matches!(
            err,
            CoreError::WrongType { ref fields, expected: ExpectedType::PositiveFloat }
                if fields == &["profit_percentage"]
        );
    }

    #[test]
    fn zero_profit_reads_as_empty() {
        let record = data(&[("name", json!("dairy")), ("profit_percentage", json!(0.0))]);
        assert_matches!(
            POLICY.validate_at(&record, now()),
            Err(CoreError::EmptyField { ref fields }) if fields == &["profit_percentage"]
        );
    }

    #[test]
    fn long_name_reports_bound() {
        let record = data(&[("name", json!("a".repeat(81))), ("profit_percentage", json!(1.5))]);
        assert_matches!(
            POLICY.validate_at(&record, now()),
            Err(CoreError::WrongSize { ref limits, .. }) if limits == &[SizeLimit::Chars(80)]
        );
    }

    #[test]
    fn csv_row_without_profit_defaults_to_zero() {
        let record = data(&[("name", json!("bread"))]);
        assert!(POLICY.validate_at(&record, now()).is_ok());
        let category = Category::from_record(Meta::fresh(chrono::Utc::now()), &record).unwrap();
        assert_eq!(category.profit_percentage, 0.0);
    }

    #[test]
    fn conflicts_name_the_value() {
        let record = data(&[("name", json!("milk"))]);
        assert_eq!(
            Category::conflict_error(&record).to_string(),
            "The following values already exist in the database: milk"
        );
        assert_matches!(
            Category::import_conflict_error(&record),
            CoreError::RepeatedInFile { ref values } if values == &["milk"]
        );
    }

    #[test]
    fn serialization_is_stable() {
        let category = Category::from_record(
            Meta::fresh(chrono::Utc::now()),
            &data(&[("name", json!("dairy")), ("profit_percentage", json!(2.5))]),
        )
        .unwrap();
        let first = serde_json::to_value(&category).unwrap();
        let second = serde_json::to_value(&category).unwrap();
        assert_eq!(first, second);
        assert_eq!(first["name"], "dairy");
        assert_eq!(first["active"], true);
    }
}
