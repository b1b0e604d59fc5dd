use serde::Serialize;
use serde_json::Value;

use super::{float, record_with_active, text, Entity, EntityKind, ForeignKey, Meta};
use crate::error::{CoreError, SizeKind};
use crate::types::{EntityId, Record};
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
        ValidationRule::IsPositiveFloat {
            fields: &["profit_percentage"],
        },
        ValidationRule::Size {
            kind: SizeKind::Maximum,
            bounds: &[
                SizeBound::chars("category_line", 100),
                SizeBound::chars("category_id", 36),
            ],
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLine {
    #[serde(flatten)]
    pub meta: Meta,
    pub category_line: String,
    pub category_id: EntityId,
    pub profit_percentage: f64,
}

impl Entity for CategoryLine {
    const KIND: EntityKind = EntityKind::CategoryLine;
    const CREATE_FIELDS: &'static [&'static str] =
        &["category_line", "category_id", "profit_percentage"];
    const OPTIONAL_FIELDS: &'static [&'static str] = &[];
    const UPDATE_FIELDS: &'static [&'static str] =
        &["category_line", "category_id", "profit_percentage"];
    const REQUIRED_FIELDS: &'static [&'static str] = &["category_line"];
    const UPDATE_REQUIRED_FIELDS: &'static [&'static str] = &["category_line", "category_id"];

    fn policy() -> &'static EntityPolicy {
        &POLICY
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn from_record(meta: Meta, record: &Record) -> Result<Self, CoreError> {
        Ok(Self {
            meta,
            category_line: text(record, "category_line")?,
            category_id: text(record, "category_id")?,
            profit_percentage: float(record, "profit_percentage")?,
        })
    }

    fn to_record(&self) -> Record {
        let mut record = record_with_active(self.meta.active);
        record.insert(
            "category_line".into(),
            Value::from(self.category_line.as_str()),
        );
        record.insert("category_id".into(), Value::from(self.category_id.as_str()));
        record.insert(
            "profit_percentage".into(),
            Value::from(self.profit_percentage),
        );
        record
    }

    fn conflict_error(_record: &Record) -> CoreError {
        CoreError::InvalidValue {
            fields: vec!["category_line".to_string()],
        }
    }

    fn unique_value(&self) -> Option<&str> {
        Some(&self.category_line)
    }

    fn foreign_keys(&self) -> Vec<ForeignKey<'_>> {
        vec![ForeignKey {
            target: EntityKind::Category,
            id: &self.category_id,
        }]
    }
}
