//! Catalog entities and their validation policies.
//!
//! Every entity is built from a [`Record`] only after its policy has
//! accepted that record. The same policy guards creates, updates and CSV
//! rows.

pub mod address;
pub mod category;
pub mod category_line;
pub mod supplier;
pub mod product;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, ExpectedType};
use crate::types::{new_id, EntityId, Moment, Record, Timestamp};
use crate::validation::evaluator::parse_date;
use crate::validation::EntityPolicy;

pub use address::Address;
pub use category::Category;
pub use category_line::CategoryLine;
pub use product::{PricedProduct, Product};
pub use supplier::{Supplier, SupplierSummary};

/// The five entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Address,
    Category,
    CategoryLine,
    Supplier,
    Product,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Category => "category",
            Self::CategoryLine => "category_line",
            Self::Supplier => "supplier",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference from one entity to another entity's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey<'a> {
    pub target: EntityKind,
    pub id: &'a str,
}

/// Identity and bookkeeping columns shared by every entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub id: EntityId,
    pub active: bool,
    pub on_create: Timestamp,
    pub on_update: Timestamp,
}

impl Meta {
    /// Metadata for a brand-new entity.
    pub fn fresh(now: Timestamp) -> Self {
        Self {
            id: new_id(),
            active: true,
            on_create: now,
            on_update: now,
        }
    }

    /// Metadata for an updated entity: identity and creation time are kept,
    /// `active` follows the record when it carries a boolean.
    pub fn touched(&self, record: &Record, now: Timestamp) -> Self {
        Self {
            id: self.id.clone(),
            active: record
                .get("active")
                .and_then(Value::as_bool)
                .unwrap_or(self.active),
            on_create: self.on_create,
            on_update: now,
        }
    }
}

/// Behaviour every catalog entity provides to the services and stores.
pub trait Entity: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Fields read from a create payload, in record order.
    const CREATE_FIELDS: &'static [&'static str];

    /// Create fields that may be left out of the payload.
    const OPTIONAL_FIELDS: &'static [&'static str];

    /// Fields a full update replaces.
    const UPDATE_FIELDS: &'static [&'static str];

    /// Fields named when a payload is structurally incomplete.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Fields named when an update payload is structurally incomplete.
    const UPDATE_REQUIRED_FIELDS: &'static [&'static str] = Self::REQUIRED_FIELDS;

    fn policy() -> &'static EntityPolicy;

    fn meta(&self) -> &Meta;

    /// Build the entity from a record its policy has accepted.
    fn from_record(meta: Meta, record: &Record) -> Result<Self, CoreError>;

    /// Writable fields (preceded by `active`) as a record.
    fn to_record(&self) -> Record;

    /// Error reported when the store rejects a write of `record`.
    fn conflict_error(record: &Record) -> CoreError;

    /// Error reported when the store rejects a row of an insert-only import.
    fn import_conflict_error(record: &Record) -> CoreError {
        Self::conflict_error(record)
    }

    /// Value of the entity's unique column, if it has one.
    fn unique_value(&self) -> Option<&str> {
        None
    }

    fn foreign_keys(&self) -> Vec<ForeignKey<'_>> {
        Vec::new()
    }

    fn id(&self) -> &str {
        &self.meta().id
    }
}

// ---------------------------------------------------------------------------
// Building entities from payloads
// ---------------------------------------------------------------------------

/// Pick the create fields out of a JSON payload.
///
/// The payload must be an object carrying every non-optional create field;
/// optional fields left out become null.
pub fn create_record<E: Entity>(payload: &Value) -> Result<Record, CoreError> {
    let Some(object) = payload.as_object() else {
        return Err(CoreError::invalid_json(E::REQUIRED_FIELDS));
    };
    let mut record = Record::new();
    for field in E::CREATE_FIELDS {
        match object.get(*field) {
            Some(value) => {
                record.insert(field.to_string(), value.clone());
            }
            None if E::OPTIONAL_FIELDS.contains(field) => {
                record.insert(field.to_string(), Value::Null);
            }
            None => return Err(CoreError::invalid_json(E::REQUIRED_FIELDS)),
        }
    }
    Ok(record)
}

/// Validate a create record and build a new entity from it.
pub fn build_new<E: Entity>(record: &Record, at: Moment) -> Result<E, CoreError> {
    E::policy().validate_at(record, at.local)?;
    E::from_record(Meta::fresh(at.utc), record)
}

/// Overlay an update payload on the entity's current values.
///
/// Every update field is replaced; one missing from the payload becomes
/// null, except `active`, which keeps its current value.
pub fn merge_update<E: Entity>(current: &E, payload: &Record) -> Record {
    let mut record = current.to_record();
    for field in E::UPDATE_FIELDS {
        match payload.get(*field) {
            Some(value) => {
                record.insert(field.to_string(), value.clone());
            }
            None if *field == "active" => {}
            None => {
                record.insert(field.to_string(), Value::Null);
            }
        }
    }
    record
}

/// Validate the updated fields of `merged` and build the replacement entity.
pub fn build_updated<E: Entity>(current: &E, merged: &Record, at: Moment) -> Result<E, CoreError> {
    let checked: Record = merged
        .iter()
        .filter(|(key, _)| E::UPDATE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    E::policy().validate_at(&checked, at.local)?;
    E::from_record(current.meta().touched(merged, at.utc), merged)
}

// ---------------------------------------------------------------------------
// Typed field extraction
// ---------------------------------------------------------------------------

fn wrong_type(field: &str, expected: ExpectedType) -> CoreError {
    CoreError::WrongType {
        fields: vec![field.to_string()],
        expected,
    }
}

pub(crate) fn text(record: &Record, field: &str) -> Result<String, CoreError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| wrong_type(field, ExpectedType::Str))
}

pub(crate) fn optional_text(record: &Record, field: &str) -> Result<Option<String>, CoreError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(wrong_type(field, ExpectedType::Str)),
    }
}

pub(crate) fn float(record: &Record, field: &str) -> Result<f64, CoreError> {
    record
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| wrong_type(field, ExpectedType::PositiveFloat))
}

pub(crate) fn integer(record: &Record, field: &str) -> Result<i64, CoreError> {
    record
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| wrong_type(field, ExpectedType::PositiveInt))
}

pub(crate) fn date(record: &Record, field: &str) -> Result<NaiveDate, CoreError> {
    record
        .get(field)
        .and_then(parse_date)
        .ok_or(CoreError::InvalidDate(crate::error::DateProblem::Incorrect))
}

/// Text value of `field` for use in error messages.
pub(crate) fn display_value(record: &Record, field: &str) -> String {
    record
        .get(field)
        .map(crate::validation::render)
        .unwrap_or_default()
}

/// Start a record with the shared `active` flag.
pub(crate) fn record_with_active(active: bool) -> Record {
    let mut record = Record::new();
    record.insert("active".to_string(), Value::Bool(active));
    record
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::Value;

    use crate::types::Record;

    pub fn data(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    pub fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }
}
