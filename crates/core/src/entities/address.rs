use serde::Serialize;
use serde_json::Value;

use super::{optional_text, record_with_active, text, Entity, EntityKind, Meta};
use crate::error::{CoreError, SizeKind};
use crate::types::Record;
use crate::validation::{EntityPolicy, SizeBound, ValidationRule};

static POLICY: EntityPolicy = EntityPolicy {
    rules: &[
        ValidationRule::NotEmpty {
            optional: &["complement", "active"],
        },
        ValidationRule::IsString { except: &["active"] },
        ValidationRule::IsBool { fields: &["active"] },
        ValidationRule::Alphanumeric { fields: &["street"] },
        ValidationRule::Numeric {
            fields: &["number", "zip_code"],
        },
        ValidationRule::Alpha {
            fields: &["city", "state"],
        },
        ValidationRule::Size {
            kind: SizeKind::Maximum,
            bounds: &[
                SizeBound::chars("zip_code", 8),
                SizeBound::chars("number", 10),
                SizeBound::chars("complement", 100),
                SizeBound::chars("street", 50),
                SizeBound::chars("city", 50),
                SizeBound::chars("state", 50),
            ],
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    #[serde(flatten)]
    pub meta: Meta,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub zip_code: String,
    pub city: String,
    pub state: String,
}

impl Entity for Address {
    const KIND: EntityKind = EntityKind::Address;
    const CREATE_FIELDS: &'static [&'static str] =
        &["street", "number", "complement", "zip_code", "city", "state"];
    const OPTIONAL_FIELDS: &'static [&'static str] = &["complement"];
    const UPDATE_FIELDS: &'static [&'static str] = &[
        "active",
        "street",
        "number",
        "complement",
        "zip_code",
        "city",
        "state",
    ];
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["street", "number", "zip_code", "city", "state"];

    fn policy() -> &'static EntityPolicy {
        &POLICY
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn from_record(meta: Meta, record: &Record) -> Result<Self, CoreError> {
        Ok(Self {
            meta,
            street: text(record, "street")?,
            number: text(record, "number")?,
            complement: optional_text(record, "complement")?,
            zip_code: text(record, "zip_code")?,
            city: text(record, "city")?,
            state: text(record, "state")?,
        })
    }

    fn to_record(&self) -> Record {
        let mut record = record_with_active(self.meta.active);
        record.insert("street".into(), Value::from(self.street.as_str()));
        record.insert("number".into(), Value::from(self.number.as_str()));
        record.insert(
            "complement".into(),
            self.complement.as_deref().map_or(Value::Null, Value::from),
        );
        record.insert("zip_code".into(), Value::from(self.zip_code.as_str()));
        record.insert("city".into(), Value::from(self.city.as_str()));
        record.insert("state".into(), Value::from(self.state.as_str()));
        record
    }

    /// Addresses have no unique columns, so a rejected write is unexpected.
    fn conflict_error(_record: &Record) -> CoreError {
        CoreError::Internal("address write rejected by the store".to_string())
    }
}
