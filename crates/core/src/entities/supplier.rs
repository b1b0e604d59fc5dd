use serde::Serialize;
use serde_json::Value;

use super::{record_with_active, text, Entity, EntityKind, ForeignKey, Meta};
use crate::error::{CoreError, SizeKind};
use crate::types::{EntityId, Record, Timestamp};
use crate::validation::{EntityPolicy, SizeBound, ValidationRule};

static POLICY: EntityPolicy = EntityPolicy {
    rules: &[
        ValidationRule::NotEmpty {
            optional: &["active"],
        },
        ValidationRule::IsString { except: &["active"] },
        ValidationRule::IsBool { fields: &["active"] },
        ValidationRule::Numeric {
            fields: &["phone", "cnpj"],
        },
        ValidationRule::Alpha {
            fields: &["company_name", "trading_name"],
        },
        ValidationRule::Email,
        ValidationRule::Size {
            kind: SizeKind::Maximum,
            bounds: &[
                SizeBound::chars("company_name", 200),
                SizeBound::chars("trading_name", 200),
                SizeBound::chars("email", 200),
                SizeBound::chars("address_id", 36),
                SizeBound::chars("category_id", 36),
                SizeBound::chars("phone", 11),
            ],
        },
        ValidationRule::Size {
            kind: SizeKind::Minimum,
            bounds: &[SizeBound::chars("phone", 10)],
        },
        ValidationRule::Size {
            kind: SizeKind::Exactly,
            bounds: &[SizeBound::chars("cnpj", 14)],
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supplier {
    #[serde(flatten)]
    pub meta: Meta,
    pub company_name: String,
    pub cnpj: String,
    pub trading_name: String,
    pub phone: String,
    pub email: String,
    pub address_id: EntityId,
    pub category_id: EntityId,
}

/// The reduced view returned by the supplier listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierSummary {
    pub id: EntityId,
    pub trading_name: String,
    pub on_create: Timestamp,
    pub on_update: Timestamp,
}

impl From<&Supplier> for SupplierSummary {
    fn from(supplier: &Supplier) -> Self {
        Self {
            id: supplier.meta.id.clone(),
            trading_name: supplier.trading_name.clone(),
            on_create: supplier.meta.on_create,
            on_update: supplier.meta.on_update,
        }
    }
}

impl Entity for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;
    const CREATE_FIELDS: &'static [&'static str] = &[
        "company_name",
        "cnpj",
        "trading_name",
        "phone",
        "email",
        "address_id",
        "category_id",
    ];
    const OPTIONAL_FIELDS: &'static [&'static str] = &[];
    const UPDATE_FIELDS: &'static [&'static str] = &[
        "active",
        "company_name",
        "cnpj",
        "trading_name",
        "phone",
        "email",
        "address_id",
        "category_id",
    ];
    const REQUIRED_FIELDS: &'static [&'static str] = Self::CREATE_FIELDS;

    fn policy() -> &'static EntityPolicy {
        &POLICY
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn from_record(meta: Meta, record: &Record) -> Result<Self, CoreError> {
        Ok(Self {
            meta,
            company_name: text(record, "company_name")?,
            cnpj: text(record, "cnpj")?,
            trading_name: text(record, "trading_name")?,
            phone: text(record, "phone")?,
            email: text(record, "email")?,
            address_id: text(record, "address_id")?,
            category_id: text(record, "category_id")?,
        })
    }

    fn to_record(&self) -> Record {
        let mut record = record_with_active(self.meta.active);
        for (field, value) in [
            ("company_name", &self.company_name),
            ("cnpj", &self.cnpj),
            ("trading_name", &self.trading_name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("address_id", &self.address_id),
            ("category_id", &self.category_id),
        ] {
            record.insert(field.to_string(), Value::from(value.as_str()));
        }
        record
    }

    fn conflict_error(_record: &Record) -> CoreError {
        CoreError::InvalidValue {
            fields: vec!["cnpj".to_string()],
        }
    }

    fn unique_value(&self) -> Option<&str> {
        Some(&self.cnpj)
    }

    fn foreign_keys(&self) -> Vec<ForeignKey<'_>> {
        vec![
            ForeignKey {
                target: EntityKind::Address,
                id: &self.address_id,
            },
            ForeignKey {
                target: EntityKind::Category,
                id: &self.category_id,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{data, now};
    use crate::error::SizeLimit;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn with(field: &str, value: Value) -> Record {
        let mut record = data(&[
            ("company_name", json!("Laticinios Serra")),
            ("cnpj", json!("12345678000190")),
            ("trading_name", json!("Serra")),
            ("phone", json!("1932324545")),
            ("email", json!("vendas@serra.com")),
            ("address_id", json!("a1b2c3d4-0000-4000-8000-000000000001")),
            ("category_id", json!("a1b2c3d4-0000-4000-8000-000000000002")),
        ]);
        record.insert(field.to_string(), value);
        record
    }

    #[test]
    fn valid_supplier_passes() {
        assert!(POLICY.validate_at(&with("phone", json!("19932324545")), now()).is_ok());
    }

    #[test]
    fn cnpj_must_be_exactly_fourteen_digits() {
        let err = POLICY
            .validate_at(&with("cnpj", json!("1234567800019")), now())
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::WrongSize { ref fields, ref limits, kind: SizeKind::Exactly }
                if fields == &["cnpj"] && limits == &[SizeLimit::Chars(14)]
        );
    }

    #[test]
    fn phone_length_interval() {
        assert_matches!(
            POLICY.validate_at(&with("phone", json!("193232454")), now()),
            Err(CoreError::WrongSize { kind: SizeKind::Minimum, .. })
        );
        assert_matches!(
            POLICY.validate_at(&with("phone", json!("199323245450")), now()),
            Err(CoreError::WrongSize { kind: SizeKind::Maximum, .. })
        );
        assert!(POLICY.validate_at(&with("phone", json!("1932324545")), now()).is_ok());
    }

    #[test]
    fn phone_with_punctuation_is_wrong_shape() {
        assert_matches!(
            POLICY.validate_at(&with("phone", json!("(19)3232-4545")), now()),
            Err(CoreError::WrongShape { ref fields, .. }) if fields == &["phone"]
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert_matches!(
            POLICY.validate_at(&with("email", json!("vendas@serra")), now()),
            Err(CoreError::InvalidEmail)
        );
    }

    #[test]
    fn summary_keeps_identity_and_trading_name() {
        let supplier = Supplier::from_record(Meta::fresh(chrono::Utc::now()), &with("cnpj", json!("12345678000190"))).unwrap();
        let summary = SupplierSummary::from(&supplier);
        assert_eq!(summary.id, supplier.meta.id);
        assert_eq!(summary.trading_name, "Serra");
        assert_eq!(supplier.foreign_keys().len(), 2);
    }
}
