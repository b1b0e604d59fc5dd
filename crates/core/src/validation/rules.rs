//! Validation rule and policy types.

use crate::error::{SizeKind, SizeLimit};

/// A size constraint attached to one field.
#[derive(Debug, Clone, Copy)]
pub struct SizeBound {
    pub field: &'static str,
    pub limit: SizeLimit,
}

impl SizeBound {
    pub const fn chars(field: &'static str, n: usize) -> Self {
        Self {
            field,
            limit: SizeLimit::Chars(n),
        }
    }

    pub const fn decimal_places(field: &'static str, n: usize) -> Self {
        Self {
            field,
            limit: SizeLimit::DecimalPlaces(n),
        }
    }
}

/// One step of an entity policy.
///
/// Each step checks a single concern over the whole record and reports all
/// offending fields at once.
#[derive(Debug, Clone, Copy)]
pub enum ValidationRule {
    /// Every field except `optional` must hold a non-blank value.
    NotEmpty { optional: &'static [&'static str] },
    /// Every field except `except` must be a string when set.
    IsString { except: &'static [&'static str] },
    IsBool { fields: &'static [&'static str] },
    /// Listed fields must be integers; negative integers fail anywhere.
    IsPositiveInt { fields: &'static [&'static str] },
    /// Listed fields must be floats; negative floats fail anywhere.
    IsPositiveFloat { fields: &'static [&'static str] },
    Alphanumeric { fields: &'static [&'static str] },
    Numeric { fields: &'static [&'static str] },
    Alpha { fields: &'static [&'static str] },
    /// `YYYY-MM-DD` dates that must not lie in the past.
    Validity { fields: &'static [&'static str] },
    /// The field named `email` must look like an e-mail address.
    Email,
    Size {
        kind: SizeKind,
        bounds: &'static [SizeBound],
    },
}

/// The ordered rule chain for one entity type.
#[derive(Debug)]
pub struct EntityPolicy {
    pub rules: &'static [ValidationRule],
}
