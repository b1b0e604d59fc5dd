//! Rule evaluator: pure logic, no database access.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::Value;

use super::rules::{EntityPolicy, SizeBound, ValidationRule};
use crate::error::{
    CoreError, DateProblem, ExpectedShape, ExpectedType, SizeKind, SizeLimit,
};
use crate::types::Record;

/// Date format accepted by validity fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const EMAIL_PATTERN: &str = r"^[a-z0-9]+[\._]?[a-z0-9]+[@]\w+[.]\w{2,3}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

impl EntityPolicy {
    /// Run the rule chain against `record`, stopping at the first failure.
    /// `now` is the local time validity dates are compared with.
    pub fn validate_at(&self, record: &Record, now: NaiveDateTime) -> Result<(), CoreError> {
        for rule in self.rules {
            evaluate_rule(rule, record, now)?;
        }
        Ok(())
    }
}

/// Evaluate a single rule against a record.
pub fn evaluate_rule(
    rule: &ValidationRule,
    record: &Record,
    now: NaiveDateTime,
) -> Result<(), CoreError> {
    match *rule {
        ValidationRule::NotEmpty { optional } => {
            reject(empty_fields(optional, record), |fields| CoreError::EmptyField { fields })
        }
        ValidationRule::IsString { except } => reject(non_string_fields(except, record), |fields| {
            CoreError::WrongType {
                fields,
                expected: ExpectedType::Str,
            }
        }),
        ValidationRule::IsBool { fields } => reject(non_bool_fields(fields, record), |fields| {
            CoreError::WrongType {
                fields,
                expected: ExpectedType::Bool,
            }
        }),
        ValidationRule::IsPositiveInt { fields } => {
            reject(non_positive_int_fields(fields, record), |fields| {
                CoreError::WrongType {
                    fields,
                    expected: ExpectedType::PositiveInt,
                }
            })
        }
        ValidationRule::IsPositiveFloat { fields } => {
            reject(non_positive_float_fields(fields, record), |fields| {
                CoreError::WrongType {
                    fields,
                    expected: ExpectedType::PositiveFloat,
                }
            })
        }
        ValidationRule::Alphanumeric { fields } => reject(
            shape_violations(fields, record, ExpectedShape::Alphanumeric),
            |fields| CoreError::WrongShape {
                fields,
                expected: ExpectedShape::Alphanumeric,
            },
        ),
        ValidationRule::Numeric { fields } => reject(
            shape_violations(fields, record, ExpectedShape::Numeric),
            |fields| CoreError::WrongShape {
                fields,
                expected: ExpectedShape::Numeric,
            },
        ),
        ValidationRule::Alpha { fields } => reject(
            shape_violations(fields, record, ExpectedShape::Alpha),
            |fields| CoreError::WrongShape {
                fields,
                expected: ExpectedShape::Alpha,
            },
        ),
        ValidationRule::Validity { fields } => match date_problem(fields, record, now) {
            Some(problem) => Err(CoreError::InvalidDate(problem)),
            None => Ok(()),
        },
        ValidationRule::Email => {
            if has_invalid_email(record) {
                Err(CoreError::InvalidEmail)
            } else {
                Ok(())
            }
        }
        ValidationRule::Size { kind, bounds } => {
            let violations = size_violations(kind, bounds, record);
            if violations.is_empty() {
                return Ok(());
            }
            let (fields, limits) = violations.into_iter().unzip();
            Err(CoreError::WrongSize {
                fields,
                limits,
                kind,
            })
        }
    }
}

/// Fail with `required` when fewer of its fields carry a value than it lists.
pub fn require_fields(required: &[&str], record: &Record) -> Result<(), CoreError> {
    let present = required
        .iter()
        .filter(|field| record.get(**field).is_some_and(is_truthy))
        .count();
    if present < required.len() {
        return Err(CoreError::invalid_json(required));
    }
    Ok(())
}

fn reject(
    fields: Vec<String>,
    into_error: impl FnOnce(Vec<String>) -> CoreError,
) -> Result<(), CoreError> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(into_error(fields))
    }
}

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

/// Whether a value counts as "set". Zero and `false` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text form of a value used for length and shape checks.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_i64() || n.is_u64())
}

fn is_float(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_f64())
}

fn is_negative(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| n < 0.0)
}

fn without_whitespace(value: &Value) -> String {
    render(value).split_whitespace().collect()
}

fn has_shape(text: &str, shape: ExpectedShape) -> bool {
    if text.is_empty() {
        return false;
    }
    match shape {
        ExpectedShape::Alphanumeric => text.chars().all(char::is_alphanumeric),
        ExpectedShape::Numeric => text.chars().all(char::is_numeric),
        ExpectedShape::Alpha => text.chars().all(char::is_alphabetic),
    }
}

/// Fractional digits of a number's rendering, exponent form included
/// (`1.5e-5` has 6).
fn decimal_places(value: &Value) -> usize {
    let rendered = render(value);
    let (mantissa, exponent) = match rendered.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().unwrap_or(0)),
        None => (rendered.as_str(), 0),
    };
    let fraction = mantissa
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.chars().count());
    usize::try_from(fraction as i64 - exponent).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Validators: each returns every offending field, in record order
// ---------------------------------------------------------------------------

pub fn empty_fields(optional: &[&str], record: &Record) -> Vec<String> {
    record
        .iter()
        .filter(|(key, value)| {
            !optional.contains(&key.as_str())
                && (!is_truthy(value) || render(value).trim().is_empty())
        })
        .map(|(key, _)| key.clone())
        .collect()
}

pub fn non_string_fields(except: &[&str], record: &Record) -> Vec<String> {
    record
        .iter()
        .filter(|(key, value)| {
            is_truthy(value) && !value.is_string() && !except.contains(&key.as_str())
        })
        .map(|(key, _)| key.clone())
        .collect()
}

pub fn non_bool_fields(fields: &[&str], record: &Record) -> Vec<String> {
    record
        .iter()
        .filter(|(key, value)| {
            is_truthy(value) && !value.is_boolean() && fields.contains(&key.as_str())
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Negative integers are flagged whether or not they are listed.
pub fn non_positive_int_fields(fields: &[&str], record: &Record) -> Vec<String> {
    record
        .iter()
        .filter(|(key, value)| {
            (is_truthy(value) && !is_integer(value) && fields.contains(&key.as_str()))
                || (is_integer(value) && is_negative(value))
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Negative floats are flagged whether or not they are listed.
pub fn non_positive_float_fields(fields: &[&str], record: &Record) -> Vec<String> {
    record
        .iter()
        .filter(|(key, value)| {
            (is_truthy(value) && !is_float(value) && fields.contains(&key.as_str()))
                || (is_float(value) && is_negative(value))
        })
        .map(|(key, _)| key.clone())
        .collect()
}

pub fn shape_violations(fields: &[&str], record: &Record, shape: ExpectedShape) -> Vec<String> {
    record
        .iter()
        .filter(|(key, value)| {
            fields.contains(&key.as_str()) && !has_shape(&without_whitespace(value), shape)
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Fields breaking their bound, paired with the bound they broke.
pub fn size_violations(
    kind: SizeKind,
    bounds: &[SizeBound],
    record: &Record,
) -> Vec<(String, SizeLimit)> {
    let mut violations = Vec::new();
    for (key, value) in record {
        let Some(bound) = bounds.iter().find(|b| b.field == key) else {
            continue;
        };
        let size = match bound.limit {
            SizeLimit::Chars(_) => render(value).chars().count(),
            SizeLimit::DecimalPlaces(_) => decimal_places(value),
        };
        let limit = match bound.limit {
            SizeLimit::Chars(n) | SizeLimit::DecimalPlaces(n) => n,
        };
        let broken = match kind {
            SizeKind::Maximum => size > limit,
            SizeKind::Minimum => size < limit,
            SizeKind::Exactly => size != limit,
        };
        if broken {
            violations.push((key.clone(), bound.limit));
        }
    }
    violations
}

/// Parse a validity date in [`DATE_FORMAT`].
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

/// First date problem among the listed fields, if any.
pub fn date_problem(fields: &[&str], record: &Record, now: NaiveDateTime) -> Option<DateProblem> {
    for (key, value) in record {
        if !fields.contains(&key.as_str()) {
            continue;
        }
        let Some(date) = parse_date(value) else {
            return Some(DateProblem::Incorrect);
        };
        if date.and_time(NaiveTime::MIN) < now {
            return Some(DateProblem::Expired);
        }
    }
    None
}

pub fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

fn has_invalid_email(record: &Record) -> bool {
    record
        .get("email")
        .is_some_and(|value| !value.as_str().is_some_and(is_valid_email))
}
