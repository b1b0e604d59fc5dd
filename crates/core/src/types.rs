/// Entity primary keys are UUID v4 strings (36 chars).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A field-name to value mapping, in insertion order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Generate a fresh entity id.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}

/// The instant an operation runs at.
///
/// Timestamps are stamped in UTC; validity dates are compared against the
/// local wall clock.
#[derive(Debug, Clone, Copy)]
pub struct Moment {
    pub utc: Timestamp,
    pub local: chrono::NaiveDateTime,
}

impl Moment {
    pub fn now() -> Self {
        Self {
            utc: chrono::Utc::now(),
            local: chrono::Local::now().naive_local(),
        }
    }
}
