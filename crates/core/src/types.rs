/// Record identifiers issued by the data-capture framework (UUID primary keys).
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates carry no timezone.
pub type Date = chrono::NaiveDate;
