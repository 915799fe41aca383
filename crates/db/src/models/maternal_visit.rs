use flourish_core::lookups::VisitRecord;
use flourish_core::types::{RecordId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `flourish_caregiver_maternalvisit`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaternalVisitRow {
    pub id: RecordId,
    pub subject_identifier: String,
    pub visit_code: String,
    pub report_datetime: Timestamp,
    pub created: Timestamp,
}

impl From<MaternalVisitRow> for VisitRecord {
    fn from(row: MaternalVisitRow) -> Self {
        Self {
            id: row.id,
            subject_identifier: row.subject_identifier,
            visit_code: row.visit_code,
            report_datetime: row.report_datetime,
            created: row.created,
        }
    }
}
