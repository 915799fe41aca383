use flourish_core::lookups::ConsentRecord;
use flourish_core::types::{RecordId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `flourish_caregiver_subjectconsent`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubjectConsentRow {
    pub id: RecordId,
    pub subject_identifier: String,
    pub consent_datetime: Timestamp,
}

impl From<SubjectConsentRow> for ConsentRecord {
    fn from(row: SubjectConsentRow) -> Self {
        Self {
            id: row.id,
            subject_identifier: row.subject_identifier,
            consent_datetime: row.consent_datetime,
        }
    }
}
