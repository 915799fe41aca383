//! CRFs attached to a maternal visit, plus the enrollment record.

use flourish_core::lookups::{
    AntenatalEnrollmentRecord, ArvPrePregnancyRecord, UltrasoundRecord,
};
use flourish_core::status::HivStatus;
use flourish_core::types::{Date, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ── Ultrasound ───────────────────────────────────────────────────────

/// An ultrasound joined with its visit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UltrasoundRow {
    pub subject_identifier: String,
    pub visit_code: String,
    pub ga_confirmed: Option<i32>,
}

impl From<UltrasoundRow> for UltrasoundRecord {
    fn from(row: UltrasoundRow) -> Self {
        Self {
            subject_identifier: row.subject_identifier,
            visit_code: row.visit_code,
            ga_confirmed: row.ga_confirmed,
        }
    }
}

// ── ARVs before pregnancy ────────────────────────────────────────────

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArvPrePregnancyRow {
    pub subject_identifier: String,
    pub art_start_date: Option<Date>,
}

impl From<ArvPrePregnancyRow> for ArvPrePregnancyRecord {
    fn from(row: ArvPrePregnancyRow) -> Self {
        Self {
            subject_identifier: row.subject_identifier,
            art_start_date: row.art_start_date,
        }
    }
}

// ── Antenatal enrollment ─────────────────────────────────────────────

/// A row from `flourish_caregiver_antenatalenrollment`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AntenatalEnrollmentRow {
    pub subject_identifier: String,
    pub report_datetime: Timestamp,
    pub enrollment_hiv_status: Option<String>,
}

impl From<AntenatalEnrollmentRow> for AntenatalEnrollmentRecord {
    fn from(row: AntenatalEnrollmentRow) -> Self {
        Self {
            subject_identifier: row.subject_identifier,
            report_datetime: row.report_datetime,
            enrollment_hiv_status: row.enrollment_hiv_status,
        }
    }
}

// ── HIV test results ─────────────────────────────────────────────────

/// A rapid test result recorded at a maternal visit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HivTestResultRow {
    pub visit_report_datetime: Timestamp,
    pub result: Option<String>,
}

impl HivTestResultRow {
    /// The recorded result, when it is a definite POS/NEG/IND code.
    pub fn status(&self) -> Option<HivStatus> {
        match self.result.as_deref().map(HivStatus::from_code) {
            Some(HivStatus::Unknown) | None => None,
            status => status,
        }
    }
}
