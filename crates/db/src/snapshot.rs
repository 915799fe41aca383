//! Per-subject snapshot of the records the validators consult.
//!
//! Validation is synchronous, so everything a submission might look up is
//! fetched up front and served from memory.

use flourish_core::lookups::{
    AntenatalEnrollmentRecord, ArvPrePregnancyRecord, ConsentRecord, InMemoryLookups, Lookups,
    UltrasoundRecord, VisitRecord,
};
use flourish_core::status::{HivStatus, StatusResolver};
use flourish_core::types::RecordId;
use flourish_core::{CoreError, FormSubmission, ValidationConfig, ValidationContext};
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::crf::HivTestResultRow;
use crate::repositories::{
    AntenatalEnrollmentRepo, ArvPrePregnancyRepo, ConsentRepo, HivStatusRepo, MaternalVisitRepo,
    UltrasoundRepo,
};

#[derive(Debug, Clone, Default)]
pub struct SubjectSnapshot {
    records: InMemoryLookups,
    hiv_results: Vec<HivTestResultRow>,
    enrollment_status: Option<HivStatus>,
}

impl SubjectSnapshot {
    pub fn new(records: InMemoryLookups) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn with_hiv_result(mut self, result: HivTestResultRow) -> Self {
        self.hiv_results.push(result);
        self
    }

    /// Status recorded at enrollment, used when no test result predates a visit.
    pub fn with_enrollment_status(mut self, code: Option<&str>) -> Self {
        self.enrollment_status = code
            .map(HivStatus::from_code)
            .filter(|status| *status != HivStatus::Unknown);
        self
    }

    /// Fetch every record the validators may consult for `subject_identifier`.
    pub async fn load(pool: &PgPool, subject_identifier: &str) -> Result<Self, sqlx::Error> {
        let consents = ConsentRepo::list_for_subject(pool, subject_identifier).await?;
        let visits = MaternalVisitRepo::list_for_subject(pool, subject_identifier).await?;
        let ultrasounds = UltrasoundRepo::list_for_subject(pool, subject_identifier).await?;
        let arvs = ArvPrePregnancyRepo::find_for_subject(pool, subject_identifier).await?;
        let enrollment = AntenatalEnrollmentRepo::find_for_subject(pool, subject_identifier).await?;
        let hiv_results = HivStatusRepo::list_results(pool, subject_identifier).await?;

        let mut records = consents
            .into_iter()
            .fold(InMemoryLookups::new(), |r, row| r.with_consent(row.into()));
        records = visits
            .into_iter()
            .fold(records, |r, row| r.with_visit(row.into()));
        records = ultrasounds
            .into_iter()
            .fold(records, |r, row| r.with_ultrasound(row.into()));
        if let Some(row) = arvs {
            records = records.with_arvs_pre_pregnancy(row.into());
        }
        let enrollment_status = enrollment
            .as_ref()
            .and_then(|row| row.enrollment_hiv_status.clone());
        if let Some(row) = enrollment {
            records = records.with_enrollment(row.into());
        }

        tracing::debug!(
            subject_identifier,
            hiv_results = hiv_results.len(),
            "Loaded subject snapshot"
        );
        let snapshot = Self {
            records,
            hiv_results,
            enrollment_status: None,
        };
        Ok(snapshot.with_enrollment_status(enrollment_status.as_deref()))
    }
}

impl Lookups for SubjectSnapshot {
    fn consent(
        &self,
        subject_identifier: &str,
        record_id: Option<RecordId>,
    ) -> Option<ConsentRecord> {
        self.records.consent(subject_identifier, record_id)
    }

    fn latest_visit(&self, subject_identifier: &str) -> Option<VisitRecord> {
        self.records.latest_visit(subject_identifier)
    }

    fn ultrasound(
        &self,
        subject_identifier: &str,
        visit_code: Option<&str>,
    ) -> Option<UltrasoundRecord> {
        self.records.ultrasound(subject_identifier, visit_code)
    }

    fn arvs_pre_pregnancy(&self, subject_identifier: &str) -> Option<ArvPrePregnancyRecord> {
        self.records.arvs_pre_pregnancy(subject_identifier)
    }

    fn antenatal_enrollment(&self, subject_identifier: &str) -> Option<AntenatalEnrollmentRecord> {
        self.records.antenatal_enrollment(subject_identifier)
    }
}

impl StatusResolver for SubjectSnapshot {
    /// The latest definite test result recorded at or before `visit`, falling
    /// back to the status captured at enrollment.
    fn hiv_status(&self, visit: &VisitRecord) -> HivStatus {
        self.hiv_results
            .iter()
            .filter(|result| result.visit_report_datetime <= visit.report_datetime)
            .filter_map(|result| Some((result.visit_report_datetime, result.status()?)))
            .max_by_key(|(recorded, _)| *recorded)
            .map(|(_, status)| status)
            .or(self.enrollment_status)
            .unwrap_or(HivStatus::Unknown)
    }
}

/// Load the submitting subject's records and validate `submission` against them.
pub async fn validate_submission(
    pool: &PgPool,
    submission: &FormSubmission,
    config: &ValidationConfig,
) -> Result<(), DbError> {
    let snapshot = match submission.subject_identifier() {
        Some(subject_identifier) => SubjectSnapshot::load(pool, subject_identifier).await?,
        None => SubjectSnapshot::default(),
    };
    let ctx = ValidationContext::new(&snapshot, &snapshot, config);
    flourish_core::validate_submission(submission, &ctx).map_err(CoreError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use flourish_core::forms::maternal_diagnoses::{self, MaternalDiagnoses};
    use flourish_core::forms::common::VisitRef;

    const SUBJECT: &str = "B142-040990462-6";

    fn at(month: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, 1, 9, 0, 0).unwrap()
    }

    fn visit(report_datetime: DateTime<Utc>) -> VisitRecord {
        VisitRecord {
            id: RecordId::new_v4(),
            subject_identifier: SUBJECT.to_string(),
            visit_code: "2000M".to_string(),
            report_datetime,
            created: report_datetime,
        }
    }

    fn result(month: u32, code: &str) -> HivTestResultRow {
        HivTestResultRow {
            visit_report_datetime: at(month),
            result: Some(code.to_string()),
        }
    }

    #[test]
    fn status_uses_latest_result_before_visit() {
        let snapshot = SubjectSnapshot::default()
            .with_hiv_result(result(1, "NEG"))
            .with_hiv_result(result(3, "POS"))
            .with_hiv_result(result(6, "NEG"));
        assert_eq!(snapshot.hiv_status(&visit(at(4))), HivStatus::Positive);
        assert_eq!(snapshot.hiv_status(&visit(at(2))), HivStatus::Negative);
    }

    #[test]
    fn status_falls_back_to_enrollment() {
        let snapshot = SubjectSnapshot::default()
            .with_hiv_result(result(6, "POS"))
            .with_enrollment_status(Some("NEG"));
        assert_eq!(snapshot.hiv_status(&visit(at(2))), HivStatus::Negative);
    }

    #[test]
    fn status_unknown_without_any_record() {
        let snapshot = SubjectSnapshot::default().with_enrollment_status(Some("never_tested"));
        assert_eq!(snapshot.hiv_status(&visit(at(2))), HivStatus::Unknown);
    }

    #[test]
    fn lookups_delegate_to_loaded_records() {
        let latest = visit(at(5));
        let records = InMemoryLookups::new()
            .with_visit(visit(at(2)))
            .with_visit(latest.clone());
        let snapshot = SubjectSnapshot::new(records);
        assert_eq!(snapshot.latest_visit(SUBJECT), Some(latest));
        assert_eq!(snapshot.consent(SUBJECT, None), None);
    }

    #[test]
    fn snapshot_drives_status_dependent_rules() {
        let snapshot = SubjectSnapshot::default().with_hiv_result(result(1, "POS"));
        let config = ValidationConfig::default();
        let ctx = ValidationContext::new(&snapshot, &snapshot, &config);
        let form = MaternalDiagnoses {
            maternal_visit: VisitRef {
                id: RecordId::new_v4(),
                subject_identifier: SUBJECT.to_string(),
                visit_code: "2000M".to_string(),
                report_datetime: at(1) + Duration::days(30),
            },
            new_diagnoses: Some("No".to_string()),
            diagnoses: vec!["mdiag_na".to_string()],
            diagnoses_other: None,
            has_who_dx: Some("N/A".to_string()),
            who: vec!["who_na".to_string()],
        };
        let err = maternal_diagnoses::validate(&form, &ctx).unwrap_err();
        assert!(err.has_field("has_who_dx"));
    }
}
