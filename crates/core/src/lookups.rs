//! Related records consulted by the validators.
//!
//! The validators never reach into a data store themselves. Each point lookup
//! they need is a method on [`Lookups`], implemented by the database crate
//! (a per-subject snapshot) or by [`InMemoryLookups`] in tests.

use serde::{Deserialize, Serialize};

use crate::types::{Date, RecordId, Timestamp};

/// A caregiver consent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub id: RecordId,
    pub subject_identifier: String,
    pub consent_datetime: Timestamp,
}

/// A maternal visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: RecordId,
    pub subject_identifier: String,
    pub visit_code: String,
    pub report_datetime: Timestamp,
    pub created: Timestamp,
}

/// An ultrasound CRF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UltrasoundRecord {
    pub subject_identifier: String,
    pub visit_code: String,
    /// Gestational age in weeks confirmed by the ultrasound.
    pub ga_confirmed: Option<i32>,
}

/// ARVs taken before the current pregnancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArvPrePregnancyRecord {
    pub subject_identifier: String,
    pub art_start_date: Option<Date>,
}

/// An antenatal enrollment already on file for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntenatalEnrollmentRecord {
    pub subject_identifier: String,
    pub report_datetime: Timestamp,
    pub enrollment_hiv_status: Option<String>,
}

/// Point lookups against the study's records. Each returns at most one row.
pub trait Lookups {
    /// The consent for `record_id` when given, else the subject's latest consent.
    fn consent(&self, subject_identifier: &str, record_id: Option<RecordId>)
        -> Option<ConsentRecord>;

    /// The subject's most recently created visit.
    fn latest_visit(&self, subject_identifier: &str) -> Option<VisitRecord>;

    /// The subject's ultrasound, restricted to `visit_code` when given.
    fn ultrasound(&self, subject_identifier: &str, visit_code: Option<&str>)
        -> Option<UltrasoundRecord>;

    fn arvs_pre_pregnancy(&self, subject_identifier: &str) -> Option<ArvPrePregnancyRecord>;

    fn antenatal_enrollment(&self, subject_identifier: &str) -> Option<AntenatalEnrollmentRecord>;
}

/// In-memory implementation of [`Lookups`] for testing and offline checks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookups {
    consents: Vec<ConsentRecord>,
    visits: Vec<VisitRecord>,
    ultrasounds: Vec<UltrasoundRecord>,
    arvs_pre_pregnancy: Vec<ArvPrePregnancyRecord>,
    enrollments: Vec<AntenatalEnrollmentRecord>,
}

impl InMemoryLookups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_consent(mut self, consent: ConsentRecord) -> Self {
        self.consents.push(consent);
        self
    }

    pub fn with_visit(mut self, visit: VisitRecord) -> Self {
        self.visits.push(visit);
        self
    }

    pub fn with_ultrasound(mut self, ultrasound: UltrasoundRecord) -> Self {
        self.ultrasounds.push(ultrasound);
        self
    }

    pub fn with_arvs_pre_pregnancy(mut self, record: ArvPrePregnancyRecord) -> Self {
        self.arvs_pre_pregnancy.push(record);
        self
    }

    pub fn with_enrollment(mut self, enrollment: AntenatalEnrollmentRecord) -> Self {
        self.enrollments.push(enrollment);
        self
    }
}

impl Lookups for InMemoryLookups {
    fn consent(
        &self,
        subject_identifier: &str,
        record_id: Option<RecordId>,
    ) -> Option<ConsentRecord> {
        let mut consents = self
            .consents
            .iter()
            .filter(|c| c.subject_identifier == subject_identifier);
        match record_id {
            Some(id) => consents.find(|c| c.id == id).cloned(),
            None => consents.max_by_key(|c| c.consent_datetime).cloned(),
        }
    }

    fn latest_visit(&self, subject_identifier: &str) -> Option<VisitRecord> {
        self.visits
            .iter()
            .filter(|v| v.subject_identifier == subject_identifier)
            .max_by_key(|v| v.created)
            .cloned()
    }

    fn ultrasound(
        &self,
        subject_identifier: &str,
        visit_code: Option<&str>,
    ) -> Option<UltrasoundRecord> {
        self.ultrasounds
            .iter()
            .find(|u| {
                u.subject_identifier == subject_identifier
                    && visit_code.map_or(true, |code| u.visit_code == code)
            })
            .cloned()
    }

    fn arvs_pre_pregnancy(&self, subject_identifier: &str) -> Option<ArvPrePregnancyRecord> {
        self.arvs_pre_pregnancy
            .iter()
            .find(|r| r.subject_identifier == subject_identifier)
            .cloned()
    }

    fn antenatal_enrollment(&self, subject_identifier: &str) -> Option<AntenatalEnrollmentRecord> {
        self.enrollments
            .iter()
            .find(|e| e.subject_identifier == subject_identifier)
            .cloned()
    }
}
