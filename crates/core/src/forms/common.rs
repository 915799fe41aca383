//! Checks shared by several forms.

use validator::Validate;

use crate::lookups::{Lookups, VisitRecord};
use crate::status::{HivStatus, StatusResolver};
use crate::types::{RecordId, Timestamp};
use crate::validation::{FieldViolation, RuleKind, RuleResult};

/// The visit a CRF is attached to, as submitted with the form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisitRef {
    pub id: RecordId,
    pub subject_identifier: String,
    pub visit_code: String,
    pub report_datetime: Timestamp,
}

impl VisitRef {
    /// The visit as a lookup record, for status resolution.
    pub fn to_record(&self) -> VisitRecord {
        VisitRecord {
            id: self.id,
            subject_identifier: self.subject_identifier.clone(),
            visit_code: self.visit_code.clone(),
            report_datetime: self.report_datetime,
            created: self.report_datetime,
        }
    }
}

/// Structural field checks declared with `#[validate(...)]`, as violations.
///
/// Sorted by field name so reports are stable.
pub fn schema_violations<T: Validate>(form: &T) -> Vec<FieldViolation> {
    let Err(errors) = form.validate() else {
        return Vec::new();
    };
    let mut violations = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let name = field.to_string();
        for error in field_errors.iter() {
            let message = match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value ({}).", error.code),
            };
            violations.push(FieldViolation::field(&name, RuleKind::Schema, message));
        }
    }
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// The report datetime must not precede the subject's consent.
pub fn validate_against_consent_datetime(
    lookups: &dyn Lookups,
    subject_identifier: &str,
    record_id: Option<RecordId>,
    report_datetime: Option<Timestamp>,
) -> RuleResult {
    let Some(consent) = lookups.consent(subject_identifier, record_id) else {
        return Err(FieldViolation::global(
            RuleKind::MissingRecord,
            "Please complete Caregiver Consent form before proceeding.",
        ));
    };
    match report_datetime {
        Some(report_datetime) if report_datetime < consent.consent_datetime => {
            Err(FieldViolation::field(
                "report_datetime",
                RuleKind::DateWindow,
                "Report datetime cannot be before consent datetime",
            ))
        }
        _ => Ok(()),
    }
}

/// HIV status as of the subject's latest visit.
pub fn latest_visit_hiv_status(
    lookups: &dyn Lookups,
    resolver: &dyn StatusResolver,
    subject_identifier: &str,
    form_title: &str,
) -> Result<HivStatus, FieldViolation> {
    match lookups.latest_visit(subject_identifier) {
        Some(visit) => Ok(resolver.hiv_status(&visit)),
        None => Err(FieldViolation::global(
            RuleKind::MissingRecord,
            format!("Please complete previous visits before filling in {form_title}."),
        )),
    }
}

pub fn complete_ultrasound_first() -> FieldViolation {
    FieldViolation::global(
        RuleKind::MissingRecord,
        "Please complete ultrasound form first.",
    )
}
