//! Per-form business-rule validators.
//!
//! Each submodule owns one form: its typed submission, its `FORM_NAME`, and a
//! `validate(form, ctx)` entry point. [`FormSubmission`] routes an untyped
//! JSON payload from the data-capture framework to the right validator.

pub mod antenatal_enrollment;
pub mod breastfeeding_questionnaire;
pub mod common;
pub mod maternal_delivery;
pub mod maternal_diagnoses;
pub mod obstetrical_history;
pub mod rapid_test_counseling;
pub mod screening_prior_participants;
pub mod social_work_referral;

use serde::{Deserialize, Serialize};

use crate::context::ValidationContext;
use crate::error::CoreError;
use crate::validation::Rejection;

pub use antenatal_enrollment::AntenatalEnrollment;
pub use breastfeeding_questionnaire::BreastfeedingQuestionnaire;
pub use maternal_delivery::MaternalDelivery;
pub use maternal_diagnoses::MaternalDiagnoses;
pub use obstetrical_history::ObstetricalHistory;
pub use rapid_test_counseling::RapidTestCounseling;
pub use screening_prior_participants::ScreeningPriorParticipants;
pub use social_work_referral::SocialWorkReferral;

/// A submission for any of the validated forms, tagged by form name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FormSubmission {
    AntenatalEnrollment(AntenatalEnrollment),
    BreastfeedingQuestionnaire(BreastfeedingQuestionnaire),
    SocialWorkReferral(SocialWorkReferral),
    RapidTestCounseling(RapidTestCounseling),
    MaternalDelivery(MaternalDelivery),
    MaternalDiagnoses(MaternalDiagnoses),
    ObstetricalHistory(ObstetricalHistory),
    ScreeningPriorParticipants(ScreeningPriorParticipants),
}

impl FormSubmission {
    /// Parse a `{"form": "<form_name>", ...fields}` payload.
    pub fn from_json(payload: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn form_name(&self) -> &'static str {
        match self {
            Self::AntenatalEnrollment(_) => antenatal_enrollment::FORM_NAME,
            Self::BreastfeedingQuestionnaire(_) => breastfeeding_questionnaire::FORM_NAME,
            Self::SocialWorkReferral(_) => social_work_referral::FORM_NAME,
            Self::RapidTestCounseling(_) => rapid_test_counseling::FORM_NAME,
            Self::MaternalDelivery(_) => maternal_delivery::FORM_NAME,
            Self::MaternalDiagnoses(_) => maternal_diagnoses::FORM_NAME,
            Self::ObstetricalHistory(_) => obstetrical_history::FORM_NAME,
            Self::ScreeningPriorParticipants(_) => screening_prior_participants::FORM_NAME,
        }
    }

    /// The enrolled subject the submission belongs to, when the form has one.
    /// Screening happens before a subject identifier is issued.
    pub fn subject_identifier(&self) -> Option<&str> {
        let subject = match self {
            Self::AntenatalEnrollment(form) => Some(form.subject_identifier.as_str()),
            Self::BreastfeedingQuestionnaire(form) => form.subject_identifier.as_deref(),
            Self::SocialWorkReferral(form) => form.subject_identifier.as_deref(),
            Self::RapidTestCounseling(form) => Some(form.maternal_visit.subject_identifier.as_str()),
            Self::MaternalDelivery(form) => Some(form.subject_identifier.as_str()),
            Self::MaternalDiagnoses(form) => Some(form.maternal_visit.subject_identifier.as_str()),
            Self::ObstetricalHistory(form) => Some(form.maternal_visit.subject_identifier.as_str()),
            Self::ScreeningPriorParticipants(_) => None,
        };
        subject.filter(|s| !s.is_empty())
    }
}

/// Validate a submission with its form's validator.
pub fn validate_submission(
    submission: &FormSubmission,
    ctx: &ValidationContext<'_>,
) -> Result<(), Rejection> {
    match submission {
        FormSubmission::AntenatalEnrollment(form) => antenatal_enrollment::validate(form, ctx),
        FormSubmission::BreastfeedingQuestionnaire(form) => {
            breastfeeding_questionnaire::validate(form, ctx)
        }
        FormSubmission::SocialWorkReferral(form) => social_work_referral::validate(form, ctx),
        FormSubmission::RapidTestCounseling(form) => rapid_test_counseling::validate(form, ctx),
        FormSubmission::MaternalDelivery(form) => maternal_delivery::validate(form, ctx),
        FormSubmission::MaternalDiagnoses(form) => maternal_diagnoses::validate(form, ctx),
        FormSubmission::ObstetricalHistory(form) => obstetrical_history::validate(form, ctx),
        FormSubmission::ScreeningPriorParticipants(form) => {
            screening_prior_participants::validate(form, ctx)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REFER_OTHER;
    use assert_matches::assert_matches;
    use test_support::Fixture;

    #[test]
    fn parses_tagged_payload() {
        let submission = FormSubmission::from_json(
            r#"{"form": "social_work_referral", "referral_reason": ["refer_other"]}"#,
        )
        .unwrap();
        assert_eq!(submission.form_name(), "social_work_referral");
        assert_eq!(submission.subject_identifier(), None);
        assert_matches!(
            submission,
            FormSubmission::SocialWorkReferral(ref form) if form.referral_reason == vec![REFER_OTHER]
        );
    }

    #[test]
    fn unknown_form_is_a_parse_error() {
        let result = FormSubmission::from_json(r#"{"form": "infant_birth"}"#);
        assert_matches!(result, Err(CoreError::Parse(_)));
    }

    #[test]
    fn dispatches_to_form_validator() {
        let fixture = Fixture::empty();
        let submission = FormSubmission::from_json(
            r#"{"form": "social_work_referral", "referral_reason": ["refer_other"]}"#,
        )
        .unwrap();
        let err = validate_submission(&submission, &fixture.ctx()).unwrap_err();
        assert!(err.has_field("reason_other"));
    }
}
