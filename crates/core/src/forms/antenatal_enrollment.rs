//! Antenatal enrollment form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{DWTA, IND, NEG, NO, POS, YES};
use crate::context::ValidationContext;
use crate::types::{Date, RecordId, Timestamp};
use crate::validation::combinators::required_if;
use crate::validation::{FieldViolation, Halted, Rejection, Report, RuleKind, RuleResult};

use super::common::{schema_violations, validate_against_consent_datetime};

pub const FORM_NAME: &str = "antenatal_enrollment";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AntenatalEnrollment {
    pub id: Option<RecordId>,
    #[validate(length(min = 1, message = "Subject identifier is required."))]
    pub subject_identifier: String,
    pub report_datetime: Option<Timestamp>,
    pub knows_lmp: Option<String>,
    pub last_period_date: Option<Date>,
    pub rapid_test_done: Option<String>,
    pub rapid_test_date: Option<Date>,
    pub rapid_test_result: Option<String>,
    pub week32_test: Option<String>,
    pub week32_test_date: Option<Date>,
    pub week32_result: Option<String>,
    pub current_hiv_status: Option<String>,
}

pub fn validate(form: &AntenatalEnrollment, ctx: &ValidationContext<'_>) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = check(form, ctx, &mut report);
    report.finish(FORM_NAME, Some(&form.subject_identifier))
}

fn check(
    form: &AntenatalEnrollment,
    ctx: &ValidationContext<'_>,
    report: &mut Report,
) -> Result<(), Halted> {
    report.extend(schema_violations(form))?;

    report.record(required_if(
        &[YES],
        form.knows_lmp.as_deref(),
        "last_period_date",
        &form.last_period_date,
    ))?;
    report.record(required_if(
        &[YES],
        form.rapid_test_done.as_deref(),
        "rapid_test_date",
        &form.rapid_test_date,
    ))?;
    report.record(required_if(
        &[YES],
        form.rapid_test_done.as_deref(),
        "rapid_test_result",
        &form.rapid_test_result,
    ))?;

    report.record(validate_against_consent_datetime(
        ctx.lookups,
        &form.subject_identifier,
        None,
        form.report_datetime,
    ))?;

    report.record(validate_current_hiv_status(form))?;
    report.record(validate_enrollment_status(form, ctx))
}

/// The current status must agree with whether the participant was ever tested.
fn validate_current_hiv_status(form: &AntenatalEnrollment) -> RuleResult {
    let current = form.current_hiv_status.as_deref();
    let is_one_of = |codes: &[&str]| current.is_some_and(|c| codes.contains(&c));

    match form.week32_test.as_deref() {
        Some(NO) if is_one_of(&[POS, NEG, IND]) => Err(FieldViolation::field(
            "current_hiv_status",
            RuleKind::Consistency,
            "Participant has never tested for HIV. Current HIV status is unknown.",
        )),
        Some(YES) if !is_one_of(&[POS, NEG, IND, DWTA]) => Err(FieldViolation::field(
            "current_hiv_status",
            RuleKind::Consistency,
            "Participant has previously tested for HIV. Current HIV status cannot be \
             unknown or never tested.",
        )),
        _ => Ok(()),
    }
}

fn validate_enrollment_status(form: &AntenatalEnrollment, ctx: &ValidationContext<'_>) -> RuleResult {
    ctx.resolver
        .enrollment_hiv_status(form)
        .map(|_| ())
        .map_err(|err| FieldViolation::global(RuleKind::Consistency, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationMode;
    use crate::constants::UNKNOWN;
    use crate::forms::test_support::{consent_time, Fixture, SUBJECT};
    use chrono::Duration;

    fn valid_form() -> AntenatalEnrollment {
        AntenatalEnrollment {
            subject_identifier: SUBJECT.to_string(),
            report_datetime: Some(consent_time() + Duration::days(1)),
            knows_lmp: Some(YES.to_string()),
            last_period_date: consent_time().date_naive().checked_sub_days(chrono::Days::new(90)),
            rapid_test_done: Some(NO.to_string()),
            week32_test: Some(YES.to_string()),
            current_hiv_status: Some(NEG.to_string()),
            ..AntenatalEnrollment::default()
        }
    }

    #[test]
    fn valid_enrollment_passes() {
        let fixture = Fixture::consented();
        assert!(validate(&valid_form(), &fixture.ctx()).is_ok());
    }

    #[test]
    fn saved_enrollment_checks_latest_consent() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            id: Some(RecordId::new_v4()),
            ..valid_form()
        };
        assert!(validate(&form, &fixture.ctx()).is_ok());
    }

    #[test]
    fn last_period_date_required_when_lmp_known() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            last_period_date: None,
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert!(err.has_field("last_period_date"));
    }

    #[test]
    fn rapid_test_result_required_when_test_done() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            rapid_test_done: Some(YES.to_string()),
            rapid_test_date: Some(consent_time().date_naive()),
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert!(err.has_field("rapid_test_result"));
    }

    #[test]
    fn never_tested_cannot_have_known_status() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            week32_test: Some(NO.to_string()),
            current_hiv_status: Some(POS.to_string()),
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert_eq!(
            err.field_errors()["current_hiv_status"],
            "Participant has never tested for HIV. Current HIV status is unknown."
        );
    }

    #[test]
    fn previously_tested_cannot_be_unknown() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            current_hiv_status: Some(UNKNOWN.to_string()),
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert!(err.field_errors()["current_hiv_status"].starts_with("Participant has previously"));
    }

    #[test]
    fn undetermined_enrollment_status_is_global() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            current_hiv_status: Some(DWTA.to_string()),
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert_eq!(
            err.global_errors(),
            vec!["Unable to determine maternal hiv status at enrollment."]
        );
    }

    #[test]
    fn report_before_consent_rejected() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            report_datetime: Some(consent_time() - Duration::days(1)),
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert!(err.has_field("report_datetime"));
    }

    #[test]
    fn collect_all_reports_every_group() {
        let fixture = Fixture::consented().with_mode(ValidationMode::CollectAll);
        let form = AntenatalEnrollment {
            last_period_date: None,
            week32_test: Some(NO.to_string()),
            current_hiv_status: Some(POS.to_string()),
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert!(err.has_field("last_period_date"));
        assert!(err.has_field("current_hiv_status"));
        assert_eq!(err.global_errors().len(), 1);
    }

    #[test]
    fn blank_subject_identifier_is_a_schema_violation() {
        let fixture = Fixture::consented();
        let form = AntenatalEnrollment {
            subject_identifier: String::new(),
            ..valid_form()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert_eq!(err.violations[0].rule, RuleKind::Schema);
    }
}
