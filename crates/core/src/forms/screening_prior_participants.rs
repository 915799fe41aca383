//! Screening of participants from prior BHP studies.

use serde::{Deserialize, Serialize};

use crate::constants::{INTERESTED, NO, UNKNOWN};
use crate::context::ValidationContext;
use crate::validation::combinators::{
    applicable_if, not_applicable_if, not_applicable_only, validate_other_specify,
};
use crate::validation::{FieldViolation, Halted, Rejection, Report, RuleKind, RuleResult};

pub const FORM_NAME: &str = "screening_prior_participants";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningPriorParticipants {
    pub screening_identifier: Option<String>,
    pub child_alive: Option<String>,
    pub mother_alive: Option<String>,
    pub flourish_participation: Option<String>,
    pub reason_not_to_participate: Option<String>,
    pub reason_not_to_participate_other: Option<String>,
}

pub fn validate(
    form: &ScreeningPriorParticipants,
    ctx: &ValidationContext<'_>,
) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = check(form, &mut report);
    report.finish(FORM_NAME, form.screening_identifier.as_deref())
}

fn check(form: &ScreeningPriorParticipants, report: &mut Report) -> Result<(), Halted> {
    let child_alive = form.child_alive.as_deref();
    report.record(not_applicable_if(
        &[NO],
        child_alive,
        "mother_alive",
        &form.mother_alive,
    ))?;
    report.record(not_applicable_only(
        &[NO],
        child_alive,
        "flourish_participation",
        &form.flourish_participation,
    ))?;

    report.record(validate_participation(form))?;

    report.record(applicable_if(
        &[NO],
        form.flourish_participation.as_deref(),
        "reason_not_to_participate",
        &form.reason_not_to_participate,
    ))?;
    report.record(validate_other_specify(
        form.reason_not_to_participate.as_deref(),
        "reason_not_to_participate_other",
        &form.reason_not_to_participate_other,
    ))
}

/// Only a living mother can be the interested caregiver.
fn validate_participation(form: &ScreeningPriorParticipants) -> RuleResult {
    let mother_gone = matches!(form.mother_alive.as_deref(), Some(NO) | Some(UNKNOWN));
    if mother_gone && form.flourish_participation.as_deref() == Some(INTERESTED) {
        return Err(FieldViolation::field(
            "flourish_participation",
            RuleKind::Consistency,
            "The mother from the previous study is not alive, Please correct interest for \
             `another caregiver`. ",
        ));
    }
    Ok(())
}
