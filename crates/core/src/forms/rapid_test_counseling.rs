//! HIV rapid test counseling form.

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::constants::YES;
use crate::context::ValidationContext;
use crate::types::Date;
use crate::validation::combinators::required_if;
use crate::validation::rules::reword;
use crate::validation::{FieldViolation, Halted, Rejection, Report, RuleKind, RuleResult};

use super::common::VisitRef;

pub const FORM_NAME: &str = "rapid_test_counseling";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RapidTestCounseling {
    pub maternal_visit: VisitRef,
    #[serde(default)]
    pub rapid_test_done: Option<String>,
    #[serde(default)]
    pub result_date: Option<Date>,
    #[serde(default)]
    pub result: Option<String>,
}

pub fn validate(form: &RapidTestCounseling, ctx: &ValidationContext<'_>) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = check(form, ctx, &mut report);
    report.finish(FORM_NAME, Some(&form.maternal_visit.subject_identifier))
}

fn check(
    form: &RapidTestCounseling,
    ctx: &ValidationContext<'_>,
    report: &mut Report,
) -> Result<(), Halted> {
    let done = form.rapid_test_done.as_deref();

    report.record(
        required_if(&[YES], done, "result_date", &form.result_date)
            .map_err(reword(
                RuleKind::Required,
                "If a rapid test was processed, what is the result date of the rapid test?",
            ))
            .map_err(reword(
                RuleKind::NotRequired,
                "If a rapid test was not processed, please do not provide the result date.",
            )),
    )?;
    report.record(
        required_if(&[YES], done, "result", &form.result)
            .map_err(reword(
                RuleKind::Required,
                "If a rapid test was processed, what is the result of the rapid test?",
            ))
            .map_err(reword(
                RuleKind::NotRequired,
                "If a rapid test was not processed, please do not provide the result.",
            )),
    )?;

    report.record(validate_test_date(
        form.result_date,
        form.maternal_visit.report_datetime.date_naive(),
        ctx.config.rapid_test_max_age_months,
    ))
}

/// The result must be less than `max_age_months` calendar months old on the
/// visit's report date.
fn validate_test_date(result_date: Option<Date>, report_date: Date, max_age_months: u32) -> RuleResult {
    let Some(result_date) = result_date else {
        return Ok(());
    };
    let Some(cutoff) = report_date.checked_sub_months(Months::new(max_age_months)) else {
        return Ok(());
    };
    if result_date <= cutoff {
        return Err(FieldViolation::field(
            "result_date",
            RuleKind::DateWindow,
            format!("The date provided is more than {max_age_months} months old."),
        ));
    }
    Ok(())
}
