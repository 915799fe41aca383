//! Obstetrical history form.
//!
//! Pregnancy and child counts are cross-checked against each other and
//! against the gestational age of the current pregnancy as confirmed by
//! ultrasound.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::context::ValidationContext;
use crate::validation::{FieldViolation, Halted, Rejection, Report, RuleKind, RuleResult};

use super::common::{complete_ultrasound_first, schema_violations, VisitRef};

pub const FORM_NAME: &str = "obstetrical_history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ObstetricalHistory {
    pub maternal_visit: VisitRef,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub prev_pregnancies: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub pregs_24wks_or_more: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub lost_before_24wks: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub lost_after_24wks: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub live_children: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub children_died_b4_5yrs: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub children_died_aft_5yrs: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub children_deliv_before_37wks: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 0, max = 30, message = "Enter a count between 0 and 30."))]
    pub children_deliv_aftr_37wks: Option<i32>,
}

pub fn validate(form: &ObstetricalHistory, ctx: &ValidationContext<'_>) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = check(form, ctx, &mut report);
    report.finish(FORM_NAME, Some(&form.maternal_visit.subject_identifier))
}

fn check(
    form: &ObstetricalHistory,
    ctx: &ValidationContext<'_>,
    report: &mut Report,
) -> Result<(), Halted> {
    let schema = schema_violations(form);
    let malformed = !schema.is_empty();
    report.extend(schema)?;
    if malformed {
        // The count rules only hold for in-range counts.
        return Err(Halted);
    }

    let enrolled = ctx
        .lookups
        .antenatal_enrollment(&form.maternal_visit.subject_identifier)
        .is_some();
    let ga = if enrolled {
        report.prerequisite(ultrasound_ga_confirmed(form, ctx))?
    } else {
        0
    };
    let threshold = ctx.config.gestation_threshold_weeks;

    if enrolled {
        report.record(validate_single_prior_pregnancy(form, ga, threshold))?;
    }
    report.record(validate_prev_pregnancies(form, ga, threshold))?;
    report.record(validate_children_delivery(
        form,
        ga,
        ctx.config.living_children_allowance,
    ))
}

/// Gestational age in weeks confirmed by the ultrasound done at this visit.
fn ultrasound_ga_confirmed(
    form: &ObstetricalHistory,
    ctx: &ValidationContext<'_>,
) -> Result<i32, FieldViolation> {
    let visit = &form.maternal_visit;
    ctx.lookups
        .ultrasound(&visit.subject_identifier, Some(&visit.visit_code))
        .map(|ultrasound| ultrasound.ga_confirmed.unwrap_or(0))
        .ok_or_else(complete_ultrasound_first)
}

/// With exactly one previous pregnancy (the current one), loss and death
/// counts must be zero.
fn validate_single_prior_pregnancy(form: &ObstetricalHistory, ga: i32, threshold: i32) -> RuleResult {
    if form.prev_pregnancies != Some(1) {
        return Ok(());
    }
    let zero_field = |field: &str, value: Option<i32>, qualifier: &str| -> RuleResult {
        if value == Some(0) {
            return Ok(());
        }
        Err(FieldViolation::field(
            field,
            RuleKind::Consistency,
            format!(
                "You indicated previous pregnancies were 1, {field} should be zero as the \
                 current pregnancy is {qualifier}than {threshold} weeks."
            ),
        ))
    };

    if ga >= threshold {
        // Unanswered counts are left to the other checks here.
        for (field, value) in [
            ("lost_before_24wks", form.lost_before_24wks),
            ("lost_after_24wks", form.lost_after_24wks),
            ("children_died_aft_5yrs", form.children_died_aft_5yrs),
        ] {
            if value.is_some() {
                zero_field(field, value, "more ")?;
            }
        }
    } else {
        zero_field("pregs_24wks_or_more", form.pregs_24wks_or_more, "not more ")?;
        zero_field("lost_after_24wks", form.lost_after_24wks, "not more ")?;
    }
    Ok(())
}

fn validate_prev_pregnancies(form: &ObstetricalHistory, ga: i32, threshold: i32) -> RuleResult {
    let pregs_24wks_or_more = count(form.pregs_24wks_or_more);
    let lost_before_24wks = count(form.lost_before_24wks);
    let lost_after_24wks = count(form.lost_after_24wks);

    let offset = i64::from(ga > 0 && ga < threshold);
    if let Some(previous) = form.prev_pregnancies.map(i64::from) {
        if previous > 1 && pregs_24wks_or_more + lost_before_24wks != previous - offset {
            return Err(FieldViolation::global(
                RuleKind::Consistency,
                "Total pregnancies should be equal to sum of pregnancies lost and current",
            ));
        }
    }

    if ga > threshold && pregs_24wks_or_more < 1 {
        return Err(FieldViolation::field(
            "pregs_24wks_or_more",
            RuleKind::Consistency,
            format!(
                "Pregnancies more than {threshold} weeks should be more than 1 including the \
                 current pregnancy"
            ),
        ));
    }

    if lost_after_24wks > pregs_24wks_or_more {
        return Err(FieldViolation::field(
            "lost_after_24wks",
            RuleKind::Consistency,
            format!(
                "Pregnancies lost after {threshold} weeks cannot be more than pregnancies \
                 atleast {threshold} weeks"
            ),
        ));
    }
    Ok(())
}

/// Deliveries must account for every previous pregnancy not lost, and living
/// children cannot exceed deliveries (allowing for multiple births).
fn validate_children_delivery(form: &ObstetricalHistory, ga: i32, allowance: i32) -> RuleResult {
    let (Some(before_37), Some(after_37), Some(lost_before), Some(lost_after)) = (
        form.children_deliv_before_37wks,
        form.children_deliv_aftr_37wks,
        form.lost_before_24wks,
        form.lost_after_24wks,
    ) else {
        return Ok(());
    };
    let delivered = i64::from(before_37) + i64::from(after_37);
    let lost = i64::from(lost_before) + i64::from(lost_after);
    let offset = i64::from(ga != 0);

    if let Some(previous) = form.prev_pregnancies.filter(|&p| p != 0).map(i64::from) {
        if delivered != (previous - offset) - lost {
            return Err(FieldViolation::global(
                RuleKind::Consistency,
                format!(
                    "The sum of Q10 and Q11 must be equal to (Q3 -{offset}) - (Q5 + Q6). \
                     Please correct."
                ),
            ));
        }
    }

    let died = count(form.children_died_b4_5yrs) + count(form.children_died_aft_5yrs);
    if count(form.live_children) > delivered - died + i64::from(allowance) {
        return Err(FieldViolation::field(
            "live_children",
            RuleKind::Consistency,
            "Living children must be equal to pregnancies delivered(Q9 + Q10) and children \
             lost. Please correct.",
        ));
    }
    Ok(())
}

/// An unanswered count, widened so sums cannot overflow.
fn count(value: Option<i32>) -> i64 {
    value.map_or(0, i64::from)
}
