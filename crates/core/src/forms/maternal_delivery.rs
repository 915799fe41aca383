//! Maternal labour and delivery form.
//!
//! Steps run in a fixed order. The ultrasound and latest-visit lookups are
//! prerequisites: when either is missing validation stops there, whatever the
//! mode.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{C_SECTION, NONE, NOT_APPLICABLE, OTHER, YES};
use crate::context::ValidationContext;
use crate::status::HivStatus;
use crate::types::{Date, RecordId, Timestamp};
use crate::validation::combinators::{
    m2m_other_specify, m2m_single_selection_if, required_if, required_if_true,
    validate_other_specify,
};
use crate::validation::rules::reword;
use crate::validation::{FieldViolation, Halted, Rejection, Report, RuleKind, RuleResult};

use super::common::{
    complete_ultrasound_first, latest_visit_hiv_status, schema_violations,
    validate_against_consent_datetime,
};

pub const FORM_NAME: &str = "maternal_delivery";
const FORM_TITLE: &str = "Maternal Labour Delivery Form";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MaternalDelivery {
    pub id: Option<RecordId>,
    /// Consent the delivery is recorded under. The latest consent when absent.
    pub consent_id: Option<RecordId>,
    #[validate(length(min = 1, message = "Subject identifier is required."))]
    pub subject_identifier: String,
    pub report_datetime: Option<Timestamp>,
    pub delivery_datetime: Option<Timestamp>,
    pub mode_delivery: Option<String>,
    pub mode_delivery_other: Option<String>,
    pub csection_reason: Option<String>,
    pub csection_reason_other: Option<String>,
    pub delivery_hospital: Option<String>,
    pub delivery_hospital_other: Option<String>,
    pub valid_regiment_duration: Option<String>,
    pub arv_initiation_date: Option<Date>,
    #[validate(range(min = 0, max = 10, message = "Enter a count between 0 and 10."))]
    pub still_births: Option<i32>,
    #[validate(range(min = 0, max = 10, message = "Enter a count between 0 and 10."))]
    pub live_infants_to_register: Option<i32>,
    pub delivery_complications: Vec<String>,
    pub delivery_complications_other: Option<String>,
}

pub fn validate(form: &MaternalDelivery, ctx: &ValidationContext<'_>) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = check(form, ctx, &mut report);
    report.finish(FORM_NAME, Some(&form.subject_identifier))
}

fn check(
    form: &MaternalDelivery,
    ctx: &ValidationContext<'_>,
    report: &mut Report,
) -> Result<(), Halted> {
    report.extend(schema_violations(form))?;
    let subject = form.subject_identifier.as_str();

    report.record(validate_against_consent_datetime(
        ctx.lookups,
        subject,
        form.consent_id,
        form.report_datetime,
    ))?;

    let csection = form
        .mode_delivery
        .as_deref()
        .is_some_and(|mode| mode.contains(C_SECTION));
    report.record(required_if_true(
        csection,
        "csection_reason",
        &form.csection_reason,
    ))?;

    report.prerequisite(
        ctx.lookups
            .ultrasound(subject, None)
            .ok_or_else(complete_ultrasound_first),
    )?;

    let status = report.prerequisite(latest_visit_hiv_status(
        ctx.lookups,
        ctx.resolver,
        subject,
        FORM_TITLE,
    ))?;
    report.record(validate_valid_regime_hiv_pos_only(
        form,
        status,
        ctx.config.arv_min_weeks_before_delivery,
    ))?;

    report.record(validate_still_births(form))?;
    report.record(validate_initiation_date(form, ctx))?;

    report.record(validate_other_specify(
        form.delivery_hospital.as_deref(),
        "delivery_hospital_other",
        &form.delivery_hospital_other,
    ))?;
    report.record(validate_other_specify(
        form.mode_delivery.as_deref(),
        "mode_delivery_other",
        &form.mode_delivery_other,
    ))?;
    report.record(validate_other_specify(
        form.csection_reason.as_deref(),
        "csection_reason_other",
        &form.csection_reason_other,
    ))?;

    report.record(m2m_single_selection_if(
        &[OTHER, NONE],
        "delivery_complications",
        &form.delivery_complications,
    ))?;
    report.record(m2m_other_specify(
        &[OTHER],
        &form.delivery_complications,
        "delivery_complications_other",
        &form.delivery_complications_other,
    ))
}

/// Regimen duration is only answered for HIV positive mothers, and a valid
/// regimen must have started early enough before delivery.
fn validate_valid_regime_hiv_pos_only(
    form: &MaternalDelivery,
    status: HivStatus,
    min_weeks: u32,
) -> RuleResult {
    let regimen = form.valid_regiment_duration.as_deref();

    if !status.is_positive() {
        if regimen != Some(NOT_APPLICABLE) {
            return Err(FieldViolation::field(
                "valid_regiment_duration",
                RuleKind::NotApplicable,
                format!(
                    "Participant's HIV status is {status}, valid regimen duration should be \
                     Not Applicable."
                ),
            ));
        }
        if form.arv_initiation_date.is_some() {
            return Err(FieldViolation::field(
                "arv_initiation_date",
                RuleKind::NotRequired,
                format!(
                    "Participant's HIV status is {status}, arv initiation date should not filled."
                ),
            ));
        }
        return Ok(());
    }

    if regimen != Some(YES) {
        return Err(FieldViolation::field(
            "valid_regiment_duration",
            RuleKind::Consistency,
            "Participant is HIV+ valid regimen duration should be YES. Please correct.",
        ));
    }
    required_if(&[YES], regimen, "arv_initiation_date", &form.arv_initiation_date).map_err(
        reword(
            RuleKind::Required,
            "You indicated participant was on valid regimen, please give a valid arv \
             initiation date.",
        ),
    )?;

    if let (Some(delivery), Some(initiated)) = (form.delivery_datetime, form.arv_initiation_date) {
        let earliest = delivery
            .date_naive()
            .checked_sub_signed(Duration::weeks(i64::from(min_weeks)));
        if earliest.map_or(true, |earliest| earliest < initiated) {
            return Err(FieldViolation::field(
                "delivery_datetime",
                RuleKind::DateWindow,
                format!(
                    "You indicated that the mother was on REGIMEN for a valid duration, but \
                     delivery date is within {min_weeks}weeks of art initiation date. Please \
                     correct."
                ),
            ));
        }
    }
    Ok(())
}

fn validate_still_births(form: &MaternalDelivery) -> RuleResult {
    match (form.still_births, form.live_infants_to_register) {
        (Some(0), live) if live != Some(1) => Err(FieldViolation::field(
            "live_infants_to_register",
            RuleKind::Consistency,
            "If still birth is 0 then live birth should be 1.",
        )),
        (Some(1), live) if live != Some(0) => Err(FieldViolation::field(
            "still_births",
            RuleKind::Consistency,
            "If live births is 1 then still birth should be 0.",
        )),
        _ => Ok(()),
    }
}

/// The initiation date must match the one captured on the pre-pregnancy ARV form.
fn validate_initiation_date(form: &MaternalDelivery, ctx: &ValidationContext<'_>) -> RuleResult {
    let Some(arvs) = ctx.lookups.arvs_pre_pregnancy(&form.subject_identifier) else {
        return Ok(());
    };
    if arvs.art_start_date == form.arv_initiation_date {
        return Ok(());
    }
    let expected = arvs
        .art_start_date
        .map(|date| date.to_string())
        .unwrap_or_default();
    Err(FieldViolation::field(
        "arv_initiation_date",
        RuleKind::Consistency,
        format!(
            "The date does not corrospond with the date from Arv Pregnancy CRF, the date \
             should be {expected} "
        ),
    ))
}
