//! Caregiver social-work referral form.

use serde::{Deserialize, Serialize};

use crate::constants::REFER_OTHER;
use crate::context::ValidationContext;
use crate::validation::combinators::m2m_other_specify;
use crate::validation::{Rejection, Report};

pub const FORM_NAME: &str = "social_work_referral";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialWorkReferral {
    pub subject_identifier: Option<String>,
    pub referral_reason: Vec<String>,
    pub reason_other: Option<String>,
}

pub fn validate(form: &SocialWorkReferral, ctx: &ValidationContext<'_>) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = report.record(m2m_other_specify(
        &[REFER_OTHER],
        &form.referral_reason,
        "reason_other",
        &form.reason_other,
    ));
    report.finish(FORM_NAME, form.subject_identifier.as_deref())
}
