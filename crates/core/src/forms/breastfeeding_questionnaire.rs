//! Breastfeeding questionnaire.
//!
//! A flat list of independent sub-rules. In fail-fast mode only the first
//! failing sub-rule is reported.

use serde::{Deserialize, Serialize};

use crate::constants::{NEG, NO, OTHER, POS, RATHER_NOT_ANSWER, YES};
use crate::context::ValidationContext;
use crate::validation::combinators::{
    m2m_other_specify, require_when, required_if, required_if_true,
};
use crate::validation::{Halted, Rejection, Report};

pub const FORM_NAME: &str = "breastfeeding_questionnaire";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreastfeedingQuestionnaire {
    pub subject_identifier: Option<String>,
    pub during_preg_influencers: Vec<String>,
    pub during_preg_influencers_other: Option<String>,
    pub influenced_during_preg: Option<String>,
    pub after_delivery_influencers: Vec<String>,
    pub after_delivery_influencers_other: Option<String>,
    pub influenced_after_delivery: Option<String>,
    pub hiv_status_during_preg: Option<String>,
    pub hiv_status_known_by: Option<String>,
    pub father_knew_hiv_status: Option<String>,
    pub delivery_advice_vl_results: Option<String>,
    pub delivery_advice_on_viralload: Option<String>,
    pub after_delivery_advice_vl_results: Option<String>,
    pub after_delivery_advice_on_viralload: Option<String>,
    pub breastfeeding_duration: Option<String>,
    pub use_medicines: Option<String>,
    pub training_outcome: Option<String>,
    pub feeding_advice: Option<String>,
    pub received_training: Option<String>,
    pub feeding_hiv_status: Option<String>,
    pub hiv_status_aware: Option<String>,
    pub on_hiv_status_aware: Option<String>,
    pub six_months_feeding: Option<String>,
    pub infant_feeding_reasons: Vec<String>,
    pub infant_feeding_other: Option<String>,
}

pub fn validate(
    form: &BreastfeedingQuestionnaire,
    ctx: &ValidationContext<'_>,
) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = check(form, &mut report);
    report.finish(FORM_NAME, form.subject_identifier.as_deref())
}

fn check(form: &BreastfeedingQuestionnaire, report: &mut Report) -> Result<(), Halted> {
    report.record(m2m_other_specify(
        &[OTHER],
        &form.during_preg_influencers,
        "during_preg_influencers_other",
        &form.during_preg_influencers_other,
    ))?;
    report.record(m2m_other_specify(
        &[OTHER],
        &form.after_delivery_influencers,
        "after_delivery_influencers_other",
        &form.after_delivery_influencers_other,
    ))?;
    report.record(m2m_other_specify(
        &[OTHER],
        &form.infant_feeding_reasons,
        "infant_feeding_other",
        &form.infant_feeding_other,
    ))?;

    report.record(require_when(
        has_named_influencer(&form.during_preg_influencers),
        "influenced_during_preg",
        &form.influenced_during_preg,
    ))?;
    report.record(require_when(
        has_named_influencer(&form.after_delivery_influencers),
        "influenced_after_delivery",
        &form.influenced_after_delivery,
    ))?;

    let withheld_status = matches!(
        form.feeding_hiv_status.as_deref(),
        Some(NO) | Some(RATHER_NOT_ANSWER)
    );
    report.record(required_if_true(
        withheld_status,
        "hiv_status_aware",
        &form.hiv_status_aware,
    ))?;
    report.record(required_if_true(
        withheld_status,
        "on_hiv_status_aware",
        &form.on_hiv_status_aware,
    ))?;

    report.record(required_if(
        &[YES],
        form.six_months_feeding.as_deref(),
        "infant_feeding_reasons",
        &form.infant_feeding_reasons,
    ))?;

    let status = form.hiv_status_during_preg.as_deref();
    let negative = status == Some(NEG);
    let positive = status == Some(POS);

    report.record(required_if_true(
        !negative,
        "use_medicines",
        &form.use_medicines,
    ))?;

    report.record(required_if(
        &[POS],
        status,
        "training_outcome",
        &form.training_outcome,
    ))?;
    report.record(required_if(&[POS], status, "feeding_advice", &form.feeding_advice))?;
    report.record(required_if_true(
        !positive,
        "received_training",
        &form.received_training,
    ))?;

    for (field, answer) in form.status_disclosure_fields() {
        report.record(required_if_true(!negative, field, answer))?;
    }
    Ok(())
}

impl BreastfeedingQuestionnaire {
    /// Questions asked of every mother who was not HIV negative in pregnancy.
    fn status_disclosure_fields(&self) -> [(&'static str, &Option<String>); 7] {
        [
            ("hiv_status_known_by", &self.hiv_status_known_by),
            ("father_knew_hiv_status", &self.father_knew_hiv_status),
            ("delivery_advice_vl_results", &self.delivery_advice_vl_results),
            ("delivery_advice_on_viralload", &self.delivery_advice_on_viralload),
            (
                "after_delivery_advice_vl_results",
                &self.after_delivery_advice_vl_results,
            ),
            (
                "after_delivery_advice_on_viralload",
                &self.after_delivery_advice_on_viralload,
            ),
            ("breastfeeding_duration", &self.breastfeeding_duration),
        ]
    }
}

/// An influencer other than the OTHER marker was selected.
fn has_named_influencer(selections: &[String]) -> bool {
    selections.iter().any(|s| s != OTHER)
}
