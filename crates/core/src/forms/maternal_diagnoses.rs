//! Maternal diagnoses form.

use serde::{Deserialize, Serialize};

use crate::constants::{DIAGNOSES_NA, OTHER, WHO_NA};
use crate::context::ValidationContext;
use crate::validation::combinators::{
    applicable_if_true, m2m_na_exclusive, m2m_other_specify, m2m_required, NaMessages,
};
use crate::validation::{Halted, Rejection, Report};

use super::common::VisitRef;

pub const FORM_NAME: &str = "maternal_diagnoses";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaternalDiagnoses {
    pub maternal_visit: VisitRef,
    #[serde(default)]
    pub new_diagnoses: Option<String>,
    #[serde(default)]
    pub diagnoses: Vec<String>,
    #[serde(default)]
    pub diagnoses_other: Option<String>,
    #[serde(default)]
    pub has_who_dx: Option<String>,
    #[serde(default)]
    pub who: Vec<String>,
}

pub fn validate(form: &MaternalDiagnoses, ctx: &ValidationContext<'_>) -> Result<(), Rejection> {
    let mut report = Report::new(ctx.config.mode);
    let _ = check(form, ctx, &mut report);
    report.finish(FORM_NAME, Some(&form.maternal_visit.subject_identifier))
}

fn check(
    form: &MaternalDiagnoses,
    ctx: &ValidationContext<'_>,
    report: &mut Report,
) -> Result<(), Halted> {
    report.record(m2m_required("diagnoses", &form.diagnoses))?;
    report.record(m2m_na_exclusive(
        form.new_diagnoses.as_deref(),
        "diagnoses",
        &form.diagnoses,
        DIAGNOSES_NA,
        NaMessages {
            marker_selected: "Participant has new diagnoses, please give a diagnosis",
            marker_missing: "Participant has no new diagnoses, diagnosis should be N/A",
        },
    ))?;
    report.record(m2m_other_specify(
        &[OTHER],
        &form.diagnoses,
        "diagnoses_other",
        &form.diagnoses_other,
    ))?;

    let status = ctx.resolver.hiv_status(&form.maternal_visit.to_record());
    report.record(m2m_required("who", &form.who))?;
    report.record(applicable_if_true(
        status.is_positive(),
        "has_who_dx",
        &form.has_who_dx,
    ))?;

    let has_who_dx = form.has_who_dx.as_deref().unwrap_or_default();
    let marker_missing =
        format!("WHO diagnoses is {has_who_dx}, WHO Stage III/IV should be Not Applicable.");
    report.record(m2m_na_exclusive(
        form.has_who_dx.as_deref(),
        "who",
        &form.who,
        WHO_NA,
        NaMessages {
            marker_selected: "WHO Stage III/IV cannot have Not Applicable in the list. Please \
                              correct.",
            marker_missing: &marker_missing,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationMode;
    use crate::constants::{NOT_APPLICABLE, NO, YES};
    use crate::forms::test_support::{consent_time, visit_ref, Fixture};
    use crate::status::HivStatus;
    use crate::validation::RuleKind;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn sel(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn negative_without_diagnoses() -> MaternalDiagnoses {
        MaternalDiagnoses {
            maternal_visit: visit_ref(consent_time()),
            new_diagnoses: some(NO),
            diagnoses: sel(&[DIAGNOSES_NA]),
            diagnoses_other: None,
            has_who_dx: some(NOT_APPLICABLE),
            who: sel(&[WHO_NA]),
        }
    }

    #[test]
    fn negative_mother_without_diagnoses_passes() {
        let fixture = Fixture::empty();
        assert!(validate(&negative_without_diagnoses(), &fixture.ctx()).is_ok());
    }

    #[test]
    fn empty_diagnoses_required() {
        let fixture = Fixture::empty();
        let form = MaternalDiagnoses {
            diagnoses: Vec::new(),
            ..negative_without_diagnoses()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert_eq!(err.violations[0].rule, RuleKind::Required);
    }

    #[test]
    fn new_diagnoses_cannot_select_not_applicable() {
        let fixture = Fixture::empty();
        let form = MaternalDiagnoses {
            new_diagnoses: some(YES),
            ..negative_without_diagnoses()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert_eq!(
            err.field_errors()["diagnoses"],
            "Participant has new diagnoses, please give a diagnosis"
        );
    }

    #[test]
    fn no_new_diagnoses_must_select_not_applicable() {
        let fixture = Fixture::empty();
        let form = MaternalDiagnoses {
            diagnoses: sel(&["hypertension"]),
            ..negative_without_diagnoses()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert_eq!(
            err.field_errors()["diagnoses"],
            "Participant has no new diagnoses, diagnosis should be N/A"
        );
    }

    #[test]
    fn positive_mother_must_answer_who_question() {
        let fixture = Fixture::empty().with_status(HivStatus::Positive);
        let err = validate(&negative_without_diagnoses(), &fixture.ctx()).unwrap_err();
        assert!(err.has_field("has_who_dx"));
    }

    #[test]
    fn positive_mother_with_who_diagnoses_passes() {
        let fixture = Fixture::empty().with_status(HivStatus::Positive);
        let form = MaternalDiagnoses {
            has_who_dx: some(YES),
            who: sel(&["pneumocystis_pneumonia"]),
            ..negative_without_diagnoses()
        };
        assert!(validate(&form, &fixture.ctx()).is_ok());
    }

    #[test]
    fn who_not_applicable_message_names_answer() {
        let fixture = Fixture::empty().with_status(HivStatus::Positive);
        let form = MaternalDiagnoses {
            has_who_dx: some(NO),
            who: sel(&["pneumocystis_pneumonia"]),
            ..negative_without_diagnoses()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert_eq!(
            err.field_errors()["who"],
            "WHO diagnoses is No, WHO Stage III/IV should be Not Applicable."
        );
    }

    #[test]
    fn collect_all_reports_diagnoses_and_who() {
        let fixture = Fixture::empty().with_mode(ValidationMode::CollectAll);
        let form = MaternalDiagnoses {
            diagnoses: sel(&["hypertension"]),
            who: sel(&["pneumocystis_pneumonia"]),
            ..negative_without_diagnoses()
        };
        let err = validate(&form, &fixture.ctx()).unwrap_err();
        assert!(err.has_field("diagnoses"));
        assert!(err.has_field("who"));
    }
}
