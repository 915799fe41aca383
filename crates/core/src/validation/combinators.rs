//! Standalone rule combinators.
//!
//! Each combinator checks one field against a condition derived from sibling
//! answers and returns the first violation it finds. Default messages follow
//! the data-capture framework's wording; reword them with
//! [`FieldViolation::reword`] where a form needs its own text.

use crate::constants::{NOT_APPLICABLE, OTHER, YES};

use super::answer::Answer;
use super::rules::{FieldViolation, RuleKind, RuleResult};

pub const REQUIRED_MSG: &str = "This field is required.";
pub const NOT_REQUIRED_MSG: &str = "This field is not required.";
pub const APPLICABLE_MSG: &str = "This field is applicable.";
pub const NOT_APPLICABLE_MSG: &str = "This field is not applicable.";

fn matches(responses: &[&str], trigger: Option<&str>) -> bool {
    trigger.is_some_and(|value| responses.contains(&value))
}

fn selected_any(selections: &[String], responses: &[&str]) -> bool {
    selections.iter().any(|s| responses.contains(&s.as_str()))
}

// ---------------------------------------------------------------------------
// Required / not required
// ---------------------------------------------------------------------------

/// `field` must be answered (N/A does not count) when `condition` holds.
pub fn require_when<A: Answer + ?Sized>(condition: bool, field: &str, answer: &A) -> RuleResult {
    if condition && !answer.is_provided() {
        return Err(FieldViolation::field(field, RuleKind::Required, REQUIRED_MSG));
    }
    Ok(())
}

/// `field` must be left empty (or N/A) when `condition` holds.
pub fn forbid_when<A: Answer + ?Sized>(condition: bool, field: &str, answer: &A) -> RuleResult {
    if condition && answer.is_provided() {
        return Err(FieldViolation::field(
            field,
            RuleKind::NotRequired,
            NOT_REQUIRED_MSG,
        ));
    }
    Ok(())
}

/// Required when `condition` holds, not required otherwise.
pub fn required_if_true<A: Answer + ?Sized>(
    condition: bool,
    field: &str,
    answer: &A,
) -> RuleResult {
    require_when(condition, field, answer)?;
    forbid_when(!condition, field, answer)
}

/// Required when `trigger` is one of `responses`, not required otherwise.
pub fn required_if<A: Answer + ?Sized>(
    responses: &[&str],
    trigger: Option<&str>,
    field: &str,
    answer: &A,
) -> RuleResult {
    required_if_true(matches(responses, trigger), field, answer)
}

// ---------------------------------------------------------------------------
// Applicable / not applicable
// ---------------------------------------------------------------------------

/// When `condition` holds the answer must not be N/A; otherwise it must be N/A.
pub fn applicable_if_true<A: Answer + ?Sized>(
    condition: bool,
    field: &str,
    answer: &A,
) -> RuleResult {
    if condition && answer.is_not_applicable() {
        return Err(FieldViolation::field(
            field,
            RuleKind::Applicable,
            APPLICABLE_MSG,
        ));
    }
    if !condition && !answer.is_not_applicable() {
        return Err(FieldViolation::field(
            field,
            RuleKind::NotApplicable,
            NOT_APPLICABLE_MSG,
        ));
    }
    Ok(())
}

pub fn applicable_if<A: Answer + ?Sized>(
    responses: &[&str],
    trigger: Option<&str>,
    field: &str,
    answer: &A,
) -> RuleResult {
    applicable_if_true(matches(responses, trigger), field, answer)
}

/// When `trigger` is one of `responses` the answer must be N/A; otherwise it
/// must not be.
pub fn not_applicable_if<A: Answer + ?Sized>(
    responses: &[&str],
    trigger: Option<&str>,
    field: &str,
    answer: &A,
) -> RuleResult {
    applicable_if_true(!matches(responses, trigger), field, answer)
}

/// One-directional: N/A is enforced only when `trigger` matches.
pub fn not_applicable_only<A: Answer + ?Sized>(
    responses: &[&str],
    trigger: Option<&str>,
    field: &str,
    answer: &A,
) -> RuleResult {
    if matches(responses, trigger) && !answer.is_not_applicable() {
        return Err(FieldViolation::field(
            field,
            RuleKind::NotApplicable,
            NOT_APPLICABLE_MSG,
        ));
    }
    Ok(())
}

/// One-directional: N/A is rejected only when `trigger` matches.
pub fn applicable_only<A: Answer + ?Sized>(
    responses: &[&str],
    trigger: Option<&str>,
    field: &str,
    answer: &A,
) -> RuleResult {
    if matches(responses, trigger) && answer.is_not_applicable() {
        return Err(FieldViolation::field(
            field,
            RuleKind::Applicable,
            APPLICABLE_MSG,
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Other-specify
// ---------------------------------------------------------------------------

/// `other_field` is required exactly when `value` is OTHER.
pub fn validate_other_specify(
    value: Option<&str>,
    other_field: &str,
    other: &Option<String>,
) -> RuleResult {
    required_if_true(value == Some(OTHER), other_field, other)
}

// ---------------------------------------------------------------------------
// Multi-select
// ---------------------------------------------------------------------------

pub fn m2m_required(field: &str, selections: &[String]) -> RuleResult {
    if selections.is_empty() {
        return Err(FieldViolation::field(field, RuleKind::Required, REQUIRED_MSG));
    }
    Ok(())
}

/// `field_other` is required exactly when a selection is one of `responses`.
pub fn m2m_other_specify(
    responses: &[&str],
    selections: &[String],
    field_other: &str,
    other: &Option<String>,
) -> RuleResult {
    required_if_true(selected_any(selections, responses), field_other, other)
}

/// Any of `singles` may only be selected on its own.
pub fn m2m_single_selection_if(singles: &[&str], field: &str, selections: &[String]) -> RuleResult {
    if selections.len() < 2 {
        return Ok(());
    }
    match selections.iter().find(|s| singles.contains(&s.as_str())) {
        Some(single) => Err(FieldViolation::field(
            field,
            RuleKind::SingleSelection,
            format!("Invalid combination. '{single}' may not be combined with other selections"),
        )),
        None => Ok(()),
    }
}

/// Messages for [`m2m_na_exclusive`].
#[derive(Debug, Clone, Copy)]
pub struct NaMessages<'a> {
    /// Used when the flag is YES but the NA marker was selected.
    pub marker_selected: &'a str,
    /// Used when the flag is not YES but the NA marker is missing.
    pub marker_missing: &'a str,
}

/// Mutual exclusivity between a YES flag and an NA marker inside a
/// multi-select: with the flag YES the marker must be absent, otherwise it
/// must be present and the sole selection.
pub fn m2m_na_exclusive(
    flag: Option<&str>,
    field: &str,
    selections: &[String],
    marker: &str,
    messages: NaMessages<'_>,
) -> RuleResult {
    let has_marker = selections.iter().any(|s| s == marker);
    if flag == Some(YES) {
        if has_marker {
            return Err(FieldViolation::field(
                field,
                RuleKind::Consistency,
                messages.marker_selected,
            ));
        }
        return Ok(());
    }
    if !has_marker {
        return Err(FieldViolation::field(
            field,
            RuleKind::Consistency,
            messages.marker_missing,
        ));
    }
    m2m_single_selection_if(&[marker], field, selections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NO, NONE, POS};
    use assert_matches::assert_matches;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn sel(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn required_if_requires_on_matching_trigger() {
        let err = required_if(&[YES], Some(YES), "result", &None::<String>).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("result"));
        assert_eq!(err.rule, RuleKind::Required);
    }

    #[test]
    fn required_if_treats_not_applicable_as_missing() {
        let result = required_if(&[YES], Some(YES), "result", &some(NOT_APPLICABLE));
        assert_matches!(result, Err(FieldViolation { rule: RuleKind::Required, .. }));
    }

    #[test]
    fn required_if_rejects_answer_when_not_triggered() {
        let result = required_if(&[YES], Some(NO), "result", &some(POS));
        assert_matches!(result, Err(FieldViolation { rule: RuleKind::NotRequired, .. }));
    }

    #[test]
    fn required_if_passes_empty_when_not_triggered() {
        assert!(required_if(&[YES], Some(NO), "result", &None::<String>).is_ok());
        assert!(required_if(&[YES], None, "result", &some(NOT_APPLICABLE)).is_ok());
    }

    #[test]
    fn require_when_is_one_directional() {
        assert!(require_when(false, "x", &some("given")).is_ok());
        assert!(require_when(true, "x", &Some(3)).is_ok());
    }

    #[test]
    fn applicable_if_true_both_directions() {
        assert_matches!(
            applicable_if_true(true, "has_who_dx", &some(NOT_APPLICABLE)),
            Err(FieldViolation { rule: RuleKind::Applicable, .. })
        );
        assert_matches!(
            applicable_if_true(false, "has_who_dx", &some(YES)),
            Err(FieldViolation { rule: RuleKind::NotApplicable, .. })
        );
        assert!(applicable_if_true(true, "has_who_dx", &some(NO)).is_ok());
        assert!(applicable_if_true(false, "has_who_dx", &some(NOT_APPLICABLE)).is_ok());
    }

    #[test]
    fn not_applicable_if_inverts_applicable_if() {
        assert!(not_applicable_if(&[NO], Some(NO), "mother_alive", &some(NOT_APPLICABLE)).is_ok());
        assert_matches!(
            not_applicable_if(&[NO], Some(NO), "mother_alive", &some(YES)),
            Err(FieldViolation { rule: RuleKind::NotApplicable, .. })
        );
        assert_matches!(
            not_applicable_if(&[NO], Some(YES), "mother_alive", &some(NOT_APPLICABLE)),
            Err(FieldViolation { rule: RuleKind::Applicable, .. })
        );
    }

    #[test]
    fn applicable_only_allows_na_without_trigger() {
        assert!(applicable_only(&[YES], Some(NO), "f", &some(NOT_APPLICABLE)).is_ok());
        assert!(applicable_only(&[YES], Some(YES), "f", &some("x")).is_ok());
        assert_matches!(
            applicable_only(&[YES], Some(YES), "f", &some(NOT_APPLICABLE)),
            Err(FieldViolation { rule: RuleKind::Applicable, .. })
        );
    }

    #[test]
    fn not_applicable_only_ignores_other_triggers() {
        assert!(not_applicable_only(&[NO], Some(YES), "f", &some(NOT_APPLICABLE)).is_ok());
        assert!(not_applicable_only(&[NO], Some(NO), "f", &some("x")).is_err());
    }

    #[test]
    fn applicable_only_ignores_other_triggers() {
        assert!(applicable_only(&[NO], Some(YES), "f", &some(NOT_APPLICABLE)).is_ok());
        assert!(applicable_only(&[NO], Some(NO), "f", &some(NOT_APPLICABLE)).is_err());
    }

    #[test]
    fn other_specify_pairs_with_other() {
        assert!(validate_other_specify(Some(OTHER), "x_other", &None).is_err());
        assert!(validate_other_specify(Some(OTHER), "x_other", &some("a clinic")).is_ok());
        assert!(validate_other_specify(Some("hospital"), "x_other", &some("a clinic")).is_err());
        assert!(validate_other_specify(None, "x_other", &None).is_ok());
    }

    #[test]
    fn m2m_other_specify_checks_any_selection() {
        let selections = sel(&["friend", OTHER]);
        assert!(m2m_other_specify(&[OTHER], &selections, "x_other", &None).is_err());
        assert!(m2m_other_specify(&[OTHER], &sel(&["friend"]), "x_other", &some("y")).is_err());
        assert!(m2m_other_specify(&[OTHER], &sel(&["friend"]), "x_other", &None).is_ok());
    }

    #[test]
    fn single_selection_rejects_combination() {
        let err = m2m_single_selection_if(&[OTHER, NONE], "complications", &sel(&[NONE, "bleeding"]))
            .unwrap_err();
        assert_eq!(
            err.message,
            "Invalid combination. 'NONE' may not be combined with other selections"
        );
        assert!(m2m_single_selection_if(&[OTHER, NONE], "c", &sel(&[NONE])).is_ok());
        assert!(m2m_single_selection_if(&[OTHER, NONE], "c", &sel(&["a", "b"])).is_ok());
    }

    #[test]
    fn na_exclusive_enforces_marker_rules() {
        let messages = NaMessages {
            marker_selected: "selected",
            marker_missing: "missing",
        };
        let err = m2m_na_exclusive(Some(YES), "d", &sel(&["na"]), "na", messages).unwrap_err();
        assert_eq!(err.message, "selected");
        let err = m2m_na_exclusive(Some(NO), "d", &sel(&["flu"]), "na", messages).unwrap_err();
        assert_eq!(err.message, "missing");
        let err = m2m_na_exclusive(Some(NO), "d", &sel(&["na", "flu"]), "na", messages).unwrap_err();
        assert_eq!(err.rule, RuleKind::SingleSelection);
        assert!(m2m_na_exclusive(Some(NO), "d", &sel(&["na"]), "na", messages).is_ok());
        assert!(m2m_na_exclusive(Some(YES), "d", &sel(&["flu"]), "na", messages).is_ok());
    }

    #[test]
    fn m2m_required_rejects_empty() {
        assert!(m2m_required("diagnoses", &[]).is_err());
        assert!(m2m_required("diagnoses", &sel(&["flu"])).is_ok());
    }
}
