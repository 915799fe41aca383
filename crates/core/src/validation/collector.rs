//! Violation collector.
//!
//! Validators record the outcome of each rule group on a [`Report`]. In
//! fail-fast mode the first violation halts the validator through `?`; in
//! collect-all mode recording continues and every independent group runs.

use crate::config::ValidationMode;

use super::rules::{FieldViolation, Rejection, RuleResult};

/// Signal that a validator must stop evaluating further rule groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halted;

/// Accumulates violations for one submission.
#[derive(Debug)]
pub struct Report {
    mode: ValidationMode,
    violations: Vec<FieldViolation>,
}

impl Report {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            violations: Vec::new(),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Record one rule group's outcome. Halts only in fail-fast mode.
    pub fn record(&mut self, outcome: RuleResult) -> Result<(), Halted> {
        match outcome {
            Ok(()) => Ok(()),
            Err(violation) => {
                tracing::trace!(
                    field = violation.field.as_deref().unwrap_or("__all__"),
                    message = %violation.message,
                    "Rule violated"
                );
                self.violations.push(violation);
                match self.mode {
                    ValidationMode::FailFast => Err(Halted),
                    ValidationMode::CollectAll => Ok(()),
                }
            }
        }
    }

    /// Record the outcome of a step later groups depend on. A failed
    /// prerequisite always halts, whatever the mode.
    pub fn prerequisite<T>(&mut self, outcome: Result<T, FieldViolation>) -> Result<T, Halted> {
        match outcome {
            Ok(value) => Ok(value),
            Err(violation) => {
                let _ = self.record(Err(violation));
                Err(Halted)
            }
        }
    }

    /// Record a batch of violations gathered by one rule group. The whole
    /// batch is kept before a fail-fast halt.
    pub fn extend(&mut self, violations: Vec<FieldViolation>) -> Result<(), Halted> {
        let mut outcome = Ok(());
        for violation in violations {
            if self.record(Err(violation)).is_err() {
                outcome = Err(Halted);
            }
        }
        outcome
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Finish the report for `form`, converting recorded violations into a rejection.
    pub fn finish(self, form: &str, subject_identifier: Option<&str>) -> Result<(), Rejection> {
        if self.violations.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            form,
            subject_identifier = subject_identifier.unwrap_or_default(),
            violations = self.violations.len(),
            "Submission rejected"
        );
        Err(Rejection::new(self.violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::RuleKind;

    fn violation(field: &str) -> RuleResult {
        Err(FieldViolation::field(field, RuleKind::Required, "required"))
    }

    #[test]
    fn fail_fast_halts_on_first_violation() {
        let mut report = Report::new(ValidationMode::FailFast);
        assert_eq!(report.record(Ok(())), Ok(()));
        assert_eq!(report.record(violation("a")), Err(Halted));
        let rejection = report.finish("test", None).unwrap_err();
        assert_eq!(rejection.len(), 1);
    }

    #[test]
    fn collect_all_keeps_going() {
        let mut report = Report::new(ValidationMode::CollectAll);
        assert_eq!(report.record(violation("a")), Ok(()));
        assert_eq!(report.record(violation("b")), Ok(()));
        let rejection = report.finish("test", None).unwrap_err();
        assert!(rejection.has_field("a"));
        assert!(rejection.has_field("b"));
    }

    #[test]
    fn failed_prerequisite_halts_in_collect_all() {
        let mut report = Report::new(ValidationMode::CollectAll);
        let outcome: Result<i32, _> = Err(FieldViolation::global(
            RuleKind::MissingRecord,
            "complete the ultrasound form",
        ));
        assert_eq!(report.prerequisite(outcome), Err(Halted));
        assert!(!report.is_clean());
    }

    #[test]
    fn extend_keeps_whole_batch_before_halting() {
        let mut report = Report::new(ValidationMode::FailFast);
        let batch = vec![
            FieldViolation::field("a", RuleKind::Consistency, "zero"),
            FieldViolation::field("b", RuleKind::Consistency, "zero"),
        ];
        assert_eq!(report.extend(batch), Err(Halted));
        assert_eq!(report.finish("test", None).unwrap_err().len(), 2);
    }

    #[test]
    fn clean_report_finishes_ok() {
        let report = Report::new(ValidationMode::FailFast);
        assert!(report.finish("test", Some("B142-040990462-6")).is_ok());
    }
}
