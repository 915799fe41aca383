//! Violation and rejection types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of rule produced a violation.
///
/// Callers use it to reword the default message of a combinator, since one
/// combinator can fail in more than one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    NotRequired,
    Applicable,
    NotApplicable,
    SingleSelection,
    Consistency,
    DateWindow,
    MissingRecord,
    Schema,
}

/// A single rule violation.
///
/// `field` is `None` for form-level messages that are not tied to an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub rule: RuleKind,
    pub message: String,
}

/// Outcome of one rule group. `Err` carries the first violation of the group.
pub type RuleResult = Result<(), FieldViolation>;

impl FieldViolation {
    pub fn field(field: &str, rule: RuleKind, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            rule,
            message: message.into(),
        }
    }

    pub fn global(rule: RuleKind, message: impl Into<String>) -> Self {
        Self {
            field: None,
            rule,
            message: message.into(),
        }
    }

    /// Replace the message when the violation came from `rule`.
    ///
    /// ```
    /// use flourish_core::validation::{FieldViolation, RuleKind};
    ///
    /// let v = FieldViolation::field("result", RuleKind::Required, "This field is required.")
    ///     .reword(RuleKind::Required, "What is the result?")
    ///     .reword(RuleKind::NotRequired, "Do not provide the result.");
    /// assert_eq!(v.message, "What is the result?");
    /// ```
    pub fn reword(mut self, rule: RuleKind, message: impl Into<String>) -> Self {
        if self.rule == rule {
            self.message = message.into();
        }
        self
    }

    pub fn is_global(&self) -> bool {
        self.field.is_none()
    }
}

/// Rewording helper for use with `map_err` on a [`RuleResult`].
pub fn reword(
    rule: RuleKind,
    message: impl Into<String>,
) -> impl FnOnce(FieldViolation) -> FieldViolation {
    let message = message.into();
    move |v| v.reword(rule, message)
}

/// A rejected submission: every violation recorded before validation stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub violations: Vec<FieldViolation>,
}

impl Rejection {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Field name to message mapping. The first message recorded for a field wins.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for violation in &self.violations {
            if let Some(field) = &violation.field {
                errors
                    .entry(field.clone())
                    .or_insert_with(|| violation.message.clone());
            }
        }
        errors
    }

    /// Messages not tied to a field, in the order they were recorded.
    pub fn global_errors(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.is_global())
            .map(|v| v.message.as_str())
            .collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.field.as_deref() == Some(field))
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            match &violation.field {
                Some(field) => write!(f, "{field}: {}", violation.message)?,
                None => f.write_str(&violation.message)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for Rejection {}
