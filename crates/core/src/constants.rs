//! Categorical response codes shared across the study's forms.
//!
//! Values match the stored codes of the data-capture framework, so a
//! submission deserialized from the framework compares directly against them.

pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const NOT_APPLICABLE: &str = "N/A";
pub const UNKNOWN: &str = "unknown";
pub const DWTA: &str = "DWTA";

pub const POS: &str = "POS";
pub const NEG: &str = "NEG";
pub const IND: &str = "IND";

pub const OTHER: &str = "OTHER";
pub const NONE: &str = "NONE";

/// Selection marker meaning "no new diagnoses" on the maternal diagnoses form.
pub const DIAGNOSES_NA: &str = "mdiag_na";

/// Selection marker meaning "no WHO stage III/IV diagnoses".
pub const WHO_NA: &str = "who_na";

/// "Other" marker on the social-work referral reasons.
pub const REFER_OTHER: &str = "refer_other";

/// Substring identifying caesarean delivery modes (`elective c-section`, ...).
pub const C_SECTION: &str = "c-section";

/// Prior-participant interest answer rejected when the mother is not alive.
pub const INTERESTED: &str = "interested";

/// Feeding HIV-status disclosure answers that require follow-up questions.
pub const RATHER_NOT_ANSWER: &str = "rather_not_answer";
