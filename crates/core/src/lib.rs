//! Form-level business rules for the FLOURISH caregiver CRFs.
//!
//! Every validator takes a typed submission plus a [`ValidationContext`] and
//! either accepts it or returns a [`Rejection`] listing the offending fields.
//! Related records come in through the [`Lookups`] and [`StatusResolver`]
//! traits, so nothing here touches a data store.

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod forms;
pub mod lookups;
pub mod status;
pub mod types;
pub mod validation;

pub use config::{ValidationConfig, ValidationMode};
pub use context::ValidationContext;
pub use error::CoreError;
pub use forms::{validate_submission, FormSubmission};
pub use lookups::{InMemoryLookups, Lookups};
pub use status::{EnrollmentStatusRules, FixedStatus, HivStatus, StatusResolver};
pub use validation::{FieldViolation, Rejection, RuleKind};
