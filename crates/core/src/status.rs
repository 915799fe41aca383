//! Maternal HIV status resolution.
//!
//! Status is derived from visit history by the data-capture framework. The
//! validators consume it through [`StatusResolver`] so the derivation can be
//! swapped or faked in tests.

use serde::{Deserialize, Serialize};

use crate::constants::{IND, NEG, POS, UNKNOWN, YES};
use crate::forms::antenatal_enrollment::AntenatalEnrollment;
use crate::lookups::VisitRecord;

/// A subject's HIV status as used by the study's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HivStatus {
    #[serde(rename = "POS")]
    Positive,
    #[serde(rename = "NEG")]
    Negative,
    #[serde(rename = "IND")]
    Indeterminate,
    #[serde(rename = "unknown")]
    Unknown,
}

impl HivStatus {
    /// Convert from a stored response code. Unrecognised codes are `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            POS => Self::Positive,
            NEG => Self::Negative,
            IND => Self::Indeterminate,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => POS,
            Self::Negative => NEG,
            Self::Indeterminate => IND,
            Self::Unknown => UNKNOWN,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl std::fmt::Display for HivStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The enrollment record did not carry enough information to decide a status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unable to determine maternal hiv status at enrollment.")]
pub struct StatusUndetermined;

/// External collaborator computing a subject's HIV status.
pub trait StatusResolver {
    /// Status as of `visit`.
    fn hiv_status(&self, visit: &VisitRecord) -> HivStatus;

    /// Status at enrollment, computed from a (not yet saved) enrollment form.
    fn enrollment_hiv_status(
        &self,
        enrollment: &AntenatalEnrollment,
    ) -> Result<HivStatus, StatusUndetermined> {
        EnrollmentStatusRules.resolve(enrollment)
    }
}

/// Default enrollment status derivation.
///
/// A completed rapid test with a POS/NEG result decides the status. Failing
/// that, a prior test with a POS/NEG current status decides it. Anything else
/// is undetermined.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentStatusRules;

impl EnrollmentStatusRules {
    pub fn resolve(
        &self,
        enrollment: &AntenatalEnrollment,
    ) -> Result<HivStatus, StatusUndetermined> {
        let decisive = |code: Option<&str>| match code.map(HivStatus::from_code) {
            Some(status @ (HivStatus::Positive | HivStatus::Negative)) => Some(status),
            _ => None,
        };

        if enrollment.rapid_test_done.as_deref() == Some(YES) {
            if let Some(status) = decisive(enrollment.rapid_test_result.as_deref()) {
                return Ok(status);
            }
        }
        if enrollment.week32_test.as_deref() == Some(YES) {
            if let Some(status) = decisive(enrollment.current_hiv_status.as_deref()) {
                return Ok(status);
            }
        }
        Err(StatusUndetermined)
    }
}

/// Resolver returning one fixed status, for subjects whose status is known
/// up front (and for tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedStatus(pub HivStatus);

impl StatusResolver for FixedStatus {
    fn hiv_status(&self, _visit: &VisitRecord) -> HivStatus {
        self.0
    }
}
