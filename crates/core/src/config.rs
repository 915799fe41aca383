//! Validation configuration.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How many violations a validator reports per submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first violated rule.
    #[default]
    FailFast,
    /// Evaluate every independent rule group and report all violations.
    CollectAll,
}

impl ValidationMode {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "fail_fast" => Ok(Self::FailFast),
            "collect_all" => Ok(Self::CollectAll),
            _ => Err(CoreError::Config(format!(
                "Invalid validation mode '{s}'. Must be one of: fail_fast, collect_all"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailFast => "fail_fast",
            Self::CollectAll => "collect_all",
        }
    }
}

/// Tunable study windows and thresholds used by the form validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub mode: ValidationMode,
    /// Minimum weeks between ARV initiation and delivery for a valid regimen.
    pub arv_min_weeks_before_delivery: u32,
    /// A rapid test result this many calendar months old (or older) is stale.
    pub rapid_test_max_age_months: u32,
    /// Gestational age (weeks) separating early and late pregnancy losses.
    pub gestation_threshold_weeks: i32,
    /// Extra living children tolerated over deliveries, for twins and triplets.
    pub living_children_allowance: i32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::FailFast,
            arv_min_weeks_before_delivery: 4,
            rapid_test_max_age_months: 3,
            gestation_threshold_weeks: 24,
            living_children_allowance: 3,
        }
    }
}

impl ValidationConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default     |
    /// |---------------------------------|-------------|
    /// | `VALIDATION_MODE`               | `fail_fast` |
    /// | `ARV_MIN_WEEKS_BEFORE_DELIVERY` | `4`         |
    /// | `RAPID_TEST_MAX_AGE_MONTHS`     | `3`         |
    /// | `GESTATION_THRESHOLD_WEEKS`     | `24`        |
    /// | `LIVING_CHILDREN_ALLOWANCE`     | `3`         |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let defaults = Self::default();

        let mode = match lookup("VALIDATION_MODE") {
            Some(value) => ValidationMode::from_str_value(value.trim())?,
            None => defaults.mode,
        };

        Ok(Self {
            mode,
            arv_min_weeks_before_delivery: parse_var(
                &lookup,
                "ARV_MIN_WEEKS_BEFORE_DELIVERY",
                defaults.arv_min_weeks_before_delivery,
            )?,
            rapid_test_max_age_months: parse_var(
                &lookup,
                "RAPID_TEST_MAX_AGE_MONTHS",
                defaults.rapid_test_max_age_months,
            )?,
            gestation_threshold_weeks: parse_var(
                &lookup,
                "GESTATION_THRESHOLD_WEEKS",
                defaults.gestation_threshold_weeks,
            )?,
            living_children_allowance: parse_var(
                &lookup,
                "LIVING_CHILDREN_ALLOWANCE",
                defaults.living_children_allowance,
            )?,
        })
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, CoreError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::Config(format!("{key} must be a number, got '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = ValidationConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.mode, ValidationMode::FailFast);
        assert_eq!(config.arv_min_weeks_before_delivery, 4);
    }

    #[test]
    fn overrides_from_lookup() {
        let config = ValidationConfig::from_lookup(lookup(&[
            ("VALIDATION_MODE", "collect_all"),
            ("RAPID_TEST_MAX_AGE_MONTHS", " 6 "),
        ]))
        .unwrap();
        assert_eq!(config.mode, ValidationMode::CollectAll);
        assert_eq!(config.rapid_test_max_age_months, 6);
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = ValidationConfig::from_lookup(lookup(&[("VALIDATION_MODE", "lenient")]));
        assert_matches!(result, Err(CoreError::Config(_)));
    }

    #[test]
    fn rejects_non_numeric_threshold() {
        let result =
            ValidationConfig::from_lookup(lookup(&[("GESTATION_THRESHOLD_WEEKS", "twenty")]));
        assert_matches!(result, Err(CoreError::Config(msg)) if msg.contains("GESTATION_THRESHOLD_WEEKS"));
    }

    #[test]
    fn deserializes_partial_json() {
        let config: ValidationConfig =
            serde_json::from_str(r#"{"mode": "collect_all", "living_children_allowance": 2}"#)
                .unwrap();
        assert_eq!(config.mode, ValidationMode::CollectAll);
        assert_eq!(config.living_children_allowance, 2);
        assert_eq!(config.gestation_threshold_weeks, 24);
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [ValidationMode::FailFast, ValidationMode::CollectAll] {
            assert_eq!(ValidationMode::from_str_value(mode.as_str()).unwrap(), mode);
        }
    }
}
