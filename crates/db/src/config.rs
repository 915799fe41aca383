//! Database connection settings.

use std::fmt;
use std::time::Duration;

use crate::error::DbError;

/// Connection pool configuration loaded from environment variables.
#[derive(Clone)]
pub struct DbConfig {
    pub database_url: String,
    /// Maximum pooled connections (default: `5`).
    pub max_connections: u32,
    /// Seconds to wait for a free connection (default: `10`).
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default    |
    /// |---------------------------|------------|
    /// | `DATABASE_URL`            | (required) |
    /// | `DB_MAX_CONNECTIONS`      | `5`        |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`       |
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DbError::Config("DATABASE_URL must be set".into()))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                DbError::Config(format!("DB_MAX_CONNECTIONS must be a valid u32, got '{raw}'"))
            })?,
            None => 5,
        };

        let acquire_timeout_secs = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                DbError::Config(format!(
                    "DB_ACQUIRE_TIMEOUT_SECS must be a valid u64, got '{raw}'"
                ))
            })?,
            None => 10,
        };

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

// The URL carries credentials.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn database_url_is_required() {
        assert_matches!(DbConfig::from_lookup(lookup(&[])), Err(DbError::Config(_)));
    }

    #[test]
    fn defaults_apply() {
        let config =
            DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/flourish")]))
                .unwrap();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn rejects_bad_pool_size() {
        let result = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/flourish"),
            ("DB_MAX_CONNECTIONS", "many"),
        ]));
        assert_matches!(result, Err(DbError::Config(_)));
    }

    #[test]
    fn debug_hides_credentials() {
        let config = DbConfig::from_lookup(lookup(&[(
            "DATABASE_URL",
            "postgres://flourish:secret@db/flourish",
        )]))
        .unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
