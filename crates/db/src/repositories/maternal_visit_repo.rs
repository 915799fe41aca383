//! Repository for maternal visits.

use sqlx::PgPool;

use crate::models::maternal_visit::MaternalVisitRow;

const COLUMNS: &str = "id, subject_identifier, visit_code, report_datetime, created";

/// Provides read access to maternal visits.
pub struct MaternalVisitRepo;

impl MaternalVisitRepo {
    /// All visits for a subject, most recently created first.
    pub async fn list_for_subject(
        pool: &PgPool,
        subject_identifier: &str,
    ) -> Result<Vec<MaternalVisitRow>, sqlx::Error> {
        tracing::debug!(subject_identifier, "Loading maternal visits");
        let sql = format!(
            "SELECT {COLUMNS} FROM flourish_caregiver_maternalvisit \
             WHERE subject_identifier = $1 \
             ORDER BY created DESC"
        );
        sqlx::query_as::<_, MaternalVisitRow>(&sql)
            .bind(subject_identifier)
            .fetch_all(pool)
            .await
    }
}
