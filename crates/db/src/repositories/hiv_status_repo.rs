//! Repository for recorded maternal HIV test results.

use sqlx::PgPool;

use crate::models::crf::HivTestResultRow;

/// Provides read access to recorded rapid test results.
pub struct HivStatusRepo;

impl HivStatusRepo {
    /// Rapid test results for a subject, latest visit first. Only tests that
    /// were actually processed are returned.
    pub async fn list_results(
        pool: &PgPool,
        subject_identifier: &str,
    ) -> Result<Vec<HivTestResultRow>, sqlx::Error> {
        tracing::debug!(subject_identifier, "Loading HIV test results");
        sqlx::query_as::<_, HivTestResultRow>(
            "SELECT mv.report_datetime AS visit_report_datetime, r.result \
             FROM flourish_caregiver_hivrapidtestcounseling r \
             JOIN flourish_caregiver_maternalvisit mv ON mv.id = r.maternal_visit_id \
             WHERE mv.subject_identifier = $1 AND r.rapid_test_done = 'Yes' \
             ORDER BY mv.report_datetime DESC",
        )
        .bind(subject_identifier)
        .fetch_all(pool)
        .await
    }
}
