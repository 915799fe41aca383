//! Repository for ultrasound CRFs.

use sqlx::PgPool;

use crate::models::crf::UltrasoundRow;

/// Provides read access to ultrasound CRFs.
pub struct UltrasoundRepo;

impl UltrasoundRepo {
    /// Every ultrasound captured for a subject, with the visit it belongs to.
    pub async fn list_for_subject(
        pool: &PgPool,
        subject_identifier: &str,
    ) -> Result<Vec<UltrasoundRow>, sqlx::Error> {
        tracing::debug!(subject_identifier, "Loading ultrasounds");
        sqlx::query_as::<_, UltrasoundRow>(
            "SELECT mv.subject_identifier, mv.visit_code, u.ga_confirmed \
             FROM flourish_caregiver_ultrasound u \
             JOIN flourish_caregiver_maternalvisit mv ON mv.id = u.maternal_visit_id \
             WHERE mv.subject_identifier = $1 \
             ORDER BY mv.report_datetime",
        )
        .bind(subject_identifier)
        .fetch_all(pool)
        .await
    }
}
