//! Repository for the ARVs-before-pregnancy CRF.

use sqlx::PgPool;

use crate::models::crf::ArvPrePregnancyRow;

/// Provides read access to the ARVs-before-pregnancy CRF.
pub struct ArvPrePregnancyRepo;

impl ArvPrePregnancyRepo {
    pub async fn find_for_subject(
        pool: &PgPool,
        subject_identifier: &str,
    ) -> Result<Option<ArvPrePregnancyRow>, sqlx::Error> {
        tracing::debug!(subject_identifier, "Looking up ARVs before pregnancy");
        sqlx::query_as::<_, ArvPrePregnancyRow>(
            "SELECT mv.subject_identifier, a.art_start_date \
             FROM flourish_caregiver_arvsprepregnancy a \
             JOIN flourish_caregiver_maternalvisit mv ON mv.id = a.maternal_visit_id \
             WHERE mv.subject_identifier = $1 \
             ORDER BY mv.report_datetime DESC \
             LIMIT 1",
        )
        .bind(subject_identifier)
        .fetch_optional(pool)
        .await
    }
}
