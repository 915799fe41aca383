//! Repository for antenatal enrollments.

use sqlx::PgPool;

use crate::models::crf::AntenatalEnrollmentRow;

/// Provides read access to antenatal enrollments.
pub struct AntenatalEnrollmentRepo;

impl AntenatalEnrollmentRepo {
    pub async fn find_for_subject(
        pool: &PgPool,
        subject_identifier: &str,
    ) -> Result<Option<AntenatalEnrollmentRow>, sqlx::Error> {
        tracing::debug!(subject_identifier, "Looking up antenatal enrollment");
        sqlx::query_as::<_, AntenatalEnrollmentRow>(
            "SELECT subject_identifier, report_datetime, enrollment_hiv_status \
             FROM flourish_caregiver_antenatalenrollment \
             WHERE subject_identifier = $1 \
             LIMIT 1",
        )
        .bind(subject_identifier)
        .fetch_optional(pool)
        .await
    }
}
