//! Repository for caregiver consents.

use sqlx::PgPool;

use crate::models::consent::SubjectConsentRow;

const COLUMNS: &str = "id, subject_identifier, consent_datetime";

/// Provides read access to caregiver consents.
pub struct ConsentRepo;

impl ConsentRepo {
    /// All consents for a subject, newest first.
    pub async fn list_for_subject(
        pool: &PgPool,
        subject_identifier: &str,
    ) -> Result<Vec<SubjectConsentRow>, sqlx::Error> {
        tracing::debug!(subject_identifier, "Loading consents");
        let sql = format!(
            "SELECT {COLUMNS} FROM flourish_caregiver_subjectconsent \
             WHERE subject_identifier = $1 \
             ORDER BY consent_datetime DESC"
        );
        sqlx::query_as::<_, SubjectConsentRow>(&sql)
            .bind(subject_identifier)
            .fetch_all(pool)
            .await
    }
}
