//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods
//! that accept `&PgPool` as the first argument.

pub mod antenatal_enrollment_repo;
pub mod arv_pre_pregnancy_repo;
pub mod consent_repo;
pub mod hiv_status_repo;
pub mod maternal_visit_repo;
pub mod ultrasound_repo;

pub use antenatal_enrollment_repo::AntenatalEnrollmentRepo;
pub use arv_pre_pregnancy_repo::ArvPrePregnancyRepo;
pub use consent_repo::ConsentRepo;
pub use hiv_status_repo::HivStatusRepo;
pub use maternal_visit_repo::MaternalVisitRepo;
pub use ultrasound_repo::UltrasoundRepo;
