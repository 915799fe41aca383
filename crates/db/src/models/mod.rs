//! Row structs for the caregiver tables.
//!
//! Each row is a `FromRow` + `Serialize` struct matching one query's columns,
//! with a `From` conversion into the record type the validators consume.

pub mod consent;
pub mod crf;
pub mod maternal_visit;
