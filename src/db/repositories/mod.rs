pub mod assessment_repository;
pub mod lead_repository;
