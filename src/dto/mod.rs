pub mod application_dto;
pub mod assessment_dto;
pub mod candidate_dto;
pub mod triage_dto;
pub mod vacancy_dto;
