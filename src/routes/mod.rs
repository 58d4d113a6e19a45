pub mod application;
pub mod assessment;
pub mod candidate;
pub mod health;
pub mod triage;
pub mod vacancy;
