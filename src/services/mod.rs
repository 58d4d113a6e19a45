pub mod ai_service;
pub mod application_service;
pub mod notification_service;
pub mod pipeline_service;
pub mod test_service;
pub mod triage_service;
