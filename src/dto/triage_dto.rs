use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::ApplicationStatus;

/// Promote either an explicit candidate selection or everyone scored
/// strictly above a threshold in the current triage session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotePayload {
    pub candidate_ids: Option<Vec<Uuid>>,
    pub threshold: Option<i32>,
    pub initial_status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResumePayload {
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(length(min = 1))]
    pub data_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzeResumesPayload {
    #[validate(length(min = 1))]
    pub job_description: String,
    #[validate(length(min = 1), nested)]
    pub resumes: Vec<ResumePayload>,
}
