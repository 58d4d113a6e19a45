use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPayload {
    pub candidate_id: Uuid,
    pub vacancy_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdatePayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NotesPayload {
    #[validate(length(min = 1))]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkStatusPayload {
    #[validate(length(min = 1))]
    pub application_ids: Vec<String>,
    pub status: ApplicationStatus,
}
