use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateTestPayload {
    pub title: Option<String>,
    #[validate(range(min = 1, max = 30))]
    pub num_multiple_choice: usize,
    #[validate(range(max = 30))]
    #[serde(default)]
    pub num_short_answer: usize,
}
