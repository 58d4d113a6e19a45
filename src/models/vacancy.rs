use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    FullTime,
    PartTime,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Decimal,
    pub max: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub contract_type: ContractType,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub screening_questions: Option<Vec<String>>,
    pub posted_at: DateTime<Utc>,
    pub closes_at: Option<DateTime<Utc>>,
    pub recruiter_id: String,
    pub salary: Option<SalaryRange>,
    pub salary_visible: bool,
    pub employer_name: Option<String>,
    pub employer_website: Option<String>,
    pub confidential: bool,
    pub updated_at: DateTime<Utc>,
}

impl Vacancy {
    /// One text block for the scoring collaborator: title, description,
    /// responsibilities, requirements, always in that order.
    pub fn job_description_text(&self) -> String {
        let mut parts = vec![self.title.clone(), self.description.clone()];
        if !self.responsibilities.is_empty() {
            parts.push(format!("Responsibilities:\n{}", self.responsibilities.join("\n")));
        }
        if !self.requirements.is_empty() {
            parts.push(format!("Requirements:\n{}", self.requirements.join("\n")));
        }
        parts.join("\n\n")
    }
}
