use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vacancy::{ContractType, SalaryRange};
use crate::store::VacancyPatch;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub contract_type: ContractType,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub screening_questions: Option<Vec<String>>,
    pub closes_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1))]
    pub recruiter_id: String,
    pub salary: Option<SalaryRange>,
    #[serde(default)]
    pub salary_visible: bool,
    pub employer_name: Option<String>,
    pub employer_website: Option<String>,
    #[serde(default)]
    pub confidential: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub contract_type: Option<ContractType>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub screening_questions: Option<Vec<String>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub salary: Option<SalaryRange>,
    pub salary_visible: Option<bool>,
    pub employer_name: Option<String>,
    pub employer_website: Option<String>,
    pub confidential: Option<bool>,
}

impl From<UpdateVacancyPayload> for VacancyPatch {
    fn from(value: UpdateVacancyPayload) -> Self {
        Self {
            title: value.title,
            category: value.category,
            location: value.location,
            contract_type: value.contract_type,
            description: value.description,
            responsibilities: value.responsibilities,
            requirements: value.requirements,
            screening_questions: value.screening_questions,
            closes_at: value.closes_at,
            salary: value.salary,
            salary_visible: value.salary_visible,
            employer_name: value.employer_name,
            employer_website: value.employer_website,
            confidential: value.confidential,
        }
    }
}
