use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicEntry {
    pub institution: String,
    pub degree: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    pub company: String,
    pub role: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub years_experience: Option<u32>,
    pub title: Option<String>,
    pub functional_area: Option<String>,
    pub skills: BTreeSet<String>,
    pub academic_history: Vec<AcademicEntry>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub resume_uri: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    /// Fields an application requires: résumé reference, professional title
    /// and years of experience. Returns the missing ones by name.
    pub fn missing_application_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.resume_uri.is_none() {
            missing.push("resume_uri");
        }
        if self.title.is_none() {
            missing.push("title");
        }
        if self.years_experience.is_none() {
            missing.push("years_experience");
        }
        missing
    }
}
