use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::models::candidate::{AcademicEntry, WorkExperienceEntry};
use crate::store::CandidatePatch;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub years_experience: Option<u32>,
    pub title: Option<String>,
    pub functional_area: Option<String>,
    pub skills: Option<BTreeSet<String>>,
    pub academic_history: Option<Vec<AcademicEntry>>,
    pub work_experience: Option<Vec<WorkExperienceEntry>>,
    pub resume_uri: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub years_experience: Option<u32>,
    pub title: Option<String>,
    pub functional_area: Option<String>,
    pub skills: Option<BTreeSet<String>>,
    pub academic_history: Option<Vec<AcademicEntry>>,
    pub work_experience: Option<Vec<WorkExperienceEntry>>,
    pub resume_uri: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<UpdateCandidatePayload> for CandidatePatch {
    fn from(value: UpdateCandidatePayload) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            nationality: value.nationality,
            years_experience: value.years_experience,
            title: value.title,
            functional_area: value.functional_area,
            skills: value.skills,
            academic_history: value.academic_history,
            work_experience: value.work_experience,
            resume_uri: value.resume_uri,
            date_of_birth: value.date_of_birth,
        }
    }
}

/// Structured profile produced by the extraction collaborator; applied to
/// a candidate record to pre-fill it. Only the shape is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub nationality: Option<String>,
    pub years_experience: Option<u32>,
    pub functional_area: Option<String>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub academic_history: Vec<AcademicEntry>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceEntry>,
}

impl From<ExtractedProfile> for CandidatePatch {
    fn from(value: ExtractedProfile) -> Self {
        Self {
            name: value.name,
            title: value.title,
            nationality: value.nationality,
            years_experience: value.years_experience,
            functional_area: value.functional_area,
            skills: if value.skills.is_empty() {
                None
            } else {
                Some(value.skills)
            },
            academic_history: if value.academic_history.is_empty() {
                None
            } else {
                Some(value.academic_history)
            },
            work_experience: if value.work_experience.is_empty() {
                None
            } else {
                Some(value.work_experience)
            },
            ..Default::default()
        }
    }
}
