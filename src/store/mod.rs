pub mod scores;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, thread_rng, Rng};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dto::candidate_dto::RegisterCandidatePayload;
use crate::dto::vacancy_dto::CreateVacancyPayload;
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::assessment::{AssessmentTest, Question};
use crate::models::candidate::Candidate;
use crate::models::vacancy::Vacancy;

/// Mutable vacancy fields. The id, `posted_at` and owning recruiter are
/// fixed at creation and not representable here.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct VacancyPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub contract_type: Option<crate::models::vacancy::ContractType>,
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub screening_questions: Option<Vec<String>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub salary: Option<crate::models::vacancy::SalaryRange>,
    pub salary_visible: Option<bool>,
    pub employer_name: Option<String>,
    pub employer_website: Option<String>,
    pub confidential: Option<bool>,
}

/// Mutable candidate profile fields.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CandidatePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub years_experience: Option<u32>,
    pub title: Option<String>,
    pub functional_area: Option<String>,
    pub skills: Option<std::collections::BTreeSet<String>>,
    pub academic_history: Option<Vec<crate::models::candidate::AcademicEntry>>,
    pub work_experience: Option<Vec<crate::models::candidate::WorkExperienceEntry>>,
    pub resume_uri: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

/// Mutable application fields. Status changes normally go through the
/// state machine in `ApplicationService`, which validates before patching.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
    pub score: Option<i32>,
}

/// In-memory entity collections for one process/session. Constructed once
/// and passed by `Arc` to every component; tests build isolated instances.
#[derive(Default)]
pub struct EntityStore {
    vacancies: RwLock<HashMap<String, Vacancy>>,
    candidates: RwLock<HashMap<Uuid, Candidate>>,
    applications: RwLock<HashMap<String, Application>>,
    tests: RwLock<HashMap<Uuid, AssessmentTest>>,
}

fn generate_vacancy_id() -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("vac-{}-{}", Utc::now().timestamp_millis(), suffix)
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- vacancies ----

    /// Newest first, by `posted_at`.
    pub async fn list_vacancies(&self) -> Vec<Vacancy> {
        let mut items: Vec<Vacancy> = self.vacancies.read().await.values().cloned().collect();
        items.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        items
    }

    pub async fn get_vacancy(&self, id: &str) -> Result<Vacancy> {
        self.vacancies
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Vacancy {} not found", id)))
    }

    pub async fn create_vacancy(&self, payload: CreateVacancyPayload) -> Vacancy {
        let now = Utc::now();
        let mut vacancies = self.vacancies.write().await;
        let mut id = generate_vacancy_id();
        while vacancies.contains_key(&id) {
            id = generate_vacancy_id();
        }
        let vacancy = Vacancy {
            id: id.clone(),
            title: payload.title,
            category: payload.category,
            location: payload.location,
            contract_type: payload.contract_type,
            description: payload.description,
            responsibilities: payload.responsibilities,
            requirements: payload.requirements,
            screening_questions: payload.screening_questions,
            posted_at: now,
            closes_at: payload.closes_at,
            recruiter_id: payload.recruiter_id,
            salary: payload.salary,
            salary_visible: payload.salary_visible,
            employer_name: payload.employer_name,
            employer_website: payload.employer_website,
            confidential: payload.confidential,
            updated_at: now,
        };
        vacancies.insert(id, vacancy.clone());
        vacancy
    }

    pub async fn update_vacancy(&self, id: &str, patch: VacancyPatch) -> Result<Vacancy> {
        let mut vacancies = self.vacancies.write().await;
        let vacancy = vacancies
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Vacancy {} not found", id)))?;

        if let Some(title) = patch.title {
            vacancy.title = title;
        }
        if let Some(category) = patch.category {
            vacancy.category = category;
        }
        if let Some(location) = patch.location {
            vacancy.location = location;
        }
        if let Some(contract_type) = patch.contract_type {
            vacancy.contract_type = contract_type;
        }
        if let Some(description) = patch.description {
            vacancy.description = description;
        }
        if let Some(responsibilities) = patch.responsibilities {
            vacancy.responsibilities = responsibilities;
        }
        if let Some(requirements) = patch.requirements {
            vacancy.requirements = requirements;
        }
        if let Some(screening_questions) = patch.screening_questions {
            vacancy.screening_questions = Some(screening_questions);
        }
        if let Some(closes_at) = patch.closes_at {
            vacancy.closes_at = Some(closes_at);
        }
        if let Some(salary) = patch.salary {
            vacancy.salary = Some(salary);
        }
        if let Some(salary_visible) = patch.salary_visible {
            vacancy.salary_visible = salary_visible;
        }
        if let Some(employer_name) = patch.employer_name {
            vacancy.employer_name = Some(employer_name);
        }
        if let Some(employer_website) = patch.employer_website {
            vacancy.employer_website = Some(employer_website);
        }
        if let Some(confidential) = patch.confidential {
            vacancy.confidential = confidential;
        }
        vacancy.updated_at = Utc::now();
        Ok(vacancy.clone())
    }

    /// Idempotent: removing an unknown id is not an error.
    pub async fn delete_vacancy(&self, id: &str) {
        self.vacancies.write().await.remove(id);
    }

    // ---- candidates ----

    pub async fn list_candidates(&self) -> Vec<Candidate> {
        self.candidates.read().await.values().cloned().collect()
    }

    pub async fn get_candidate(&self, id: Uuid) -> Result<Candidate> {
        self.candidates
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))
    }

    pub async fn create_candidate(&self, payload: RegisterCandidatePayload) -> Result<Candidate> {
        let mut candidates = self.candidates.write().await;
        if candidates.values().any(|c| c.email == payload.email) {
            return Err(Error::BadRequest(
                "A candidate with this email address already exists.".to_string(),
            ));
        }
        let now = Utc::now();
        let candidate = Candidate {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            nationality: payload.nationality,
            years_experience: payload.years_experience,
            title: payload.title,
            functional_area: payload.functional_area,
            skills: payload.skills.unwrap_or_default(),
            academic_history: payload.academic_history.unwrap_or_default(),
            work_experience: payload.work_experience.unwrap_or_default(),
            resume_uri: payload.resume_uri,
            date_of_birth: payload.date_of_birth,
            created_at: now,
            updated_at: now,
        };
        candidates.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    pub async fn update_candidate(&self, id: Uuid, patch: CandidatePatch) -> Result<Candidate> {
        let mut candidates = self.candidates.write().await;
        let candidate = candidates
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;

        if let Some(name) = patch.name {
            candidate.name = name;
        }
        if let Some(email) = patch.email {
            candidate.email = email;
        }
        if let Some(phone) = patch.phone {
            candidate.phone = Some(phone);
        }
        if let Some(nationality) = patch.nationality {
            candidate.nationality = Some(nationality);
        }
        if let Some(years_experience) = patch.years_experience {
            candidate.years_experience = Some(years_experience);
        }
        if let Some(title) = patch.title {
            candidate.title = Some(title);
        }
        if let Some(functional_area) = patch.functional_area {
            candidate.functional_area = Some(functional_area);
        }
        if let Some(skills) = patch.skills {
            candidate.skills = skills;
        }
        if let Some(academic_history) = patch.academic_history {
            candidate.academic_history = academic_history;
        }
        if let Some(work_experience) = patch.work_experience {
            candidate.work_experience = work_experience;
        }
        if let Some(resume_uri) = patch.resume_uri {
            candidate.resume_uri = Some(resume_uri);
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            candidate.date_of_birth = Some(date_of_birth);
        }
        candidate.updated_at = Utc::now();
        Ok(candidate.clone())
    }

    // ---- applications ----

    pub async fn list_applications(&self) -> Vec<Application> {
        self.applications.read().await.values().cloned().collect()
    }

    pub async fn applications_for_vacancy(&self, vacancy_id: &str) -> Vec<Application> {
        self.applications
            .read()
            .await
            .values()
            .filter(|a| a.vacancy_id == vacancy_id)
            .cloned()
            .collect()
    }

    pub async fn applications_for_candidate(&self, candidate_id: Uuid) -> Vec<Application> {
        self.applications
            .read()
            .await
            .values()
            .filter(|a| a.candidate_id == candidate_id)
            .cloned()
            .collect()
    }

    pub async fn get_application(&self, id: &str) -> Result<Application> {
        self.applications
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))
    }

    /// The one place the (candidate, vacancy) uniqueness invariant is
    /// enforced. The deterministic id makes the existence check a key
    /// lookup.
    pub async fn create_application(
        &self,
        candidate_id: Uuid,
        vacancy_id: &str,
        status: ApplicationStatus,
        score: Option<i32>,
    ) -> Result<Application> {
        let id = Application::id_for(candidate_id, vacancy_id);
        let mut applications = self.applications.write().await;
        if applications.contains_key(&id) {
            return Err(Error::DuplicateApplication(format!(
                "Candidate {} has already applied to vacancy {}",
                candidate_id, vacancy_id
            )));
        }
        let application = Application {
            id: id.clone(),
            candidate_id,
            vacancy_id: vacancy_id.to_string(),
            status,
            applied_at: Utc::now(),
            notes: None,
            score,
        };
        applications.insert(id, application.clone());
        Ok(application)
    }

    pub async fn update_application(
        &self,
        id: &str,
        patch: ApplicationPatch,
    ) -> Result<Application> {
        let mut applications = self.applications.write().await;
        let application = applications
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("Application {} not found", id)))?;

        if let Some(status) = patch.status {
            application.status = status;
        }
        if let Some(notes) = patch.notes {
            application.notes = Some(notes);
        }
        if let Some(score) = patch.score {
            application.score = Some(score);
        }
        Ok(application.clone())
    }

    /// Idempotent; rejection is normally a status, this exists for
    /// administrative cleanup.
    pub async fn delete_application(&self, id: &str) {
        self.applications.write().await.remove(id);
    }

    // ---- assessment tests ----

    pub async fn create_test(
        &self,
        vacancy_id: &str,
        title: String,
        questions: Vec<Question>,
    ) -> AssessmentTest {
        let test = AssessmentTest {
            id: Uuid::new_v4(),
            vacancy_id: vacancy_id.to_string(),
            title,
            questions,
            created_at: Utc::now(),
        };
        self.tests.write().await.insert(test.id, test.clone());
        test
    }

    pub async fn get_test(&self, id: Uuid) -> Result<AssessmentTest> {
        self.tests
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Assessment test {} not found", id)))
    }

    pub async fn tests_for_vacancy(&self, vacancy_id: &str) -> Vec<AssessmentTest> {
        self.tests
            .read()
            .await
            .values()
            .filter(|t| t.vacancy_id == vacancy_id)
            .cloned()
            .collect()
    }

    pub async fn delete_test(&self, id: Uuid) {
        self.tests.write().await.remove(&id);
    }
}
