#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use uuid::Uuid;

use triage_backend::dto::candidate_dto::RegisterCandidatePayload;
use triage_backend::dto::vacancy_dto::CreateVacancyPayload;
use triage_backend::error::{Error, Result};
use triage_backend::models::analysis::ResumeAnalysis;
use triage_backend::models::assessment::{
    MultipleChoiceDetails, Question, QuestionDetails, QuestionType,
};
use triage_backend::models::candidate::Candidate;
use triage_backend::models::vacancy::{ContractType, Vacancy};
use triage_backend::services::ai_service::{AssessmentGenerator, ResumeAnalyzer};
use triage_backend::AppState;

/// Scripted stand-in for the scoring collaborator: scores and failures are
/// keyed by résumé URI, with an optional artificial delay.
#[derive(Default)]
pub struct StubAnalyzer {
    scores: Mutex<HashMap<String, i32>>,
    failing: Mutex<HashSet<String>>,
    pub delay: Option<Duration>,
}

impl StubAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(self, uri: &str, score: i32) -> Self {
        self.scores.lock().unwrap().insert(uri.to_string(), score);
        self
    }

    pub fn failing_on(self, uri: &str) -> Self {
        self.failing.lock().unwrap().insert(uri.to_string());
        self
    }

    pub fn set_score(&self, uri: &str, score: i32) {
        self.scores.lock().unwrap().insert(uri.to_string(), score);
    }
}

#[async_trait]
impl ResumeAnalyzer for StubAnalyzer {
    async fn analyze_resume(
        &self,
        _job_description: &str,
        resume_data_uri: &str,
    ) -> Result<ResumeAnalysis> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.lock().unwrap().contains(resume_data_uri) {
            return Err(Error::Scoring("stubbed scoring failure".to_string()));
        }
        let score = self
            .scores
            .lock()
            .unwrap()
            .get(resume_data_uri)
            .copied()
            .unwrap_or(50);
        Ok(ResumeAnalysis {
            candidate_ranking: score,
            candidate_summary: format!("stub summary ({})", score),
            key_skills_match: "stub skills".to_string(),
            areas_for_improvement: "stub gaps".to_string(),
        })
    }
}

pub struct StubGenerator;

#[async_trait]
impl AssessmentGenerator for StubGenerator {
    async fn generate_questions(
        &self,
        _job_description: &str,
        num_multiple_choice: usize,
        _num_short_answer: usize,
    ) -> Result<Vec<Question>> {
        Ok((0..num_multiple_choice)
            .map(|i| Question {
                id: (i as i32) + 1,
                question_type: QuestionType::MultipleChoice,
                question: format!("Stub question {}", i + 1),
                details: QuestionDetails::MultipleChoice(MultipleChoiceDetails {
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer: 0,
                    explanation: None,
                }),
            })
            .collect())
    }
}

pub fn test_state(analyzer: StubAnalyzer) -> AppState {
    AppState::with_collaborators(
        Arc::new(analyzer),
        Arc::new(StubGenerator),
        None,
        Duration::from_secs(5),
        20,
    )
}

pub fn resume_uri(contents: &str) -> String {
    format!("data:application/pdf;base64,{}", BASE64.encode(contents))
}

pub async fn seed_vacancy(state: &AppState) -> Vacancy {
    state
        .store
        .create_vacancy(CreateVacancyPayload {
            title: "Backend Engineer".to_string(),
            category: "Engineering".to_string(),
            location: "Lisbon".to_string(),
            contract_type: ContractType::FullTime,
            description: "Build and run recruitment services.".to_string(),
            responsibilities: vec!["Own the pipeline engine".to_string()],
            requirements: vec!["3+ years of Rust".to_string()],
            screening_questions: None,
            closes_at: None,
            recruiter_id: "recruiter-1".to_string(),
            salary: None,
            salary_visible: false,
            employer_name: None,
            employer_website: None,
            confidential: false,
        })
        .await
}

pub async fn seed_candidate(state: &AppState, name: &str, resume: Option<String>) -> Candidate {
    state
        .store
        .create_candidate(RegisterCandidatePayload {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: None,
            nationality: None,
            years_experience: Some(4),
            title: Some("Software Engineer".to_string()),
            functional_area: Some("Engineering".to_string()),
            skills: None,
            academic_history: None,
            work_experience: None,
            resume_uri: resume,
            date_of_birth: None,
        })
        .await
        .expect("seed candidate")
}

pub fn candidate_ids(candidates: &[Candidate]) -> Vec<Uuid> {
    candidates.iter().map(|c| c.id).collect()
}
