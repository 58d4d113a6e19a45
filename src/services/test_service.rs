use std::sync::Arc;

use uuid::Uuid;

use crate::error::Result;
use crate::models::assessment::AssessmentTest;
use crate::services::ai_service::AssessmentGenerator;
use crate::store::EntityStore;

#[derive(Clone)]
pub struct TestService {
    store: Arc<EntityStore>,
    generator: Arc<dyn AssessmentGenerator>,
}

impl TestService {
    pub fn new(store: Arc<EntityStore>, generator: Arc<dyn AssessmentGenerator>) -> Self {
        Self { store, generator }
    }

    /// Generates an assessment for a vacancy and attaches it. The stored
    /// test is immutable afterwards.
    pub async fn generate_for_vacancy(
        &self,
        vacancy_id: &str,
        title: Option<String>,
        num_multiple_choice: usize,
        num_short_answer: usize,
    ) -> Result<AssessmentTest> {
        let vacancy = self.store.get_vacancy(vacancy_id).await?;
        let job_description = vacancy.job_description_text();

        let questions = self
            .generator
            .generate_questions(&job_description, num_multiple_choice, num_short_answer)
            .await?;

        let title = title.unwrap_or_else(|| format!("{} assessment", vacancy.title));
        let test = self.store.create_test(vacancy_id, title, questions).await;

        tracing::info!(
            vacancy = vacancy_id,
            test = %test.id,
            questions = test.questions.len(),
            "Assessment test saved"
        );
        Ok(test)
    }

    pub async fn list_for_vacancy(&self, vacancy_id: &str) -> Result<Vec<AssessmentTest>> {
        self.store.get_vacancy(vacancy_id).await?;
        Ok(self.store.tests_for_vacancy(vacancy_id).await)
    }

    pub async fn get(&self, id: Uuid) -> Result<AssessmentTest> {
        self.store.get_test(id).await
    }
}
