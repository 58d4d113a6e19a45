pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::services::{
    ai_service::{AiService, AssessmentGenerator, ResumeAnalyzer},
    application_service::ApplicationService,
    notification_service::NotificationService,
    pipeline_service::PipelineService,
    test_service::TestService,
    triage_service::TriageService,
};
use crate::store::{scores::ScoreCache, EntityStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntityStore>,
    pub scores: Arc<ScoreCache>,
    pub application_service: ApplicationService,
    pub triage_service: TriageService,
    pub pipeline_service: PipelineService,
    pub test_service: TestService,
}

impl AppState {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        let ai_service = AiService::new(config.openai_api_key.clone(), http_client);
        let analyzer: Arc<dyn ResumeAnalyzer> = Arc::new(ai_service.clone());
        let generator: Arc<dyn AssessmentGenerator> = Arc::new(ai_service);

        Self::with_collaborators(
            analyzer,
            generator,
            config.notification_webhook_url.clone(),
            Duration::from_secs(config.analysis_timeout_secs),
            config.max_batch_resumes,
        )
    }

    /// Wires the services around a fresh store and score cache. Tests use
    /// this directly to swap the AI collaborators for stubs.
    pub fn with_collaborators(
        analyzer: Arc<dyn ResumeAnalyzer>,
        generator: Arc<dyn AssessmentGenerator>,
        notification_webhook_url: Option<String>,
        analysis_timeout: Duration,
        max_batch_resumes: usize,
    ) -> Self {
        let store = Arc::new(EntityStore::new());
        let scores = Arc::new(ScoreCache::new());

        let notification_service = NotificationService::new(notification_webhook_url);
        let application_service =
            ApplicationService::new(Arc::clone(&store), notification_service);
        let triage_service = TriageService::new(
            Arc::clone(&store),
            Arc::clone(&scores),
            analyzer,
            analysis_timeout,
            max_batch_resumes,
        );
        let pipeline_service = PipelineService::new(Arc::clone(&store), Arc::clone(&scores));
        let test_service = TestService::new(Arc::clone(&store), generator);

        Self {
            store,
            scores,
            application_service,
            triage_service,
            pipeline_service,
            test_service,
        }
    }
}
