use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::models::analysis::AnalysisResult;
use crate::models::application::{Application, ApplicationStatus, STAGE_ORDER};
use crate::models::candidate::Candidate;
use crate::store::scores::ScoreCache;
use crate::store::EntityStore;

#[derive(Debug, Serialize)]
pub struct PipelineEntry {
    pub application: Application,
    /// `None` when the application points at a candidate that no longer
    /// exists; the board tolerates dangling references.
    pub candidate: Option<Candidate>,
    pub score: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct PipelineStage {
    pub status: ApplicationStatus,
    pub entries: Vec<PipelineEntry>,
}

#[derive(Debug, Serialize)]
pub struct PipelineBoard {
    pub vacancy_id: String,
    pub stages: Vec<PipelineStage>,
}

/// Pure projection: partition by exact status into the fixed stage order,
/// sort each stage by score descending with unscored entries last. Holds
/// no state; recompute whenever applications or scores change.
pub fn project_board(
    vacancy_id: &str,
    applications: Vec<Application>,
    candidates: &HashMap<Uuid, Candidate>,
    scores: &HashMap<Uuid, AnalysisResult>,
) -> PipelineBoard {
    let mut stages: Vec<PipelineStage> = STAGE_ORDER
        .iter()
        .map(|&status| PipelineStage {
            status,
            entries: Vec::new(),
        })
        .collect();

    for application in applications {
        let score = scores
            .get(&application.candidate_id)
            .map(|a| a.score)
            .or(application.score);
        let candidate = candidates.get(&application.candidate_id).cloned();
        if let Some(stage) = stages.iter_mut().find(|s| s.status == application.status) {
            stage.entries.push(PipelineEntry {
                application,
                candidate,
                score,
            });
        }
    }

    for stage in &mut stages {
        stage.entries.sort_by(|a, b| match (a.score, b.score) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    PipelineBoard {
        vacancy_id: vacancy_id.to_string(),
        stages,
    }
}

#[derive(Clone)]
pub struct PipelineService {
    store: Arc<EntityStore>,
    scores: Arc<ScoreCache>,
}

impl PipelineService {
    pub fn new(store: Arc<EntityStore>, scores: Arc<ScoreCache>) -> Self {
        Self { store, scores }
    }

    pub async fn board_for_vacancy(&self, vacancy_id: &str) -> Result<PipelineBoard> {
        self.store.get_vacancy(vacancy_id).await?;

        let applications = self.store.applications_for_vacancy(vacancy_id).await;
        let candidates: HashMap<Uuid, Candidate> = self
            .store
            .list_candidates()
            .await
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let scores = self.scores.for_vacancy(vacancy_id).await;

        Ok(project_board(vacancy_id, applications, &candidates, &scores))
    }
}
