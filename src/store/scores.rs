use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;

/// Session-scoped scoring results, keyed by vacancy. Re-analysis replaces
/// a vacancy's whole map; when two batches overlap, the last one to settle
/// wins. Nothing here is persisted.
#[derive(Default)]
pub struct ScoreCache {
    inner: RwLock<HashMap<String, HashMap<Uuid, AnalysisResult>>>,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, vacancy_id: &str, results: HashMap<Uuid, AnalysisResult>) {
        self.inner
            .write()
            .await
            .insert(vacancy_id.to_string(), results);
    }

    pub async fn for_vacancy(&self, vacancy_id: &str) -> HashMap<Uuid, AnalysisResult> {
        self.inner
            .read()
            .await
            .get(vacancy_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn get(&self, vacancy_id: &str, candidate_id: Uuid) -> Option<AnalysisResult> {
        self.inner
            .read()
            .await
            .get(vacancy_id)
            .and_then(|m| m.get(&candidate_id))
            .cloned()
    }
}
