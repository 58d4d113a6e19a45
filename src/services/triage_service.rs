use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::analysis::{sort_by_score_desc, AnalysisResult, TriagedCandidate};
use crate::models::application::ApplicationStatus;
use crate::services::ai_service::ResumeAnalyzer;
use crate::store::scores::ScoreCache;
use crate::store::EntityStore;

#[derive(Debug, Serialize)]
pub struct PromotionOutcome {
    pub promoted: Vec<Uuid>,
    pub skipped: Vec<Uuid>,
    pub failed: Vec<PromotionFailure>,
}

#[derive(Debug, Serialize)]
pub struct PromotionFailure {
    pub candidate_id: Uuid,
    pub reason: String,
}

/// One scored entry of the ad-hoc multi-résumé flow, where no candidate
/// record exists yet.
#[derive(Debug, Serialize)]
pub struct AdHocAnalysis {
    pub label: String,
    pub score: i32,
    pub summary: String,
    pub key_skills_match: String,
    pub areas_for_improvement: String,
}

/// Pure filter: strictly greater than the threshold. A candidate scored
/// exactly at the threshold is excluded.
pub fn select_above_threshold(triaged: &[TriagedCandidate], threshold: i32) -> Vec<Uuid> {
    triaged
        .iter()
        .filter(|t| t.score().map(|s| s > threshold).unwrap_or(false))
        .map(|t| t.candidate.id)
        .collect()
}

#[derive(Clone)]
pub struct TriageService {
    store: Arc<EntityStore>,
    scores: Arc<ScoreCache>,
    analyzer: Arc<dyn ResumeAnalyzer>,
    analysis_timeout: Duration,
    max_batch_resumes: usize,
}

/// One scoring call, bounded and degraded: an error or a timeout becomes a
/// zero-score result so the surrounding batch always settles.
async fn score_resume(
    analyzer: Arc<dyn ResumeAnalyzer>,
    timeout: Duration,
    job_description: String,
    resume_uri: String,
    candidate_id: Uuid,
) -> AnalysisResult {
    match tokio::time::timeout(timeout, analyzer.analyze_resume(&job_description, &resume_uri)).await
    {
        Ok(Ok(analysis)) => AnalysisResult::from_analysis(candidate_id, analysis),
        Ok(Err(e)) => {
            tracing::warn!(candidate = %candidate_id, error = %e, "Resume scoring call failed");
            AnalysisResult::failed(candidate_id, "scoring call failed")
        }
        Err(_) => {
            tracing::warn!(candidate = %candidate_id, "Resume scoring call timed out");
            AnalysisResult::failed(candidate_id, "scoring call timed out")
        }
    }
}

impl TriageService {
    pub fn new(
        store: Arc<EntityStore>,
        scores: Arc<ScoreCache>,
        analyzer: Arc<dyn ResumeAnalyzer>,
        analysis_timeout: Duration,
        max_batch_resumes: usize,
    ) -> Self {
        Self {
            store,
            scores,
            analyzer,
            analysis_timeout,
            max_batch_resumes,
        }
    }

    /// Scores every applicant of a vacancy, replaces that vacancy's entry
    /// in the session score cache and returns the working list sorted by
    /// score descending. Re-running simply overwrites the previous scores.
    pub async fn analyze_vacancy(&self, vacancy_id: &str) -> Result<Vec<TriagedCandidate>> {
        let vacancy = self.store.get_vacancy(vacancy_id).await?;
        let job_description = vacancy.job_description_text();

        let applications = self.store.applications_for_vacancy(vacancy_id).await;
        let mut candidates = Vec::with_capacity(applications.len());
        for application in &applications {
            match self.store.get_candidate(application.candidate_id).await {
                Ok(candidate) => candidates.push(candidate),
                Err(_) => {
                    tracing::warn!(
                        application = %application.id,
                        candidate = %application.candidate_id,
                        "Application references a missing candidate; skipping"
                    );
                }
            }
        }

        tracing::info!(
            vacancy = vacancy_id,
            candidates = candidates.len(),
            "Starting batch resume analysis"
        );

        let results = self.analyze_batch(&job_description, &candidates).await;
        self.scores.replace(vacancy_id, results.clone()).await;

        let mut triaged: Vec<TriagedCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let analysis = results.get(&candidate.id).cloned();
                TriagedCandidate { candidate, analysis }
            })
            .collect();
        sort_by_score_desc(&mut triaged);
        Ok(triaged)
    }

    /// Fan-out/fan-in with per-candidate isolation. Returns exactly one
    /// result per input candidate: missing résumés and failed or timed out
    /// calls come back as zero-score results, never as an aborted batch.
    pub async fn analyze_batch(
        &self,
        job_description: &str,
        candidates: &[crate::models::candidate::Candidate],
    ) -> HashMap<Uuid, AnalysisResult> {
        let mut results: HashMap<Uuid, AnalysisResult> = candidates
            .iter()
            .map(|c| (c.id, AnalysisResult::failed(c.id, "scoring call failed")))
            .collect();

        let mut set = JoinSet::new();
        for candidate in candidates {
            match &candidate.resume_uri {
                None => {
                    results.insert(candidate.id, AnalysisResult::no_resume(candidate.id));
                }
                Some(uri) => {
                    set.spawn(score_resume(
                        Arc::clone(&self.analyzer),
                        self.analysis_timeout,
                        job_description.to_string(),
                        uri.clone(),
                        candidate.id,
                    ));
                }
            }
        }

        // Fan-in barrier: nothing downstream runs until every call settled.
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => {
                    results.insert(result.candidate_id, result);
                }
                Err(e) => {
                    // The degraded placeholder for that candidate stays in place.
                    tracing::error!(error = %e, "Resume scoring task aborted");
                }
            }
        }

        results
    }

    /// Ad-hoc flow: score a pile of résumés against a free-form job
    /// description without creating any entities. Capped per config.
    pub async fn analyze_resumes(
        &self,
        job_description: &str,
        resumes: Vec<(String, String)>,
    ) -> Result<Vec<AdHocAnalysis>> {
        if resumes.len() > self.max_batch_resumes {
            return Err(Error::BadRequest(format!(
                "At most {} resumes can be analyzed per batch",
                self.max_batch_resumes
            )));
        }

        let mut labels: HashMap<Uuid, String> = HashMap::new();
        let mut set = JoinSet::new();
        for (label, uri) in resumes {
            let id = Uuid::new_v4();
            labels.insert(id, label);
            set.spawn(score_resume(
                Arc::clone(&self.analyzer),
                self.analysis_timeout,
                job_description.to_string(),
                uri,
                id,
            ));
        }

        let mut analyses = Vec::with_capacity(labels.len());
        while let Some(joined) = set.join_next().await {
            if let Ok(result) = joined {
                let label = labels
                    .get(&result.candidate_id)
                    .cloned()
                    .unwrap_or_default();
                analyses.push(AdHocAnalysis {
                    label,
                    score: result.score,
                    summary: result.summary,
                    key_skills_match: result.key_skills_match,
                    areas_for_improvement: result.areas_for_improvement,
                });
            }
        }
        analyses.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(analyses)
    }

    /// Promotes selected candidates into the vacancy's pipeline. Existing
    /// applications are skipped, not duplicated, and reported distinctly;
    /// one bad candidate never aborts the rest.
    pub async fn promote(
        &self,
        vacancy_id: &str,
        candidate_ids: &[Uuid],
        initial_status: ApplicationStatus,
    ) -> Result<PromotionOutcome> {
        if !matches!(
            initial_status,
            ApplicationStatus::Received | ApplicationStatus::Screening
        ) {
            return Err(Error::BadRequest(
                "Candidates can only be promoted into received or screening".to_string(),
            ));
        }
        self.store.get_vacancy(vacancy_id).await?;

        let mut outcome = PromotionOutcome {
            promoted: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        };

        for &candidate_id in candidate_ids {
            let score = self
                .scores
                .get(vacancy_id, candidate_id)
                .await
                .map(|a| a.score);
            match self
                .store
                .create_application(candidate_id, vacancy_id, initial_status, score)
                .await
            {
                Ok(_) => outcome.promoted.push(candidate_id),
                Err(Error::DuplicateApplication(_)) => outcome.skipped.push(candidate_id),
                Err(e) => {
                    tracing::warn!(candidate = %candidate_id, error = %e, "Promotion failed");
                    outcome.failed.push(PromotionFailure {
                        candidate_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            vacancy = vacancy_id,
            promoted = outcome.promoted.len(),
            skipped = outcome.skipped.len(),
            "Promotion complete"
        );
        Ok(outcome)
    }
}
