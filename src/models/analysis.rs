use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::Candidate;

/// Wire contract of the scoring collaborator. Field names follow the
/// external service, hence the camelCase renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub candidate_ranking: i32,
    pub candidate_summary: String,
    pub key_skills_match: String,
    pub areas_for_improvement: String,
}

/// Scoring output for one (vacancy, candidate) pair. Ephemeral: lives in
/// the session score cache and is replaced wholesale on re-analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub candidate_id: Uuid,
    pub score: i32,
    pub summary: String,
    pub key_skills_match: String,
    pub areas_for_improvement: String,
}

impl AnalysisResult {
    pub fn from_analysis(candidate_id: Uuid, analysis: ResumeAnalysis) -> Self {
        Self {
            candidate_id,
            score: analysis.candidate_ranking.clamp(0, 100),
            summary: analysis.candidate_summary,
            key_skills_match: analysis.key_skills_match,
            areas_for_improvement: analysis.areas_for_improvement,
        }
    }

    /// Degraded result for a candidate with no résumé on file. Never sent
    /// to the external service.
    pub fn no_resume(candidate_id: Uuid) -> Self {
        Self {
            candidate_id,
            score: 0,
            summary: "No résumé on file; candidate was not analyzed.".to_string(),
            key_skills_match: String::new(),
            areas_for_improvement: String::new(),
        }
    }

    /// Degraded result for a failed or timed out scoring call. The batch
    /// still completes with one result per candidate.
    pub fn failed(candidate_id: Uuid, reason: &str) -> Self {
        Self {
            candidate_id,
            score: 0,
            summary: format!("Analysis failed: {}", reason),
            key_skills_match: String::new(),
            areas_for_improvement: String::new(),
        }
    }
}

/// One row of a triage session: the candidate plus the analysis that the
/// latest batch produced for them, if any.
#[derive(Debug, Clone, Serialize)]
pub struct TriagedCandidate {
    pub candidate: Candidate,
    pub analysis: Option<AnalysisResult>,
}

impl TriagedCandidate {
    pub fn score(&self) -> Option<i32> {
        self.analysis.as_ref().map(|a| a.score)
    }
}

/// Sort score-descending; analyzed zeros come after positive scores and
/// never-analyzed candidates sort last of all.
pub fn sort_by_score_desc(list: &mut [TriagedCandidate]) {
    list.sort_by(|a, b| match (a.score(), b.score()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
