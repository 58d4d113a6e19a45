use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::triage_dto::{AnalyzeResumesPayload, PromotePayload},
    error::{Error, Result},
    models::application::ApplicationStatus,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/vacancies/{id}/triage",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Applicants scored and sorted, best first"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn analyze_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let triaged = state.triage_service.analyze_vacancy(&id).await?;
    Ok(Json(triaged))
}

#[utoipa::path(
    post,
    path = "/api/vacancies/{id}/promote",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    request_body = PromotePayload,
    responses(
        (status = 200, description = "Promotion outcome: promoted, skipped, failed"),
        (status = 400, description = "Neither candidate ids nor a threshold given"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn promote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PromotePayload>,
) -> Result<impl IntoResponse> {
    let candidate_ids: Vec<Uuid> = match (payload.candidate_ids, payload.threshold) {
        (Some(ids), _) => ids,
        (None, Some(threshold)) => state
            .scores
            .for_vacancy(&id)
            .await
            .into_values()
            .filter(|a| a.score > threshold)
            .map(|a| a.candidate_id)
            .collect(),
        (None, None) => {
            return Err(Error::BadRequest(
                "Provide candidate_ids or a score threshold".to_string(),
            ))
        }
    };

    let initial_status = payload.initial_status.unwrap_or(ApplicationStatus::Received);
    let outcome = state
        .triage_service
        .promote(&id, &candidate_ids, initial_status)
        .await?;
    Ok(Json(outcome))
}

#[utoipa::path(
    post,
    path = "/api/triage/resumes",
    request_body = AnalyzeResumesPayload,
    responses(
        (status = 200, description = "Ad-hoc resume scores, best first"),
        (status = 400, description = "Invalid payload or batch too large")
    )
)]
#[axum::debug_handler]
pub async fn analyze_resumes(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeResumesPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let resumes = payload
        .resumes
        .into_iter()
        .map(|r| (r.label, r.data_uri))
        .collect();
    let analyses = state
        .triage_service
        .analyze_resumes(&payload.job_description, resumes)
        .await?;
    Ok(Json(analyses))
}
