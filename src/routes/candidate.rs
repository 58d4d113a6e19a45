use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{ExtractedProfile, RegisterCandidatePayload, UpdateCandidatePayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/candidates",
    request_body = RegisterCandidatePayload,
    responses(
        (status = 201, description = "Candidate registered"),
        (status = 400, description = "Invalid payload or duplicate email")
    )
)]
#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.store.create_candidate(payload).await?;
    tracing::info!(candidate = %candidate.id, "Candidate registered");
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/candidates",
    responses(
        (status = 200, description = "List of candidates")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.store.list_candidates().await;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.store.get_candidate(id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.store.update_candidate(id, payload.into()).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}/profile",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    request_body = ExtractedProfile,
    responses(
        (status = 200, description = "Extracted profile applied"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn apply_extracted_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(profile): Json<ExtractedProfile>,
) -> Result<impl IntoResponse> {
    let candidate = state.store.update_candidate(id, profile.into()).await?;
    tracing::info!(candidate = %id, "Extracted profile applied");
    Ok(Json(candidate))
}
