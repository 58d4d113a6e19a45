use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::application_dto::{ApplyPayload, BulkStatusPayload, NotesPayload, StatusUpdatePayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application created"),
        (status = 404, description = "Candidate or vacancy not found"),
        (status = 409, description = "Candidate already applied to this vacancy"),
        (status = 422, description = "Candidate profile is incomplete")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .apply(payload.candidate_id, &payload.vacancy_id)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}/applications",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Applications for the vacancy")
    )
)]
#[axum::debug_handler]
pub async fn list_for_vacancy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.store.get_vacancy(&id).await?;
    let applications = state.store.applications_for_vacancy(&id).await;
    Ok(Json(applications))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = StatusUpdatePayload,
    responses(
        (status = 200, description = "Status updated"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdatePayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .transition(&id, payload.status)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}/notes",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = NotesPayload,
    responses(
        (status = 200, description = "Notes updated"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NotesPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_notes(&id, payload.notes)
        .await?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/applications/bulk-status",
    request_body = BulkStatusPayload,
    responses(
        (status = 200, description = "Per-application outcome of the bulk transition")
    )
)]
#[axum::debug_handler]
pub async fn bulk_update_status(
    State(state): State<AppState>,
    Json(payload): Json<BulkStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let outcome = state
        .application_service
        .transition_many(&payload.application_ids, payload.status)
        .await;
    Ok(Json(outcome))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}/board",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Staged pipeline board for the vacancy"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn pipeline_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let board = state.pipeline_service.board_for_vacancy(&id).await?;
    Ok(Json(board))
}
