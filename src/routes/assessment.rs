use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{dto::assessment_dto::GenerateTestPayload, error::Result, AppState};

#[utoipa::path(
    post,
    path = "/api/vacancies/{id}/tests/generate",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    request_body = GenerateTestPayload,
    responses(
        (status = 201, description = "Assessment test generated and attached"),
        (status = 404, description = "Vacancy not found"),
        (status = 502, description = "Generation collaborator failed")
    )
)]
#[axum::debug_handler]
pub async fn generate_test(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<GenerateTestPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let test = state
        .test_service
        .generate_for_vacancy(
            &id,
            payload.title,
            payload.num_multiple_choice,
            payload.num_short_answer,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(test)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}/tests",
    params(
        ("id" = String, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Assessment tests attached to the vacancy"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn list_tests(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let tests = state.test_service.list_for_vacancy(&id).await?;
    Ok(Json(tests))
}
