mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use common::{resume_uri, test_state, StubAnalyzer};
use triage_backend::routes;

fn app(analyzer: StubAnalyzer) -> Router {
    let state = test_state(analyzer);
    Router::new()
        .route(
            "/api/vacancies",
            get(routes::vacancy::list_vacancies).post(routes::vacancy::create_vacancy),
        )
        .route(
            "/api/vacancies/:id",
            get(routes::vacancy::get_vacancy)
                .patch(routes::vacancy::update_vacancy)
                .delete(routes::vacancy::delete_vacancy),
        )
        .route(
            "/api/candidates",
            post(routes::candidate::register_candidate),
        )
        .route("/api/applications", post(routes::application::apply))
        .route(
            "/api/applications/:id/status",
            patch(routes::application::update_status),
        )
        .route(
            "/api/applications/:id/notes",
            patch(routes::application::update_notes),
        )
        .route(
            "/api/vacancies/:id/board",
            get(routes::application::pipeline_board),
        )
        .route(
            "/api/vacancies/:id/triage",
            post(routes::triage::analyze_vacancy),
        )
        .route("/api/vacancies/:id/promote", post(routes::triage::promote))
        .route(
            "/api/vacancies/:id/tests/generate",
            post(routes::assessment::generate_test),
        )
        .route(
            "/api/vacancies/:id/tests",
            get(routes::assessment::list_tests),
        )
        .with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(value.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn recruitment_flow_end_to_end() {
    let cv = resume_uri("strong cv");
    let app = app(StubAnalyzer::new().score(&cv, 75));

    let (status, vacancy) = send(
        &app,
        "POST",
        "/api/vacancies",
        Some(json!({
            "title": "Data Engineer",
            "category": "Engineering",
            "location": "Remote",
            "contract_type": "remote",
            "description": "Pipelines all day.",
            "responsibilities": ["Build ETL"],
            "requirements": ["SQL", "Rust"],
            "recruiter_id": "rec-9"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let vacancy_id = vacancy["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", "/api/vacancies", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, candidate) = send(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "years_experience": 6,
            "title": "Data Engineer",
            "resume_uri": cv
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let candidate_id = candidate["id"].as_str().unwrap().to_string();

    let apply_body = json!({ "candidate_id": candidate_id, "vacancy_id": vacancy_id });
    let (status, application) = send(&app, "POST", "/api/applications", Some(apply_body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(application["status"], "received");
    let application_id = application["id"].as_str().unwrap().to_string();

    // Applying twice for the same pair conflicts and stores nothing new.
    let (status, body) = send(&app, "POST", "/api/applications", Some(apply_body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already applied"));

    // An incomplete profile is blocked before any create is attempted.
    let (_, incomplete) = send(
        &app,
        "POST",
        "/api/candidates",
        Some(json!({ "name": "No Resume", "email": "nr@example.com" })),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/applications",
        Some(json!({
            "candidate_id": incomplete["id"].as_str().unwrap(),
            "vacancy_id": vacancy_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("resume_uri"));

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/applications/{}/status", application_id),
        Some(json!({ "status": "interview" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Backward move is a conflict.
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/applications/{}/status", application_id),
        Some(json!({ "status": "screening" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/applications/{}/notes", application_id),
        Some(json!({ "notes": "Great systems background" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, triaged) = send(
        &app,
        "POST",
        &format!("/api/vacancies/{}/triage", vacancy_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = triaged.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["analysis"]["score"], 75);

    let (status, board) = send(
        &app,
        "GET",
        &format!("/api/vacancies/{}/board", vacancy_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let interview_stage = board["stages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["status"] == "interview")
        .unwrap();
    assert_eq!(interview_stage["entries"].as_array().unwrap().len(), 1);
    assert_eq!(interview_stage["entries"][0]["score"], 75);

    // Everyone above 50 is already in the pipeline, so promotion skips.
    let (status, outcome) = send(
        &app,
        "POST",
        &format!("/api/vacancies/{}/promote", vacancy_id),
        Some(json!({ "threshold": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["promoted"].as_array().unwrap().len(), 0);
    assert_eq!(outcome["skipped"].as_array().unwrap().len(), 1);

    let (status, test) = send(
        &app,
        "POST",
        &format!("/api/vacancies/{}/tests/generate", vacancy_id),
        Some(json!({ "num_multiple_choice": 3, "num_short_answer": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(test["questions"].as_array().unwrap().len(), 3);

    let (status, tests) = send(
        &app,
        "GET",
        &format!("/api/vacancies/{}/tests", vacancy_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tests.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn vacancy_validation_rejects_empty_titles() {
    let app = app(StubAnalyzer::new());

    let (status, _) = send(
        &app,
        "POST",
        "/api/vacancies",
        Some(json!({
            "title": "",
            "category": "Engineering",
            "location": "Remote",
            "contract_type": "full_time",
            "description": "x",
            "recruiter_id": "rec-1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_vacancy_is_a_not_found_response() {
    let app = app(StubAnalyzer::new());

    let (status, body) = send(&app, "GET", "/api/vacancies/vac-missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}
