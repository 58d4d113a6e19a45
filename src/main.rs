use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use triage_backend::{
    config::{get_config, init_config},
    routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new();

    let app = Router::new()
        .route("/health", get(routes::health::health))
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
            get(routes::candidate::list_candidates).post(routes::candidate::register_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate::get_candidate).patch(routes::candidate::update_candidate),
        )
        .route(
            "/api/candidates/:id/profile",
            patch(routes::candidate::apply_extracted_profile),
        )
        .route("/api/applications", post(routes::application::apply))
        .route(
            "/api/vacancies/:id/applications",
            get(routes::application::list_for_vacancy),
        )
        .route(
            "/api/applications/:id/status",
            patch(routes::application::update_status),
        )
        .route(
            "/api/applications/:id/notes",
            patch(routes::application::update_notes),
        )
        .route(
            "/api/applications/bulk-status",
            post(routes::application::bulk_update_status),
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
        .route("/api/triage/resumes", post(routes::triage::analyze_resumes))
        .route(
            "/api/vacancies/:id/tests/generate",
            post(routes::assessment::generate_test),
        )
        .route(
            "/api/vacancies/:id/tests",
            get(routes::assessment::list_tests),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
