mod common;

use std::collections::HashMap;

use common::{resume_uri, seed_candidate, seed_vacancy, test_state, StubAnalyzer};
use triage_backend::error::Error;
use triage_backend::models::analysis::AnalysisResult;
use triage_backend::models::application::ApplicationStatus;
use triage_backend::services::pipeline_service::project_board;
use triage_backend::store::ApplicationPatch;

#[tokio::test]
async fn legal_transitions_are_persisted() {
    let state = test_state(StubAnalyzer::new());
    let vacancy = seed_vacancy(&state).await;
    let candidate = seed_candidate(&state, "Flow", Some(resume_uri("cv"))).await;
    let application = state
        .application_service
        .apply(candidate.id, &vacancy.id)
        .await
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::Received);

    let updated = state
        .application_service
        .transition(&application.id, ApplicationStatus::Interview)
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Interview);

    let stored = state.store.get_application(&application.id).await.unwrap();
    assert_eq!(stored.status, ApplicationStatus::Interview);
}

#[tokio::test]
async fn backward_transitions_are_rejected() {
    let state = test_state(StubAnalyzer::new());
    let vacancy = seed_vacancy(&state).await;
    let candidate = seed_candidate(&state, "Back", Some(resume_uri("cv"))).await;
    let application = state
        .application_service
        .apply(candidate.id, &vacancy.id)
        .await
        .unwrap();

    state
        .application_service
        .transition(&application.id, ApplicationStatus::Offer)
        .await
        .unwrap();

    let err = state
        .application_service
        .transition(&application.id, ApplicationStatus::Screening)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTransition(_)));

    let stored = state.store.get_application(&application.id).await.unwrap();
    assert_eq!(stored.status, ApplicationStatus::Offer);
}

#[tokio::test]
async fn terminal_states_reject_further_moves() {
    let state = test_state(StubAnalyzer::new());
    let vacancy = seed_vacancy(&state).await;
    let candidate = seed_candidate(&state, "Done", Some(resume_uri("cv"))).await;
    let application = state
        .application_service
        .apply(candidate.id, &vacancy.id)
        .await
        .unwrap();

    state
        .application_service
        .transition(&application.id, ApplicationStatus::Rejected)
        .await
        .unwrap();

    let err = state
        .application_service
        .transition(&application.id, ApplicationStatus::Received)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTransition(_)));
}

#[tokio::test]
async fn incomplete_profile_blocks_the_application() {
    let state = test_state(StubAnalyzer::new());
    let vacancy = seed_vacancy(&state).await;
    // No résumé on file.
    let candidate = seed_candidate(&state, "No Resume", None).await;

    let err = state
        .application_service
        .apply(candidate.id, &vacancy.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::IncompleteProfile(_)));
    assert!(state.store.applications_for_vacancy(&vacancy.id).await.is_empty());
}

#[tokio::test]
async fn bulk_reject_survives_a_concurrently_deleted_application() {
    let state = test_state(StubAnalyzer::new());
    let vacancy = seed_vacancy(&state).await;

    let mut ids = Vec::new();
    for name in ["Bulk One", "Bulk Two", "Bulk Three"] {
        let candidate = seed_candidate(&state, name, Some(resume_uri(name))).await;
        let application = state
            .application_service
            .apply(candidate.id, &vacancy.id)
            .await
            .unwrap();
        ids.push(application.id);
    }

    // Another path removed one of them mid-selection.
    state.store.delete_application(&ids[1]).await;

    let outcome = state
        .application_service
        .transition_many(&ids, ApplicationStatus::Rejected)
        .await;

    assert_eq!(outcome.updated.len(), 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].application_id, ids[1]);

    for id in [&ids[0], &ids[2]] {
        let stored = state.store.get_application(id).await.unwrap();
        assert_eq!(stored.status, ApplicationStatus::Rejected);
    }
}

#[tokio::test]
async fn board_places_interview_applications_in_the_interview_stage_sorted() {
    let state = test_state(StubAnalyzer::new());
    let vacancy = seed_vacancy(&state).await;

    let mut interview_ids = Vec::new();
    for (name, score) in [("Int Low", 35), ("Int High", 90), ("Int Mid", 60)] {
        let candidate = seed_candidate(&state, name, Some(resume_uri(name))).await;
        let application = state
            .application_service
            .apply(candidate.id, &vacancy.id)
            .await
            .unwrap();
        state
            .application_service
            .transition(&application.id, ApplicationStatus::Interview)
            .await
            .unwrap();
        state
            .store
            .update_application(
                &application.id,
                ApplicationPatch {
                    score: Some(score),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        interview_ids.push(application.id);
    }

    // One application left in the initial stage.
    let other = seed_candidate(&state, "Still Received", Some(resume_uri("still"))).await;
    state
        .application_service
        .apply(other.id, &vacancy.id)
        .await
        .unwrap();

    let board = state.pipeline_service.board_for_vacancy(&vacancy.id).await.unwrap();

    let interview = board
        .stages
        .iter()
        .find(|s| s.status == ApplicationStatus::Interview)
        .unwrap();
    assert_eq!(interview.entries.len(), 3);
    let scores: Vec<Option<i32>> = interview.entries.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![Some(90), Some(60), Some(35)]);

    let received = board
        .stages
        .iter()
        .find(|s| s.status == ApplicationStatus::Received)
        .unwrap();
    assert_eq!(received.entries.len(), 1);
}

#[tokio::test]
async fn board_sorts_unscored_entries_last_and_tolerates_dangling_candidates() {
    use chrono::Utc;
    use triage_backend::models::application::Application;
    use uuid::Uuid;

    let scored_id = Uuid::new_v4();
    let unscored_id = Uuid::new_v4();

    let applications = vec![
        Application {
            id: Application::id_for(unscored_id, "vac-x"),
            candidate_id: unscored_id,
            vacancy_id: "vac-x".to_string(),
            status: ApplicationStatus::Screening,
            applied_at: Utc::now(),
            notes: None,
            score: None,
        },
        Application {
            id: Application::id_for(scored_id, "vac-x"),
            candidate_id: scored_id,
            vacancy_id: "vac-x".to_string(),
            status: ApplicationStatus::Screening,
            applied_at: Utc::now(),
            notes: None,
            score: None,
        },
    ];

    let mut scores = HashMap::new();
    scores.insert(
        scored_id,
        AnalysisResult {
            candidate_id: scored_id,
            score: 42,
            summary: "ok".to_string(),
            key_skills_match: String::new(),
            areas_for_improvement: String::new(),
        },
    );

    // No candidate records at all: every entry's candidate is dangling.
    let board = project_board("vac-x", applications, &HashMap::new(), &scores);

    let screening = board
        .stages
        .iter()
        .find(|s| s.status == ApplicationStatus::Screening)
        .unwrap();
    assert_eq!(screening.entries.len(), 2);
    assert_eq!(screening.entries[0].score, Some(42));
    assert_eq!(screening.entries[1].score, None);
    assert!(screening.entries.iter().all(|e| e.candidate.is_none()));
}

#[tokio::test]
async fn board_for_a_deleted_vacancy_is_not_found() {
    let state = test_state(StubAnalyzer::new());
    let vacancy = seed_vacancy(&state).await;
    state.store.delete_vacancy(&vacancy.id).await;

    let err = state
        .pipeline_service
        .board_for_vacancy(&vacancy.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
