use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::services::notification_service::NotificationService;
use crate::store::{ApplicationPatch, EntityStore};

#[derive(Debug, Serialize)]
pub struct BulkTransitionOutcome {
    pub updated: Vec<String>,
    pub failed: Vec<BulkTransitionFailure>,
}

#[derive(Debug, Serialize)]
pub struct BulkTransitionFailure {
    pub application_id: String,
    pub reason: String,
}

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<EntityStore>,
    notifications: NotificationService,
}

impl ApplicationService {
    pub fn new(store: Arc<EntityStore>, notifications: NotificationService) -> Self {
        Self {
            store,
            notifications,
        }
    }

    /// A candidate applies to a vacancy. The profile must carry a résumé
    /// reference, a professional title and years of experience before the
    /// create is even attempted; the (candidate, vacancy) uniqueness check
    /// itself lives in the store.
    pub async fn apply(&self, candidate_id: uuid::Uuid, vacancy_id: &str) -> Result<Application> {
        let candidate = self.store.get_candidate(candidate_id).await?;

        let missing = candidate.missing_application_fields();
        if !missing.is_empty() {
            return Err(Error::IncompleteProfile(format!(
                "Profile is missing required fields: {}",
                missing.join(", ")
            )));
        }

        self.store.get_vacancy(vacancy_id).await?;

        let application = self
            .store
            .create_application(candidate_id, vacancy_id, ApplicationStatus::Received, None)
            .await?;

        tracing::info!(
            application = %application.id,
            candidate = %candidate_id,
            vacancy = vacancy_id,
            "Application received"
        );

        let notifications = self.notifications.clone();
        let app = application.clone();
        tokio::spawn(async move {
            notifications.notify_application_received(&app, &candidate).await;
        });

        Ok(application)
    }

    /// Moves one application through the state machine. Illegal moves are
    /// rejected before anything is written; legal moves are persisted and
    /// the candidate is notified best-effort.
    pub async fn transition(
        &self,
        application_id: &str,
        next: ApplicationStatus,
    ) -> Result<Application> {
        let application = self.store.get_application(application_id).await?;

        if !application.status.can_transition_to(next) {
            return Err(Error::InvalidTransition(format!(
                "{} -> {}",
                application.status.as_str(),
                next.as_str()
            )));
        }

        let updated = self
            .store
            .update_application(
                application_id,
                ApplicationPatch {
                    status: Some(next),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(
            application = %application_id,
            from = application.status.as_str(),
            to = next.as_str(),
            "Application status changed"
        );

        let candidate = self.store.get_candidate(updated.candidate_id).await.ok();
        let notifications = self.notifications.clone();
        let app = updated.clone();
        tokio::spawn(async move {
            notifications
                .notify_status_change(&app, candidate.as_ref())
                .await;
        });

        Ok(updated)
    }

    /// Applies the same transition to every selected application. Each
    /// update is independent: a missing or ineligible application is
    /// recorded and the rest proceed.
    pub async fn transition_many(
        &self,
        application_ids: &[String],
        next: ApplicationStatus,
    ) -> BulkTransitionOutcome {
        let mut outcome = BulkTransitionOutcome {
            updated: Vec::new(),
            failed: Vec::new(),
        };

        for id in application_ids {
            match self.transition(id, next).await {
                Ok(_) => outcome.updated.push(id.clone()),
                Err(e) => {
                    tracing::warn!(application = %id, error = %e, "Bulk transition item failed");
                    outcome.failed.push(BulkTransitionFailure {
                        application_id: id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    pub async fn update_notes(&self, application_id: &str, notes: String) -> Result<Application> {
        self.store
            .update_application(
                application_id,
                ApplicationPatch {
                    notes: Some(notes),
                    ..Default::default()
                },
            )
            .await
    }
}
