use reqwest::Client;
use serde_json::Value as JsonValue;

use crate::models::application::Application;
use crate::models::candidate::Candidate;

/// Best-effort candidate notifications on pipeline events. Delivery is a
/// single webhook POST when a target URL is configured, a log line
/// otherwise; a failed delivery never fails the triggering operation.
#[derive(Clone)]
pub struct NotificationService {
    client: Client,
    target_url: Option<String>,
}

impl NotificationService {
    pub fn new(target_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            target_url,
        }
    }

    pub async fn notify_application_received(&self, application: &Application, candidate: &Candidate) {
        let payload = serde_json::json!({
            "event": "application_received",
            "application_id": application.id,
            "candidate_id": application.candidate_id,
            "candidate_email": candidate.email,
            "vacancy_id": application.vacancy_id,
            "status": application.status,
        });
        self.send("application_received", payload).await;
    }

    pub async fn notify_status_change(&self, application: &Application, candidate: Option<&Candidate>) {
        let payload = serde_json::json!({
            "event": "application_status_changed",
            "application_id": application.id,
            "candidate_id": application.candidate_id,
            "candidate_email": candidate.map(|c| c.email.clone()),
            "vacancy_id": application.vacancy_id,
            "status": application.status,
        });
        self.send("application_status_changed", payload).await;
    }

    async fn send(&self, event_type: &str, payload: JsonValue) {
        let Some(url) = &self.target_url else {
            tracing::info!(event = event_type, "No notification webhook configured, skipping delivery");
            return;
        };

        match self.client.post(url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(event = event_type, "Notification delivered");
            }
            Ok(resp) => {
                tracing::warn!(
                    event = event_type,
                    status = %resp.status(),
                    "Notification endpoint returned an error"
                );
            }
            Err(err) => {
                tracing::warn!(event = event_type, error = %err, "Notification delivery failed");
            }
        }
    }
}
