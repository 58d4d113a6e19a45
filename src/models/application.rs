use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered recruitment stages. `Rejected` sits outside the forward order
/// and is reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Received,
    Screening,
    Testing,
    Interview,
    Offer,
    Hired,
    Rejected,
}

/// Stage columns in board order, `Rejected` last.
pub const STAGE_ORDER: [ApplicationStatus; 7] = [
    ApplicationStatus::Received,
    ApplicationStatus::Screening,
    ApplicationStatus::Testing,
    ApplicationStatus::Interview,
    ApplicationStatus::Offer,
    ApplicationStatus::Hired,
    ApplicationStatus::Rejected,
];

impl ApplicationStatus {
    /// Position in the forward pipeline; `Rejected` has none.
    fn stage_index(self) -> Option<usize> {
        match self {
            ApplicationStatus::Received => Some(0),
            ApplicationStatus::Screening => Some(1),
            ApplicationStatus::Testing => Some(2),
            ApplicationStatus::Interview => Some(3),
            ApplicationStatus::Offer => Some(4),
            ApplicationStatus::Hired => Some(5),
            ApplicationStatus::Rejected => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }

    /// Forward-only rule: from a non-terminal state, moving to `Rejected`
    /// or any strictly later stage is legal. Backward and self transitions
    /// are not, and terminal states are frozen.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            ApplicationStatus::Rejected => true,
            _ => match (self.stage_index(), next.stage_index()) {
                (Some(from), Some(to)) => to > from,
                _ => false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Received => "received",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Testing => "testing",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub candidate_id: Uuid,
    pub vacancy_id: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub score: Option<i32>,
}

impl Application {
    /// Deterministic id so the (candidate, vacancy) pair is a constant-time
    /// key lookup, never a scan.
    pub fn id_for(candidate_id: Uuid, vacancy_id: &str) -> String {
        format!("{}_{}", candidate_id, vacancy_id)
    }
}

#[cfg(test)]
mod tests {
    use super::ApplicationStatus::*;

    #[test]
    fn forward_moves_are_legal() {
        assert!(Received.can_transition_to(Screening));
        assert!(Screening.can_transition_to(Testing));
        assert!(Interview.can_transition_to(Offer));
        assert!(Offer.can_transition_to(Hired));
    }

    #[test]
    fn forward_skips_are_legal() {
        assert!(Received.can_transition_to(Hired));
        assert!(Screening.can_transition_to(Interview));
    }

    #[test]
    fn backward_and_self_moves_are_illegal() {
        assert!(!Interview.can_transition_to(Screening));
        assert!(!Offer.can_transition_to(Received));
        assert!(!Testing.can_transition_to(Testing));
    }

    #[test]
    fn rejection_is_reachable_from_every_non_terminal_state() {
        for status in [Received, Screening, Testing, Interview, Offer] {
            assert!(status.can_transition_to(Rejected));
        }
    }

    #[test]
    fn terminal_states_are_frozen() {
        assert!(!Hired.can_transition_to(Rejected));
        assert!(!Hired.can_transition_to(Received));
        assert!(!Rejected.can_transition_to(Received));
        assert!(!Rejected.can_transition_to(Hired));
    }
}
