use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{Result, StorageError};

/// Lifecycle state of a bout.
///
/// ```text
/// Pending --accept--> Accepted --complete--> Completed
///    |                   |
///    +--decline--> Declined
///    +--cancel---> Cancelled <--cancel--+
/// ```
///
/// `Completed`, `Cancelled` and `Declined` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bout_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoutState {
    Pending,
    Accepted,
    Completed,
    Cancelled,
    Declined,
}

impl BoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Declined => "declined",
        }
    }

    /// The legacy `accepted` flag: true once accepted, including after completion.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted | Self::Completed)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Declined)
    }
}

impl std::fmt::Display for BoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bout {
    pub bout_id: i32,
    pub challenger_id: i32,
    pub acceptor_id: i32,
    pub style_id: i32,
    pub referee_id: Option<i32>,
    pub state: BoutState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Bout {
    pub fn is_participant(&self, athlete_id: i32) -> bool {
        self.challenger_id == athlete_id || self.acceptor_id == athlete_id
    }

    /// Next state for an accept, legal only from `Pending`.
    pub fn accept(&self) -> Result<BoutState> {
        self.require(BoutState::Pending, "accept")?;
        Ok(BoutState::Accepted)
    }

    /// Next state for a decline, legal only from `Pending`.
    pub fn decline(&self) -> Result<BoutState> {
        self.require(BoutState::Pending, "decline")?;
        Ok(BoutState::Declined)
    }

    /// Next state for a cancel requested by `caller_id`.
    ///
    /// Only the stored challenger may cancel, and only while the bout is
    /// still `Pending` or `Accepted`.
    pub fn cancel(&self, caller_id: i32) -> Result<BoutState> {
        if caller_id != self.challenger_id {
            return Err(StorageError::Forbidden(format!(
                "athlete {} is not the challenger of bout {}",
                caller_id, self.bout_id
            )));
        }

        match self.state {
            BoutState::Pending | BoutState::Accepted => Ok(BoutState::Cancelled),
            state => Err(self.invalid("cancel", state)),
        }
    }

    /// Next state for a completion, legal only from `Accepted`.
    pub fn complete(&self) -> Result<BoutState> {
        self.require(BoutState::Accepted, "complete")?;
        Ok(BoutState::Completed)
    }

    /// An outcome may only be recorded against an accepted, unfinished bout.
    pub fn ensure_open_for_outcome(&self) -> Result<()> {
        self.require(BoutState::Accepted, "record an outcome for")
    }

    /// Participant and style edits are only allowed before acceptance.
    pub fn ensure_editable(&self) -> Result<()> {
        self.require(BoutState::Pending, "edit")
    }

    pub fn ensure_deletable(&self) -> Result<()> {
        if self.state.is_completed() {
            return Err(self.invalid("delete", self.state));
        }
        Ok(())
    }

    fn require(&self, expected: BoutState, action: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(action, self.state))
        }
    }

    fn invalid(&self, action: &str, state: BoutState) -> StorageError {
        StorageError::InvalidTransition(format!(
            "cannot {} bout {} in state {}",
            action, self.bout_id, state
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bout(state: BoutState) -> Bout {
        let now = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        Bout {
            bout_id: 7,
            challenger_id: 1,
            acceptor_id: 2,
            style_id: 3,
            referee_id: None,
            state,
            created_at: now,
            updated_at: now,
        }
    }

    fn is_invalid_transition<T: std::fmt::Debug>(result: Result<T>) -> bool {
        matches!(result, Err(StorageError::InvalidTransition(_)))
    }

    #[test]
    fn test_accept_from_pending() {
        assert_eq!(bout(BoutState::Pending).accept().unwrap(), BoutState::Accepted);
    }

    #[test]
    fn test_accept_is_at_most_once() {
        let mut b = bout(BoutState::Pending);
        b.state = b.accept().unwrap();
        assert!(is_invalid_transition(b.accept()));
    }

    #[test]
    fn test_decline_after_accept_fails() {
        let mut b = bout(BoutState::Pending);
        b.state = b.accept().unwrap();
        assert!(is_invalid_transition(b.decline()));
    }

    #[test]
    fn test_decline_is_terminal() {
        let mut b = bout(BoutState::Pending);
        b.state = b.decline().unwrap();
        assert_eq!(b.state, BoutState::Declined);
        assert!(is_invalid_transition(b.accept()));
        assert!(is_invalid_transition(b.decline()));
        assert!(is_invalid_transition(b.cancel(1)));
        assert!(is_invalid_transition(b.complete()));
    }

    #[test]
    fn test_cancel_by_non_challenger_is_forbidden() {
        for state in [BoutState::Pending, BoutState::Accepted, BoutState::Completed] {
            let result = bout(state).cancel(2);
            assert!(matches!(result, Err(StorageError::Forbidden(_))), "{state}");
        }
    }

    #[test]
    fn test_cancel_by_challenger_before_completion() {
        assert_eq!(bout(BoutState::Pending).cancel(1).unwrap(), BoutState::Cancelled);
        assert_eq!(bout(BoutState::Accepted).cancel(1).unwrap(), BoutState::Cancelled);
    }

    #[test]
    fn test_cancel_completed_bout_fails() {
        assert!(is_invalid_transition(bout(BoutState::Completed).cancel(1)));
    }

    #[test]
    fn test_cancel_twice_fails() {
        assert!(is_invalid_transition(bout(BoutState::Cancelled).cancel(1)));
    }

    #[test]
    fn test_complete_requires_accepted() {
        assert!(is_invalid_transition(bout(BoutState::Pending).complete()));
        assert!(is_invalid_transition(bout(BoutState::Cancelled).complete()));
        assert_eq!(bout(BoutState::Accepted).complete().unwrap(), BoutState::Completed);
    }

    #[test]
    fn test_complete_twice_fails() {
        let mut b = bout(BoutState::Accepted);
        b.state = b.complete().unwrap();
        assert!(is_invalid_transition(b.complete()));
    }

    #[test]
    fn test_outcome_only_for_accepted_bout() {
        assert!(bout(BoutState::Accepted).ensure_open_for_outcome().is_ok());
        for state in [
            BoutState::Pending,
            BoutState::Completed,
            BoutState::Cancelled,
            BoutState::Declined,
        ] {
            assert!(is_invalid_transition(bout(state).ensure_open_for_outcome()));
        }
    }

    #[test]
    fn test_completed_bout_cannot_be_deleted() {
        assert!(bout(BoutState::Pending).ensure_deletable().is_ok());
        assert!(bout(BoutState::Cancelled).ensure_deletable().is_ok());
        assert!(is_invalid_transition(bout(BoutState::Completed).ensure_deletable()));
    }

    #[test]
    fn test_legacy_flags() {
        assert!(!BoutState::Pending.is_accepted());
        assert!(BoutState::Accepted.is_accepted());
        assert!(BoutState::Completed.is_accepted());
        assert!(BoutState::Completed.is_completed());
        assert!(!BoutState::Accepted.is_completed());
        assert!(BoutState::Declined.is_terminal());
        assert!(!BoutState::Accepted.is_terminal());
    }

    #[test]
    fn test_participants() {
        let b = bout(BoutState::Pending);
        assert!(b.is_participant(1));
        assert!(b.is_participant(2));
        assert!(!b.is_participant(3));
    }
}
