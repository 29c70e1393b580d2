//! Outcome recording. Persisting an outcome, updating both ratings, bumping
//! the records and (for bout outcomes) completing the bout happen in one
//! transaction.

use sqlx::PgConnection;
use tracing::{info, warn};

use crate::Database;
use crate::dto::outcome::{CreateOutcomeRequest, RecordBoutOutcomeRequest};
use crate::error::{Result, StorageError};
use crate::models::{Bout, Outcome};
use crate::repository::bout::BoutRepository;
use crate::repository::outcome::OutcomeRepository;
use crate::repository::record::RecordRepository;
use crate::services::{bouts, rating};

/// Winner, loser and style of a match, before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub winner_id: i32,
    pub loser_id: i32,
    pub style_id: i32,
    pub is_draw: bool,
}

impl MatchResult {
    /// All ids set, and two distinct athletes.
    pub fn validate_shape(&self) -> Result<()> {
        if self.winner_id <= 0 || self.loser_id <= 0 || self.style_id <= 0 {
            return Err(StorageError::Validation(
                "winner_id, loser_id and style_id are required".to_string(),
            ));
        }
        if self.winner_id == self.loser_id {
            return Err(StorageError::Validation(
                "winner and loser must be different athletes".to_string(),
            ));
        }
        Ok(())
    }

    /// The result must name exactly the bout's two participants in the bout's style.
    pub fn ensure_matches(&self, bout: &Bout) -> Result<()> {
        let same_pair = (self.winner_id == bout.challenger_id && self.loser_id == bout.acceptor_id)
            || (self.winner_id == bout.acceptor_id && self.loser_id == bout.challenger_id);

        if !same_pair {
            return Err(StorageError::Validation(format!(
                "winner and loser must be the participants of bout {}",
                bout.bout_id
            )));
        }
        if self.style_id != bout.style_id {
            return Err(StorageError::Validation(format!(
                "style {} does not match bout {} style {}",
                self.style_id, bout.bout_id, bout.style_id
            )));
        }
        Ok(())
    }
}

impl From<&CreateOutcomeRequest> for MatchResult {
    fn from(req: &CreateOutcomeRequest) -> Self {
        Self {
            winner_id: req.winner_id,
            loser_id: req.loser_id,
            style_id: req.style_id,
            is_draw: req.is_draw,
        }
    }
}

impl From<&RecordBoutOutcomeRequest> for MatchResult {
    fn from(req: &RecordBoutOutcomeRequest) -> Self {
        Self {
            winner_id: req.winner_id,
            loser_id: req.loser_id,
            style_id: req.style_id,
            is_draw: req.is_draw,
        }
    }
}

/// Record the outcome of an accepted bout and complete it.
///
/// The bout row stays locked from the state check until commit, so of two
/// concurrent submissions the second one sees the bout `Completed`
/// (`InvalidTransition`) or the first outcome (`Conflict`).
pub async fn create_for_bout(
    db: &Database,
    bout_id: i32,
    req: &RecordBoutOutcomeRequest,
) -> Result<Outcome> {
    let result = MatchResult::from(req);
    result.validate_shape()?;
    if matches!(req.referee_id, Some(id) if id <= 0) {
        return Err(StorageError::Validation("referee_id must be positive".to_string()));
    }

    let mut tx = db.begin().await?;

    let bout = lock_open_bout(&mut tx, bout_id, &result).await?;

    let outcome = record(&mut tx, Some(bout_id), &result).await?;
    bouts::complete_locked(&mut tx, &bout, req.referee_id).await?;

    tx.commit().await?;

    info!(
        outcome_id = outcome.outcome_id,
        bout_id,
        winner_id = outcome.winner_id,
        loser_id = outcome.loser_id,
        is_draw = outcome.is_draw,
        "Bout outcome recorded"
    );
    Ok(outcome)
}

/// Record a standalone outcome. When it names a bout, the bout gets the
/// same checks as [`create_for_bout`] but stays `Accepted` until a referee
/// completes it.
pub async fn create(db: &Database, req: &CreateOutcomeRequest) -> Result<Outcome> {
    let result = MatchResult::from(req);
    result.validate_shape()?;

    let mut tx = db.begin().await?;

    if let Some(bout_id) = req.bout_id {
        lock_open_bout(&mut tx, bout_id, &result).await?;
    }

    let outcome = record(&mut tx, req.bout_id, &result).await?;

    tx.commit().await?;

    info!(
        outcome_id = outcome.outcome_id,
        bout_id = ?outcome.bout_id,
        winner_id = outcome.winner_id,
        loser_id = outcome.loser_id,
        is_draw = outcome.is_draw,
        "Outcome recorded"
    );
    Ok(outcome)
}

/// Lock the bout and check, in order: it exists, it is accepted and not
/// completed, it has no outcome yet, and the result fits its participants.
async fn lock_open_bout(conn: &mut PgConnection, bout_id: i32, result: &MatchResult) -> Result<Bout> {
    let bout = BoutRepository::lock(conn, bout_id).await?;

    bout.ensure_open_for_outcome()
        .inspect_err(|e| warn!(bout_id, "Rejected outcome: {}", e))?;

    if OutcomeRepository::find_by_bout_in(conn, bout_id).await?.is_some() {
        warn!(bout_id, "Rejected outcome: bout already has one");
        return Err(StorageError::Conflict(format!(
            "bout {bout_id} already has an outcome"
        )));
    }

    result.ensure_matches(&bout)?;
    Ok(bout)
}

/// Outcome row first, so the ledger rows can reference its id.
async fn record(conn: &mut PgConnection, bout_id: Option<i32>, result: &MatchResult) -> Result<Outcome> {
    let outcome = OutcomeRepository::insert(conn, bout_id, result).await?;
    rating::apply_outcome(conn, &outcome).await?;
    RecordRepository::apply_outcome(conn, &outcome).await?;
    Ok(outcome)
}

pub async fn get_by_id(db: &Database, outcome_id: i32) -> Result<Outcome> {
    OutcomeRepository::new(db.pool()).find_by_id(outcome_id).await
}

pub async fn get_all(db: &Database) -> Result<Vec<Outcome>> {
    OutcomeRepository::new(db.pool()).list().await
}

pub async fn get_by_bout_id(db: &Database, bout_id: i32) -> Result<Outcome> {
    OutcomeRepository::new(db.pool()).find_by_bout_id(bout_id).await
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::BoutState;

    fn bout() -> Bout {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        Bout {
            bout_id: 11,
            challenger_id: 1,
            acceptor_id: 2,
            style_id: 5,
            referee_id: None,
            state: BoutState::Accepted,
            created_at: at,
            updated_at: at,
        }
    }

    fn result(winner_id: i32, loser_id: i32, style_id: i32) -> MatchResult {
        MatchResult {
            winner_id,
            loser_id,
            style_id,
            is_draw: false,
        }
    }

    #[test]
    fn test_shape_requires_all_ids() {
        assert!(result(1, 2, 5).validate_shape().is_ok());
        assert!(matches!(result(0, 2, 5).validate_shape(), Err(StorageError::Validation(_))));
        assert!(matches!(result(1, 0, 5).validate_shape(), Err(StorageError::Validation(_))));
        assert!(matches!(result(1, 2, 0).validate_shape(), Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_shape_rejects_same_athlete_even_for_draw() {
        let mut draw = result(3, 3, 5);
        draw.is_draw = true;
        assert!(matches!(draw.validate_shape(), Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_result_must_name_bout_participants() {
        let bout = bout();
        assert!(result(1, 2, 5).ensure_matches(&bout).is_ok());
        assert!(result(2, 1, 5).ensure_matches(&bout).is_ok());
        assert!(matches!(
            result(1, 3, 5).ensure_matches(&bout),
            Err(StorageError::Validation(_))
        ));
    }

    #[test]
    fn test_result_must_use_bout_style() {
        assert!(matches!(
            result(1, 2, 6).ensure_matches(&bout()),
            Err(StorageError::Validation(_))
        ));
    }

    #[test]
    fn test_request_conversion_keeps_draw_flag() {
        let req = RecordBoutOutcomeRequest {
            winner_id: 2,
            loser_id: 1,
            style_id: 5,
            is_draw: true,
            referee_id: Some(9),
        };
        let result = MatchResult::from(&req);
        assert!(result.is_draw);
        assert_eq!((result.winner_id, result.loser_id), (2, 1));
    }
}
