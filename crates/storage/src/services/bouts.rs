//! Bout lifecycle: challenge, accept or decline, cancel, complete.
//!
//! Every transition locks the bout row inside a bounded transaction, asks
//! the [`Bout`] model for the next state and persists it. Applying a
//! transition to a bout that already left the required state is an error,
//! never a silent no-op.

use sqlx::PgConnection;
use tracing::{info, warn};

use crate::Database;
use crate::dto::bout::BoutResponse;
use crate::error::{Result, StorageError};
use crate::models::{Bout, BoutState};
use crate::repository::bout::BoutRepository;
use crate::repository::outcome::OutcomeRepository;

/// Both participants and the style must be set, and the athletes must differ.
pub fn validate_participants(challenger_id: i32, acceptor_id: i32, style_id: i32) -> Result<()> {
    if challenger_id <= 0 || acceptor_id <= 0 || style_id <= 0 {
        return Err(StorageError::Validation(
            "challenger_id, acceptor_id and style_id are required".to_string(),
        ));
    }
    if challenger_id == acceptor_id {
        return Err(StorageError::Validation(
            "challenger and acceptor must be different athletes".to_string(),
        ));
    }
    Ok(())
}

pub async fn list(db: &Database) -> Result<Vec<BoutResponse>> {
    BoutRepository::new(db.pool()).list_outbound().await
}

pub async fn get(db: &Database, bout_id: i32) -> Result<BoutResponse> {
    BoutRepository::new(db.pool()).find_outbound(bout_id).await
}

/// Challenge `acceptor_id` to a bout in `style_id`. The bout starts `Pending`.
pub async fn create(db: &Database, challenger_id: i32, acceptor_id: i32, style_id: i32) -> Result<Bout> {
    validate_participants(challenger_id, acceptor_id, style_id)?;

    let bout = BoutRepository::new(db.pool())
        .create(challenger_id, acceptor_id, style_id)
        .await?;

    info!(
        bout_id = bout.bout_id,
        challenger_id, acceptor_id, style_id, "Bout created"
    );
    Ok(bout)
}

pub async fn accept(db: &Database, bout_id: i32) -> Result<Bout> {
    transition(db, bout_id, "accept", |bout| bout.accept()).await
}

/// Decline keeps the row in the absorbing `Declined` state.
pub async fn decline(db: &Database, bout_id: i32) -> Result<Bout> {
    transition(db, bout_id, "decline", |bout| bout.decline()).await
}

async fn transition(
    db: &Database,
    bout_id: i32,
    action: &str,
    next: impl FnOnce(&Bout) -> Result<BoutState>,
) -> Result<Bout> {
    let mut tx = db.begin().await?;

    let bout = match BoutRepository::lock(&mut tx, bout_id).await {
        Err(StorageError::NotFound) => {
            warn!(bout_id, "Cannot {} missing bout", action);
            return Err(StorageError::InvalidTransition(format!(
                "cannot {action} bout {bout_id}: bout does not exist"
            )));
        }
        other => other?,
    };

    let state = next(&bout).inspect_err(|e| warn!(bout_id, "Rejected {}: {}", action, e))?;
    let updated = BoutRepository::set_state(&mut tx, bout_id, state, None).await?;

    tx.commit().await?;

    info!(bout_id, from = %bout.state, to = %updated.state, "Bout transitioned");
    Ok(updated)
}

/// Cancel a bout on behalf of `challenger_id`.
///
/// Fails with `Forbidden` for anyone but the stored challenger and with
/// `InvalidTransition` once the bout is completed or already has an outcome.
pub async fn cancel(db: &Database, bout_id: i32, challenger_id: i32) -> Result<Bout> {
    let mut tx = db.begin().await?;

    let bout = BoutRepository::lock(&mut tx, bout_id).await?;
    let state = bout
        .cancel(challenger_id)
        .inspect_err(|e| warn!(bout_id, challenger_id, "Rejected cancel: {}", e))?;

    if OutcomeRepository::find_by_bout_in(&mut tx, bout_id).await?.is_some() {
        warn!(bout_id, "Rejected cancel: outcome already recorded");
        return Err(StorageError::InvalidTransition(format!(
            "cannot cancel bout {bout_id}: an outcome is already recorded"
        )));
    }

    let updated = BoutRepository::set_state(&mut tx, bout_id, state, None).await?;
    tx.commit().await?;

    info!(bout_id, challenger_id, from = %bout.state, "Bout cancelled");
    Ok(updated)
}

/// Finalise an accepted bout whose outcome was recorded separately, stamping
/// the referee.
pub async fn complete(db: &Database, bout_id: i32, referee_id: i32) -> Result<Bout> {
    if referee_id <= 0 {
        return Err(StorageError::Validation("referee_id is required".to_string()));
    }

    let mut tx = db.begin().await?;

    let bout = BoutRepository::lock(&mut tx, bout_id).await?;
    bout.complete()
        .inspect_err(|e| warn!(bout_id, "Rejected complete: {}", e))?;

    if OutcomeRepository::find_by_bout_in(&mut tx, bout_id).await?.is_none() {
        warn!(bout_id, "Rejected complete: no outcome recorded");
        return Err(StorageError::InvalidTransition(format!(
            "cannot complete bout {bout_id}: no outcome has been recorded"
        )));
    }

    let updated = complete_locked(&mut tx, &bout, Some(referee_id)).await?;
    tx.commit().await?;

    Ok(updated)
}

/// Move a bout already locked by the caller's transaction to `Completed`.
pub(crate) async fn complete_locked(
    conn: &mut PgConnection,
    bout: &Bout,
    referee_id: Option<i32>,
) -> Result<Bout> {
    let state = bout.complete()?;
    let updated = BoutRepository::set_state(conn, bout.bout_id, state, referee_id).await?;

    info!(bout_id = bout.bout_id, referee_id = ?updated.referee_id, "Bout completed");
    Ok(updated)
}

/// Rewrite participants and style while the bout is still `Pending`.
pub async fn update(
    db: &Database,
    bout_id: i32,
    challenger_id: i32,
    acceptor_id: i32,
    style_id: i32,
) -> Result<Bout> {
    validate_participants(challenger_id, acceptor_id, style_id)?;

    let mut tx = db.begin().await?;

    let bout = BoutRepository::lock(&mut tx, bout_id).await?;
    bout.ensure_editable()
        .inspect_err(|e| warn!(bout_id, "Rejected update: {}", e))?;

    let updated =
        BoutRepository::update_participants(&mut tx, bout_id, challenger_id, acceptor_id, style_id)
            .await?;
    tx.commit().await?;

    info!(bout_id, "Bout updated");
    Ok(updated)
}

pub async fn delete(db: &Database, bout_id: i32) -> Result<()> {
    let mut tx = db.begin().await?;

    let bout = BoutRepository::lock(&mut tx, bout_id).await?;
    bout.ensure_deletable()
        .inspect_err(|e| warn!(bout_id, "Rejected delete: {}", e))?;

    BoutRepository::delete(&mut tx, bout_id).await?;
    tx.commit().await?;

    info!(bout_id, "Bout deleted");
    Ok(())
}

/// Challenges awaiting an answer where the athlete is either participant
pub async fn get_pending(db: &Database, athlete_id: i32) -> Result<Vec<BoutResponse>> {
    BoutRepository::new(db.pool())
        .list_outbound_for_participant(athlete_id, BoutState::Pending)
        .await
}

/// Accepted bouts still waiting for an outcome
pub async fn get_incomplete(db: &Database, athlete_id: i32) -> Result<Vec<BoutResponse>> {
    BoutRepository::new(db.pool())
        .list_outbound_for_participant(athlete_id, BoutState::Accepted)
        .await
}
