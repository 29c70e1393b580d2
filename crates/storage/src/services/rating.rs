//! Elo-style rating engine over the append-only score ledger.

use sqlx::PgConnection;
use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::models::{AthleteScore, Outcome};
use crate::repository::score::{NewLedgerEntry, ScoreRepository};

/// Maximum rating swing per match.
pub const K_FACTOR: f64 = 32.0;

/// Rating assigned when an athlete first registers to a style.
pub const SEED_RATING: i32 = 400;

/// Probability that a player rated `rating` beats one rated `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// Unrounded post-match ratings for the winner and loser.
///
/// For a draw the "winner" and "loser" roles only name the two sides; both
/// are scored 0.5.
pub fn rate_match(winner: f64, loser: f64, is_draw: bool) -> (f64, f64) {
    let expected_winner = expected_score(winner, loser);
    let expected_loser = expected_score(loser, winner);

    let (actual_winner, actual_loser) = if is_draw { (0.5, 0.5) } else { (1.0, 0.0) };

    (
        winner + K_FACTOR * (actual_winner - expected_winner),
        loser + K_FACTOR * (actual_loser - expected_loser),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRatings {
    pub winner: i32,
    pub loser: i32,
}

/// Integer ratings after a match. Results are truncated toward zero, not rounded.
pub fn compute_new_ratings(winner: i32, loser: i32, is_draw: bool) -> NewRatings {
    let (new_winner, new_loser) = rate_match(f64::from(winner), f64::from(loser), is_draw);

    NewRatings {
        winner: new_winner.trunc() as i32,
        loser: new_loser.trunc() as i32,
    }
}

/// Seed the ledger for a freshly registered athlete/style pair.
pub async fn seed_rating(
    conn: &mut PgConnection,
    athlete_id: i32,
    style_id: i32,
) -> Result<AthleteScore> {
    let seeded = ScoreRepository::append(
        conn,
        &NewLedgerEntry {
            athlete_id,
            style_id,
            score: SEED_RATING,
            previous: None,
            outcome_id: None,
        },
    )
    .await?;

    debug!(athlete_id, style_id, "Seeded rating at {}", SEED_RATING);
    Ok(seeded)
}

/// Append one ledger row per participant of `outcome`.
///
/// Must run inside the transaction that inserted `outcome`. Both
/// athlete/style pairs are locked before their current ratings are read, so
/// concurrent outcomes touching the same pair are applied one after the
/// other instead of both building on the same stale rating.
pub async fn apply_outcome(
    conn: &mut PgConnection,
    outcome: &Outcome,
) -> Result<(AthleteScore, AthleteScore)> {
    // Ascending athlete order, so two outcomes in the same style cannot lock
    // the pair rows in opposite orders.
    let mut lock_order = [outcome.winner_id, outcome.loser_id];
    lock_order.sort_unstable();
    for athlete_id in lock_order {
        ScoreRepository::lock_pair(conn, athlete_id, outcome.style_id).await?;
    }

    let winner_current = current_rating(conn, outcome.winner_id, outcome.style_id).await?;
    let loser_current = current_rating(conn, outcome.loser_id, outcome.style_id).await?;

    let ratings = compute_new_ratings(winner_current.score, loser_current.score, outcome.is_draw);

    let winner_row = ScoreRepository::append(
        conn,
        &NewLedgerEntry {
            athlete_id: outcome.winner_id,
            style_id: outcome.style_id,
            score: ratings.winner,
            previous: Some(&winner_current),
            outcome_id: Some(outcome.outcome_id),
        },
    )
    .await?;

    let loser_row = ScoreRepository::append(
        conn,
        &NewLedgerEntry {
            athlete_id: outcome.loser_id,
            style_id: outcome.style_id,
            score: ratings.loser,
            previous: Some(&loser_current),
            outcome_id: Some(outcome.outcome_id),
        },
    )
    .await?;

    info!(
        outcome_id = outcome.outcome_id,
        style_id = outcome.style_id,
        "Ratings updated: athlete {} {} -> {}, athlete {} {} -> {}",
        outcome.winner_id,
        winner_current.score,
        ratings.winner,
        outcome.loser_id,
        loser_current.score,
        ratings.loser
    );

    Ok((winner_row, loser_row))
}

async fn current_rating(
    conn: &mut PgConnection,
    athlete_id: i32,
    style_id: i32,
) -> Result<AthleteScore> {
    ScoreRepository::latest_in(conn, athlete_id, style_id)
        .await?
        .ok_or(StorageError::NotFound)
}
