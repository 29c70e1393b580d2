use sqlx::{PgConnection, PgPool};

use crate::error::{Result, StorageError};
use crate::models::{Outcome, Record};

pub struct RecordRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecordRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_athlete(&self, athlete_id: i32) -> Result<Record> {
        let record = sqlx::query_as::<_, Record>(
            "SELECT wins, losses, draws FROM athlete_record WHERE athlete_id = $1",
        )
        .bind(athlete_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(record)
    }

    /// Start an athlete at 0-0-0
    pub async fn create(conn: &mut PgConnection, athlete_id: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO athlete_record (athlete_id, wins, losses, draws)
            VALUES ($1, 0, 0, 0)
            ON CONFLICT (athlete_id) DO NOTHING
            "#,
        )
        .bind(athlete_id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Bump win/loss counters, or the draw counter of both sides.
    ///
    /// Rows are touched in ascending athlete order. Outcomes in different
    /// styles share no pair lock, so this order is all that keeps two of them
    /// over the same athletes from deadlocking here.
    pub async fn apply_outcome(conn: &mut PgConnection, outcome: &Outcome) -> Result<()> {
        let (winner_delta, loser_delta) = if outcome.is_draw {
            ((0, 0, 1), (0, 0, 1))
        } else {
            ((1, 0, 0), (0, 1, 0))
        };

        let mut updates = [
            (outcome.winner_id, winner_delta),
            (outcome.loser_id, loser_delta),
        ];
        updates.sort_unstable_by_key(|(athlete_id, _)| *athlete_id);

        for (athlete_id, (wins, losses, draws)) in updates {
            sqlx::query(
                r#"
                INSERT INTO athlete_record (athlete_id, wins, losses, draws)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (athlete_id) DO UPDATE
                SET wins = athlete_record.wins + EXCLUDED.wins,
                    losses = athlete_record.losses + EXCLUDED.losses,
                    draws = athlete_record.draws + EXCLUDED.draws
                "#,
            )
            .bind(athlete_id)
            .bind(wins)
            .bind(losses)
            .bind(draws)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
