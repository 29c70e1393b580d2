use sqlx::{PgConnection, PgPool};

use crate::error::{Result, StorageError};
use crate::models::Outcome;
use crate::services::outcomes::MatchResult;

const OUTCOME_COLUMNS: &str =
    "outcome_id, bout_id, winner_id, loser_id, style_id, is_draw, created_at";

pub struct OutcomeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OutcomeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Outcome>> {
        let outcomes = sqlx::query_as::<_, Outcome>(&format!(
            "SELECT {OUTCOME_COLUMNS} FROM outcome ORDER BY created_at DESC, outcome_id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(outcomes)
    }

    pub async fn find_by_id(&self, outcome_id: i32) -> Result<Outcome> {
        let outcome = sqlx::query_as::<_, Outcome>(&format!(
            "SELECT {OUTCOME_COLUMNS} FROM outcome WHERE outcome_id = $1"
        ))
        .bind(outcome_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(outcome)
    }

    pub async fn find_by_bout_id(&self, bout_id: i32) -> Result<Outcome> {
        let mut conn = self.pool.acquire().await?;
        Self::find_by_bout_in(&mut conn, bout_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Outcome of a bout, read on the caller's connection
    pub async fn find_by_bout_in(conn: &mut PgConnection, bout_id: i32) -> Result<Option<Outcome>> {
        let outcome = sqlx::query_as::<_, Outcome>(&format!(
            "SELECT {OUTCOME_COLUMNS} FROM outcome WHERE bout_id = $1"
        ))
        .bind(bout_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(outcome)
    }

    /// Insert an outcome row. A second outcome for the same bout is a `Conflict`.
    pub async fn insert(
        conn: &mut PgConnection,
        bout_id: Option<i32>,
        result: &MatchResult,
    ) -> Result<Outcome> {
        let outcome = sqlx::query_as::<_, Outcome>(&format!(
            r#"
            INSERT INTO outcome (bout_id, winner_id, loser_id, style_id, is_draw)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {OUTCOME_COLUMNS}
            "#
        ))
        .bind(bout_id)
        .bind(result.winner_id)
        .bind(result.loser_id)
        .bind(result.style_id)
        .bind(result.is_draw)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| StorageError::from(e).on_insert("outcome for this bout"))?;

        Ok(outcome)
    }
}
