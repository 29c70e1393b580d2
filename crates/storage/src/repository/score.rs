use sqlx::{PgConnection, PgPool};

use crate::dto::score::{CurrentScore, ScoreHistoryEntry, ScoreHistoryResponse};
use crate::error::{Result, StorageError};
use crate::models::AthleteScore;

const LEDGER_COLUMNS: &str = r#"
    score_id, athlete_id, style_id, score, previous_score, previous_score_id,
    outcome_id, created_at, updated_at
"#;

/// A row about to be appended to the rating ledger.
pub struct NewLedgerEntry<'a> {
    pub athlete_id: i32,
    pub style_id: i32,
    pub score: i32,
    /// Row being superseded; `None` only for the seed row.
    pub previous: Option<&'a AthleteScore>,
    pub outcome_id: Option<i32>,
}

pub struct ScoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Current rating per registered style
    pub async fn current_for_athlete(&self, athlete_id: i32) -> Result<Vec<CurrentScore>> {
        let scores = sqlx::query_as::<_, CurrentScore>(
            r#"
            SELECT DISTINCT ON (sc.style_id)
                sc.style_id,
                s.style_name,
                sc.score,
                sc.updated_at
            FROM athlete_score sc
            JOIN style s ON s.style_id = sc.style_id
            WHERE sc.athlete_id = $1
            ORDER BY sc.style_id, sc.score_id DESC
            "#,
        )
        .bind(athlete_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Current rating for one style
    pub async fn current(&self, athlete_id: i32, style_id: i32) -> Result<CurrentScore> {
        let score = sqlx::query_as::<_, CurrentScore>(
            r#"
            SELECT sc.style_id, s.style_name, sc.score, sc.updated_at
            FROM athlete_score sc
            JOIN style s ON s.style_id = sc.style_id
            WHERE sc.athlete_id = $1 AND sc.style_id = $2
            ORDER BY sc.score_id DESC
            LIMIT 1
            "#,
        )
        .bind(athlete_id)
        .bind(style_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    /// Rating history for one style as ascending (date, score) pairs
    pub async fn history(&self, athlete_id: i32, style_id: i32) -> Result<ScoreHistoryResponse> {
        let style_name = sqlx::query_scalar::<_, String>(
            "SELECT style_name FROM style WHERE style_id = $1",
        )
        .bind(style_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        let history = sqlx::query_as::<_, ScoreHistoryEntry>(
            r#"
            SELECT created_at AS date, score
            FROM athlete_score
            WHERE athlete_id = $1 AND style_id = $2
            ORDER BY score_id ASC
            "#,
        )
        .bind(athlete_id)
        .bind(style_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ScoreHistoryResponse {
            style_id,
            style_name,
            history,
        })
    }

    /// Take the row lock that serializes rating changes for one athlete/style
    /// pair. Fails with `NotFound` when the athlete never registered to the style.
    pub async fn lock_pair(conn: &mut PgConnection, athlete_id: i32, style_id: i32) -> Result<()> {
        sqlx::query_scalar::<_, i32>(
            r#"
            SELECT athlete_id
            FROM athlete_style
            WHERE athlete_id = $1 AND style_id = $2
            FOR UPDATE
            "#,
        )
        .bind(athlete_id)
        .bind(style_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(())
    }

    /// Latest ledger row of a pair, read on the caller's connection.
    ///
    /// Ids are allocated while the pair lock is held, so the highest id is
    /// the chain tip whatever the transaction start times were.
    pub async fn latest_in(
        conn: &mut PgConnection,
        athlete_id: i32,
        style_id: i32,
    ) -> Result<Option<AthleteScore>> {
        let row = sqlx::query_as::<_, AthleteScore>(&format!(
            r#"
            SELECT {LEDGER_COLUMNS}
            FROM athlete_score
            WHERE athlete_id = $1 AND style_id = $2
            ORDER BY score_id DESC
            LIMIT 1
            "#
        ))
        .bind(athlete_id)
        .bind(style_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    /// Append a ledger row. Prior rows are never modified.
    pub async fn append(conn: &mut PgConnection, entry: &NewLedgerEntry<'_>) -> Result<AthleteScore> {
        let row = sqlx::query_as::<_, AthleteScore>(&format!(
            r#"
            INSERT INTO athlete_score (athlete_id, style_id, score, previous_score, previous_score_id, outcome_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LEDGER_COLUMNS}
            "#
        ))
        .bind(entry.athlete_id)
        .bind(entry.style_id)
        .bind(entry.score)
        .bind(entry.previous.map(|p| p.score))
        .bind(entry.previous.map(|p| p.score_id))
        .bind(entry.outcome_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::Conflict(format!(
                    "rating of athlete {} in style {} was updated concurrently",
                    entry.athlete_id, entry.style_id
                ))
            } else {
                e.on_insert("rating entry")
            }
        })?;

        Ok(row)
    }
}
