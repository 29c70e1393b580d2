use chrono::NaiveDateTime;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

use crate::dto::bout::{BoutParticipant, BoutResponse};
use crate::error::{Result, StorageError};
use crate::models::{Bout, BoutState, Record};

const BOUT_COLUMNS: &str = r#"
    bout_id, challenger_id, acceptor_id, style_id, referee_id, state, created_at, updated_at
"#;

/// Bout joined with both participants, their records, the style and each
/// participant's current rating in that style.
const OUTBOUND_SELECT: &str = r#"
    SELECT
        b.bout_id,
        b.style_id,
        s.style_name,
        b.referee_id,
        b.state,
        b.created_at,
        b.updated_at,
        c.athlete_id AS challenger_id,
        c.username AS challenger_username,
        c.first_name AS challenger_first_name,
        c.last_name AS challenger_last_name,
        COALESCE(cr.wins, 0) AS challenger_wins,
        COALESCE(cr.losses, 0) AS challenger_losses,
        COALESCE(cr.draws, 0) AS challenger_draws,
        cs.score AS challenger_score,
        a.athlete_id AS acceptor_id,
        a.username AS acceptor_username,
        a.first_name AS acceptor_first_name,
        a.last_name AS acceptor_last_name,
        COALESCE(ar.wins, 0) AS acceptor_wins,
        COALESCE(ar.losses, 0) AS acceptor_losses,
        COALESCE(ar.draws, 0) AS acceptor_draws,
        acs.score AS acceptor_score
    FROM bout b
    JOIN athlete c ON c.athlete_id = b.challenger_id
    JOIN athlete a ON a.athlete_id = b.acceptor_id
    JOIN style s ON s.style_id = b.style_id
    LEFT JOIN athlete_record cr ON cr.athlete_id = b.challenger_id
    LEFT JOIN athlete_record ar ON ar.athlete_id = b.acceptor_id
    LEFT JOIN LATERAL (
        SELECT score FROM athlete_score
        WHERE athlete_id = b.challenger_id AND style_id = b.style_id
        ORDER BY score_id DESC
        LIMIT 1
    ) cs ON TRUE
    LEFT JOIN LATERAL (
        SELECT score FROM athlete_score
        WHERE athlete_id = b.acceptor_id AND style_id = b.style_id
        ORDER BY score_id DESC
        LIMIT 1
    ) acs ON TRUE
    WHERE 1=1
"#;

#[derive(FromRow)]
struct OutboundRow {
    bout_id: i32,
    style_id: i32,
    style_name: String,
    referee_id: Option<i32>,
    state: BoutState,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    challenger_id: i32,
    challenger_username: String,
    challenger_first_name: String,
    challenger_last_name: String,
    challenger_wins: i32,
    challenger_losses: i32,
    challenger_draws: i32,
    challenger_score: Option<i32>,
    acceptor_id: i32,
    acceptor_username: String,
    acceptor_first_name: String,
    acceptor_last_name: String,
    acceptor_wins: i32,
    acceptor_losses: i32,
    acceptor_draws: i32,
    acceptor_score: Option<i32>,
}

impl From<OutboundRow> for BoutResponse {
    fn from(row: OutboundRow) -> Self {
        Self {
            bout_id: row.bout_id,
            challenger: BoutParticipant {
                athlete_id: row.challenger_id,
                username: row.challenger_username,
                first_name: row.challenger_first_name,
                last_name: row.challenger_last_name,
                record: Record {
                    wins: row.challenger_wins,
                    losses: row.challenger_losses,
                    draws: row.challenger_draws,
                },
                score: row.challenger_score,
            },
            acceptor: BoutParticipant {
                athlete_id: row.acceptor_id,
                username: row.acceptor_username,
                first_name: row.acceptor_first_name,
                last_name: row.acceptor_last_name,
                record: Record {
                    wins: row.acceptor_wins,
                    losses: row.acceptor_losses,
                    draws: row.acceptor_draws,
                },
                score: row.acceptor_score,
            },
            style_id: row.style_id,
            style_name: row.style_name,
            referee_id: row.referee_id,
            state: row.state,
            accepted: row.state.is_accepted(),
            completed: row.state.is_completed(),
            cancelled: row.state.is_cancelled(),
            declined: row.state.is_declined(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct BoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BoutRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All bouts in the outbound view, newest first
    pub async fn list_outbound(&self) -> Result<Vec<BoutResponse>> {
        let mut query = QueryBuilder::<Postgres>::new(OUTBOUND_SELECT);
        query.push(" ORDER BY b.created_at DESC, b.bout_id DESC");

        self.fetch_outbound(query).await
    }

    pub async fn find_outbound(&self, bout_id: i32) -> Result<BoutResponse> {
        let mut query = QueryBuilder::<Postgres>::new(OUTBOUND_SELECT);
        query.push(" AND b.bout_id = ");
        query.push_bind(bout_id);

        self.fetch_outbound(query)
            .await?
            .into_iter()
            .next()
            .ok_or(StorageError::NotFound)
    }

    /// Bouts in `state` where the athlete is either participant, newest first
    pub async fn list_outbound_for_participant(
        &self,
        athlete_id: i32,
        state: BoutState,
    ) -> Result<Vec<BoutResponse>> {
        let mut query = QueryBuilder::<Postgres>::new(OUTBOUND_SELECT);
        query.push(" AND (b.challenger_id = ");
        query.push_bind(athlete_id);
        query.push(" OR b.acceptor_id = ");
        query.push_bind(athlete_id);
        query.push(") AND b.state = ");
        query.push_bind(state);
        query.push(" ORDER BY b.created_at DESC, b.bout_id DESC");

        self.fetch_outbound(query).await
    }

    async fn fetch_outbound(&self, mut query: QueryBuilder<'_, Postgres>) -> Result<Vec<BoutResponse>> {
        let rows: Vec<OutboundRow> = query.build_query_as().fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(BoutResponse::from).collect())
    }

    /// Insert a pending bout
    pub async fn create(&self, challenger_id: i32, acceptor_id: i32, style_id: i32) -> Result<Bout> {
        let bout = sqlx::query_as::<_, Bout>(&format!(
            r#"
            INSERT INTO bout (challenger_id, acceptor_id, style_id, state)
            VALUES ($1, $2, $3, 'pending')
            RETURNING {BOUT_COLUMNS}
            "#
        ))
        .bind(challenger_id)
        .bind(acceptor_id)
        .bind(style_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_insert("bout"))?;

        Ok(bout)
    }

    /// Load a bout and hold its row lock until the transaction ends
    pub async fn lock(conn: &mut PgConnection, bout_id: i32) -> Result<Bout> {
        let bout = sqlx::query_as::<_, Bout>(&format!(
            "SELECT {BOUT_COLUMNS} FROM bout WHERE bout_id = $1 FOR UPDATE"
        ))
        .bind(bout_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(bout)
    }

    /// Persist a state transition, optionally stamping the referee
    pub async fn set_state(
        conn: &mut PgConnection,
        bout_id: i32,
        state: BoutState,
        referee_id: Option<i32>,
    ) -> Result<Bout> {
        let bout = sqlx::query_as::<_, Bout>(&format!(
            r#"
            UPDATE bout
            SET state = $2,
                referee_id = COALESCE($3, referee_id),
                updated_at = CURRENT_TIMESTAMP
            WHERE bout_id = $1
            RETURNING {BOUT_COLUMNS}
            "#
        ))
        .bind(bout_id)
        .bind(state)
        .bind(referee_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| StorageError::from(e).on_insert("bout"))?
        .ok_or(StorageError::NotFound)?;

        Ok(bout)
    }

    pub async fn update_participants(
        conn: &mut PgConnection,
        bout_id: i32,
        challenger_id: i32,
        acceptor_id: i32,
        style_id: i32,
    ) -> Result<Bout> {
        let bout = sqlx::query_as::<_, Bout>(&format!(
            r#"
            UPDATE bout
            SET challenger_id = $2,
                acceptor_id = $3,
                style_id = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE bout_id = $1
            RETURNING {BOUT_COLUMNS}
            "#
        ))
        .bind(bout_id)
        .bind(challenger_id)
        .bind(acceptor_id)
        .bind(style_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| StorageError::from(e).on_insert("bout"))?
        .ok_or(StorageError::NotFound)?;

        Ok(bout)
    }

    pub async fn delete(conn: &mut PgConnection, bout_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM bout WHERE bout_id = $1")
            .bind(bout_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| StorageError::from(e).on_delete("bout"))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
