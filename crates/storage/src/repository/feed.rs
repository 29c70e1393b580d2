use sqlx::PgPool;

use crate::dto::feed::FeedEntry;
use crate::error::Result;

pub struct FeedRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Completed bouts the athlete or anyone they follow took part in,
    /// newest first
    pub async fn for_athlete(&self, athlete_id: i32) -> Result<Vec<FeedEntry>> {
        let entries = sqlx::query_as::<_, FeedEntry>(
            r#"
            WITH followed AS (
                SELECT followed_id FROM following WHERE follower_id = $1
            )
            SELECT
                b.bout_id,
                s.style_id,
                s.style_name,
                o.is_draw,
                b.updated_at,
                c.athlete_id AS challenger_id,
                c.username AS challenger_username,
                c.first_name AS challenger_first_name,
                c.last_name AS challenger_last_name,
                a.athlete_id AS acceptor_id,
                a.username AS acceptor_username,
                a.first_name AS acceptor_first_name,
                a.last_name AS acceptor_last_name,
                w.athlete_id AS winner_id,
                w.username AS winner_username,
                w.first_name AS winner_first_name,
                w.last_name AS winner_last_name,
                COALESCE(wr.wins, 0) AS winner_wins,
                COALESCE(wr.losses, 0) AS winner_losses,
                COALESCE(wr.draws, 0) AS winner_draws,
                ws.score AS winner_score,
                l.athlete_id AS loser_id,
                l.username AS loser_username,
                l.first_name AS loser_first_name,
                l.last_name AS loser_last_name,
                COALESCE(lr.wins, 0) AS loser_wins,
                COALESCE(lr.losses, 0) AS loser_losses,
                COALESCE(lr.draws, 0) AS loser_draws,
                ls.score AS loser_score,
                b.referee_id,
                r.first_name AS referee_first_name,
                r.last_name AS referee_last_name
            FROM bout b
            JOIN outcome o ON o.bout_id = b.bout_id
            JOIN athlete c ON c.athlete_id = b.challenger_id
            JOIN athlete a ON a.athlete_id = b.acceptor_id
            JOIN athlete w ON w.athlete_id = o.winner_id
            JOIN athlete l ON l.athlete_id = o.loser_id
            JOIN style s ON s.style_id = b.style_id
            LEFT JOIN athlete r ON r.athlete_id = b.referee_id
            LEFT JOIN athlete_record wr ON wr.athlete_id = o.winner_id
            LEFT JOIN athlete_record lr ON lr.athlete_id = o.loser_id
            LEFT JOIN LATERAL (
                SELECT score FROM athlete_score
                WHERE athlete_id = o.winner_id AND style_id = b.style_id
                ORDER BY score_id DESC
                LIMIT 1
            ) ws ON TRUE
            LEFT JOIN LATERAL (
                SELECT score FROM athlete_score
                WHERE athlete_id = o.loser_id AND style_id = b.style_id
                ORDER BY score_id DESC
                LIMIT 1
            ) ls ON TRUE
            WHERE b.state = 'completed'
              AND (
                b.challenger_id = $1
                OR b.acceptor_id = $1
                OR b.challenger_id IN (SELECT followed_id FROM followed)
                OR b.acceptor_id IN (SELECT followed_id FROM followed)
              )
            ORDER BY b.updated_at DESC, b.bout_id DESC
            "#,
        )
        .bind(athlete_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
