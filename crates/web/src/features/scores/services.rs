use sqlx::PgPool;
use storage::{
    dto::score::{CurrentScore, ScoreHistoryResponse},
    error::Result,
    repository::score::ScoreRepository,
};

/// Current rating in every style the athlete is registered to
pub async fn current_scores(pool: &PgPool, athlete_id: i32) -> Result<Vec<CurrentScore>> {
    let repo = ScoreRepository::new(pool);
    repo.current_for_athlete(athlete_id).await
}

pub async fn current_score(pool: &PgPool, athlete_id: i32, style_id: i32) -> Result<CurrentScore> {
    let repo = ScoreRepository::new(pool);
    repo.current(athlete_id, style_id).await
}

pub async fn score_history(
    pool: &PgPool,
    athlete_id: i32,
    style_id: i32,
) -> Result<ScoreHistoryResponse> {
    let repo = ScoreRepository::new(pool);
    repo.history(athlete_id, style_id).await
}
