use sqlx::PgPool;
use storage::{dto::feed::FeedEntry, error::Result, repository::feed::FeedRepository};

/// Timeline for an athlete; empty when nothing has been completed yet
pub async fn get_feed(pool: &PgPool, athlete_id: i32) -> Result<Vec<FeedEntry>> {
    let repo = FeedRepository::new(pool);
    repo.for_athlete(athlete_id).await
}
