use sqlx::PgPool;
use storage::{
    Database,
    dto::style::{CreateStyleRequest, StyleRegistration},
    error::Result,
    models::Style,
    repository::style::StyleRepository,
    services::registration,
};

pub async fn list_styles(pool: &PgPool) -> Result<Vec<Style>> {
    let repo = StyleRepository::new(pool);
    repo.list().await
}

pub async fn create_style(pool: &PgPool, request: &CreateStyleRequest) -> Result<Style> {
    let repo = StyleRepository::new(pool);
    repo.create(request).await
}

pub async fn common_styles(pool: &PgPool, athlete_id: i32, other_id: i32) -> Result<Vec<Style>> {
    let repo = StyleRepository::new(pool);
    repo.common_styles(athlete_id, other_id).await
}

pub async fn register_style(
    db: &Database,
    athlete_id: i32,
    style_id: i32,
) -> Result<StyleRegistration> {
    registration::register_athlete_to_style(db, athlete_id, style_id).await
}

pub async fn register_styles(
    db: &Database,
    athlete_id: i32,
    style_ids: &[i32],
) -> Result<Vec<StyleRegistration>> {
    registration::register_styles(db, athlete_id, style_ids).await
}
