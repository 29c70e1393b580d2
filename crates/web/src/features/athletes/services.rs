use sqlx::PgPool;
use storage::{
    Database,
    dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest},
    error::Result,
    models::{Athlete, Follow, Record},
    repository::{athlete::AthleteRepository, record::RecordRepository},
    services::credentials,
};

/// List all athletes
pub async fn list_athletes(pool: &PgPool) -> Result<Vec<Athlete>> {
    let repo = AthleteRepository::new(pool);
    repo.list().await
}

pub async fn get_athlete(pool: &PgPool, athlete_id: i32) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_id(athlete_id).await
}

pub async fn get_athlete_by_username(pool: &PgPool, username: &str) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_username(username).await
}

pub async fn list_usernames(pool: &PgPool) -> Result<Vec<String>> {
    let repo = AthleteRepository::new(pool);
    repo.list_usernames().await
}

/// Register a new athlete; the password is stored hashed
pub async fn create_athlete(db: &Database, request: &CreateAthleteRequest) -> Result<Athlete> {
    let password_hash = credentials::hash_password(&request.password);

    let mut tx = db.begin().await?;
    let athlete = AthleteRepository::create(&mut tx, request, &password_hash).await?;
    tx.commit().await?;

    Ok(athlete)
}

/// Update an athlete, re-hashing the password when a new one is given
pub async fn update_athlete(
    pool: &PgPool,
    athlete_id: i32,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);

    let existing = repo.find_by_id(athlete_id).await?;
    let password_hash = request.password.as_deref().map(credentials::hash_password);
    repo.update(&existing, request, password_hash.as_deref())
        .await
}

pub async fn delete_athlete(pool: &PgPool, athlete_id: i32) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(athlete_id).await
}

pub async fn get_record(pool: &PgPool, athlete_id: i32) -> Result<Record> {
    let repo = RecordRepository::new(pool);
    repo.find_by_athlete(athlete_id).await
}

pub async fn authorize(db: &Database, username: &str, password: &str) -> Result<Option<i32>> {
    credentials::authorize(db, username, password).await
}

pub async fn follow(pool: &PgPool, follower_id: i32, followed_id: i32) -> Result<Follow> {
    let repo = AthleteRepository::new(pool);
    repo.follow(follower_id, followed_id).await
}

pub async fn unfollow(pool: &PgPool, follower_id: i32, followed_id: i32) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.unfollow(follower_id, followed_id).await
}

pub async fn list_followed(pool: &PgPool, follower_id: i32) -> Result<Vec<i32>> {
    let repo = AthleteRepository::new(pool);
    repo.list_followed(follower_id).await
}
