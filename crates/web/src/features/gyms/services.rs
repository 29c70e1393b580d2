use sqlx::PgPool;
use storage::{
    dto::gym::CreateGymRequest, error::Result, models::Gym, repository::gym::GymRepository,
};

pub async fn list_gyms(pool: &PgPool) -> Result<Vec<Gym>> {
    let repo = GymRepository::new(pool);
    repo.list().await
}

pub async fn get_gym(pool: &PgPool, gym_id: i32) -> Result<Gym> {
    let repo = GymRepository::new(pool);
    repo.find_by_id(gym_id).await
}

pub async fn create_gym(pool: &PgPool, request: &CreateGymRequest) -> Result<Gym> {
    let repo = GymRepository::new(pool);
    repo.create(request).await
}
