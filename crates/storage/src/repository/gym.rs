use sqlx::PgPool;

use crate::dto::gym::CreateGymRequest;
use crate::error::{Result, StorageError};
use crate::models::Gym;

pub struct GymRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GymRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Gym>> {
        let gyms = sqlx::query_as::<_, Gym>(
            "SELECT gym_id, name, address, created_at FROM gym ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(gyms)
    }

    pub async fn find_by_id(&self, gym_id: i32) -> Result<Gym> {
        let gym = sqlx::query_as::<_, Gym>(
            "SELECT gym_id, name, address, created_at FROM gym WHERE gym_id = $1",
        )
        .bind(gym_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(gym)
    }

    pub async fn create(&self, req: &CreateGymRequest) -> Result<Gym> {
        let gym = sqlx::query_as::<_, Gym>(
            r#"
            INSERT INTO gym (name, address)
            VALUES ($1, $2)
            RETURNING gym_id, name, address, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.address)
        .fetch_one(self.pool)
        .await?;

        Ok(gym)
    }
}
