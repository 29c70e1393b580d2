use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Gym {
    pub gym_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
