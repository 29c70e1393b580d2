use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Follow {
    pub follower_id: i32,
    pub followed_id: i32,
    pub created_at: chrono::NaiveDateTime,
}
