use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Immutable result of a bout (or of a standalone match when `bout_id` is unset).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Outcome {
    pub outcome_id: i32,
    pub bout_id: Option<i32>,
    pub winner_id: i32,
    pub loser_id: i32,
    pub style_id: i32,
    pub is_draw: bool,
    pub created_at: chrono::NaiveDateTime,
}
