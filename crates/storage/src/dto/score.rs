use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Latest ledger value of an athlete in one style
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CurrentScore {
    pub style_id: i32,
    pub style_name: String,
    pub score: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoreHistoryEntry {
    pub date: NaiveDateTime,
    pub score: i32,
}

/// Rating history of an athlete in one style, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoreHistoryResponse {
    pub style_id: i32,
    pub style_name: String,
    pub history: Vec<ScoreHistoryEntry>,
}
