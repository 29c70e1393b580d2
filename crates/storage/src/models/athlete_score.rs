use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One entry of the append-only rating ledger.
///
/// The seed row written on style registration has no previous score and no
/// outcome; every later row links to the row it supersedes and to the
/// outcome that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AthleteScore {
    pub score_id: i32,
    pub athlete_id: i32,
    pub style_id: i32,
    pub score: i32,
    pub previous_score: Option<i32>,
    pub previous_score_id: Option<i32>,
    pub outcome_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
