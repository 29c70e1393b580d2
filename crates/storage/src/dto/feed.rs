use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A completed bout as shown on an athlete's timeline
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeedEntry {
    pub bout_id: i32,
    pub style_id: i32,
    pub style_name: String,
    pub is_draw: bool,
    pub updated_at: NaiveDateTime,

    pub challenger_id: i32,
    pub challenger_username: String,
    pub challenger_first_name: String,
    pub challenger_last_name: String,
    pub acceptor_id: i32,
    pub acceptor_username: String,
    pub acceptor_first_name: String,
    pub acceptor_last_name: String,

    pub winner_id: i32,
    pub winner_username: String,
    pub winner_first_name: String,
    pub winner_last_name: String,
    pub winner_wins: i32,
    pub winner_losses: i32,
    pub winner_draws: i32,
    pub winner_score: Option<i32>,

    pub loser_id: i32,
    pub loser_username: String,
    pub loser_first_name: String,
    pub loser_last_name: String,
    pub loser_wins: i32,
    pub loser_losses: i32,
    pub loser_draws: i32,
    pub loser_score: Option<i32>,

    pub referee_id: Option<i32>,
    pub referee_first_name: Option<String>,
    pub referee_last_name: Option<String>,
}
