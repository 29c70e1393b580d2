use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for recording a standalone outcome, optionally tied to a bout
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOutcomeRequest {
    #[validate(range(min = 1))]
    pub bout_id: Option<i32>,

    #[validate(range(min = 1, message = "winner_id is required"))]
    pub winner_id: i32,

    #[validate(range(min = 1, message = "loser_id is required"))]
    pub loser_id: i32,

    #[validate(range(min = 1, message = "style_id is required"))]
    pub style_id: i32,

    #[serde(default)]
    pub is_draw: bool,
}

/// Request payload for resolving an accepted bout.
///
/// For a draw, `winner_id` and `loser_id` still name the two participants;
/// which one is which does not affect the result.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordBoutOutcomeRequest {
    #[validate(range(min = 1, message = "winner_id is required"))]
    pub winner_id: i32,

    #[validate(range(min = 1, message = "loser_id is required"))]
    pub loser_id: i32,

    #[validate(range(min = 1, message = "style_id is required"))]
    pub style_id: i32,

    #[serde(default)]
    pub is_draw: bool,

    #[validate(range(min = 1))]
    pub referee_id: Option<i32>,
}
