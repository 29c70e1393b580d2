use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{BoutState, Record};

/// Request payload for challenging another athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_distinct_participants"))]
pub struct CreateBoutRequest {
    #[validate(range(min = 1, message = "challenger_id is required"))]
    pub challenger_id: i32,

    #[validate(range(min = 1, message = "acceptor_id is required"))]
    pub acceptor_id: i32,

    #[validate(range(min = 1, message = "style_id is required"))]
    pub style_id: i32,
}

/// Request payload for rewriting a bout that has not been accepted yet
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_distinct_update"))]
pub struct UpdateBoutRequest {
    #[validate(range(min = 1, message = "challenger_id is required"))]
    pub challenger_id: i32,

    #[validate(range(min = 1, message = "acceptor_id is required"))]
    pub acceptor_id: i32,

    #[validate(range(min = 1, message = "style_id is required"))]
    pub style_id: i32,
}

fn distinct(challenger_id: i32, acceptor_id: i32) -> Result<(), validator::ValidationError> {
    if challenger_id == acceptor_id {
        let mut err = validator::ValidationError::new("same_participant");
        err.message = Some("challenger and acceptor must be different athletes".into());
        return Err(err);
    }
    Ok(())
}

fn validate_distinct_participants(req: &CreateBoutRequest) -> Result<(), validator::ValidationError> {
    distinct(req.challenger_id, req.acceptor_id)
}

fn validate_distinct_update(req: &UpdateBoutRequest) -> Result<(), validator::ValidationError> {
    distinct(req.challenger_id, req.acceptor_id)
}

/// One side of a bout with the data a client needs to render it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoutParticipant {
    pub athlete_id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub record: Record,
    /// Current rating in the bout's style, if the athlete is registered to it
    pub score: Option<i32>,
}

/// Bout enriched with both participants, the style and lifecycle flags
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoutResponse {
    pub bout_id: i32,
    pub challenger: BoutParticipant,
    pub acceptor: BoutParticipant,
    pub style_id: i32,
    pub style_name: String,
    pub referee_id: Option<i32>,
    pub state: BoutState,
    pub accepted: bool,
    pub completed: bool,
    pub cancelled: bool,
    pub declined: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
