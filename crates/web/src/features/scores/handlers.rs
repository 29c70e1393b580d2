use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::score::{CurrentScore, ScoreHistoryResponse},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/scores",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Current rating per registered style", body = Vec<CurrentScore>)
    ),
    tag = "scores"
)]
pub async fn current_scores(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    let scores = services::current_scores(db.pool(), athlete_id).await?;

    Ok(Json(scores).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/scores/{style_id}",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID"),
        ("style_id" = i32, Path, description = "Style ID")
    ),
    responses(
        (status = 200, description = "Current rating in the style", body = CurrentScore),
        (status = 404, description = "Athlete not registered to the style")
    ),
    tag = "scores"
)]
pub async fn current_score(
    State(db): State<Database>,
    Path((athlete_id, style_id)): Path<(i32, i32)>,
) -> Result<Response, WebError> {
    let score = services::current_score(db.pool(), athlete_id, style_id).await?;

    Ok(Json(score).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/scores/{style_id}/history",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID"),
        ("style_id" = i32, Path, description = "Style ID")
    ),
    responses(
        (status = 200, description = "Rating history, oldest first", body = ScoreHistoryResponse),
        (status = 404, description = "Style not found")
    ),
    tag = "scores"
)]
pub async fn score_history(
    State(db): State<Database>,
    Path((athlete_id, style_id)): Path<(i32, i32)>,
) -> Result<Response, WebError> {
    let history = services::score_history(db.pool(), athlete_id, style_id).await?;

    Ok(Json(history).into_response())
}
