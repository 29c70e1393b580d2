use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::feed::FeedEntry};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/feed",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Completed bouts of the athlete and everyone they follow, newest first", body = Vec<FeedEntry>)
    ),
    tag = "feed"
)]
pub async fn get_feed(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    let feed = services::get_feed(db.pool(), athlete_id).await?;

    Ok(Json(feed).into_response())
}
