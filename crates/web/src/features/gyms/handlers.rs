use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::gym::CreateGymRequest, models::Gym};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/gyms",
    responses(
        (status = 200, description = "List all gyms", body = Vec<Gym>)
    ),
    tag = "gyms"
)]
pub async fn list_gyms(State(db): State<Database>) -> Result<Response, WebError> {
    let gyms = services::list_gyms(db.pool()).await?;

    Ok(Json(gyms).into_response())
}

#[utoipa::path(
    get,
    path = "/api/gyms/{gym_id}",
    params(
        ("gym_id" = i32, Path, description = "Gym ID")
    ),
    responses(
        (status = 200, description = "Gym found", body = Gym),
        (status = 404, description = "Gym not found")
    ),
    tag = "gyms"
)]
pub async fn get_gym(
    State(db): State<Database>,
    Path(gym_id): Path<i32>,
) -> Result<Response, WebError> {
    let gym = services::get_gym(db.pool(), gym_id).await?;

    Ok(Json(gym).into_response())
}

#[utoipa::path(
    post,
    path = "/api/gyms",
    request_body = CreateGymRequest,
    responses(
        (status = 201, description = "Gym created", body = Gym),
        (status = 400, description = "Validation error")
    ),
    tag = "gyms"
)]
pub async fn create_gym(
    State(db): State<Database>,
    Json(req): Json<CreateGymRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let gym = services::create_gym(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(gym)).into_response())
}
