use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::outcome::CreateOutcomeRequest, models::Outcome};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/outcomes",
    responses(
        (status = 200, description = "List all outcomes, newest first", body = Vec<Outcome>)
    ),
    tag = "outcomes"
)]
pub async fn list_outcomes(State(db): State<Database>) -> Result<Response, WebError> {
    let outcomes = services::list_outcomes(&db).await?;

    Ok(Json(outcomes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/outcomes/{outcome_id}",
    params(
        ("outcome_id" = i32, Path, description = "Outcome ID")
    ),
    responses(
        (status = 200, description = "Outcome found", body = Outcome),
        (status = 404, description = "Outcome not found")
    ),
    tag = "outcomes"
)]
pub async fn get_outcome(
    State(db): State<Database>,
    Path(outcome_id): Path<i32>,
) -> Result<Response, WebError> {
    let outcome = services::get_outcome(&db, outcome_id).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    post,
    path = "/api/outcomes",
    request_body = CreateOutcomeRequest,
    responses(
        (status = 201, description = "Outcome recorded and ratings updated", body = Outcome),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Bout not found or participant not registered to the style"),
        (status = 409, description = "Bout not accepted or already has an outcome")
    ),
    tag = "outcomes"
)]
pub async fn create_outcome(
    State(db): State<Database>,
    Json(req): Json<CreateOutcomeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::create_outcome(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(outcome)).into_response())
}
