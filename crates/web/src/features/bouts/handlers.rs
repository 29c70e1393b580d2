use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        bout::{BoutResponse, CreateBoutRequest, UpdateBoutRequest},
        outcome::RecordBoutOutcomeRequest,
    },
    models::{Bout, Outcome},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/bouts",
    responses(
        (status = 200, description = "List all bouts, newest first", body = Vec<BoutResponse>)
    ),
    tag = "bouts"
)]
pub async fn list_bouts(State(db): State<Database>) -> Result<Response, WebError> {
    let bouts = services::list_bouts(&db).await?;

    Ok(Json(bouts).into_response())
}

#[utoipa::path(
    get,
    path = "/api/bouts/{bout_id}",
    params(
        ("bout_id" = i32, Path, description = "Bout ID")
    ),
    responses(
        (status = 200, description = "Bout found", body = BoutResponse),
        (status = 404, description = "Bout not found")
    ),
    tag = "bouts"
)]
pub async fn get_bout(
    State(db): State<Database>,
    Path(bout_id): Path<i32>,
) -> Result<Response, WebError> {
    let bout = services::get_bout(&db, bout_id).await?;

    Ok(Json(bout).into_response())
}

#[utoipa::path(
    post,
    path = "/api/bouts",
    request_body = CreateBoutRequest,
    responses(
        (status = 201, description = "Challenge created, pending", body = Bout),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Athlete or style not found")
    ),
    tag = "bouts"
)]
pub async fn create_bout(
    State(db): State<Database>,
    Json(req): Json<CreateBoutRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let bout = services::create_bout(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(bout)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/bouts/{bout_id}",
    params(
        ("bout_id" = i32, Path, description = "Bout ID")
    ),
    request_body = UpdateBoutRequest,
    responses(
        (status = 200, description = "Bout updated", body = Bout),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Bout not found"),
        (status = 409, description = "Bout is no longer pending")
    ),
    tag = "bouts"
)]
pub async fn update_bout(
    State(db): State<Database>,
    Path(bout_id): Path<i32>,
    Json(req): Json<UpdateBoutRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let bout = services::update_bout(&db, bout_id, &req).await?;

    Ok(Json(bout).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/bouts/{bout_id}",
    params(
        ("bout_id" = i32, Path, description = "Bout ID")
    ),
    responses(
        (status = 204, description = "Bout deleted"),
        (status = 404, description = "Bout not found"),
        (status = 409, description = "Bout is completed or has an outcome")
    ),
    tag = "bouts"
)]
pub async fn delete_bout(
    State(db): State<Database>,
    Path(bout_id): Path<i32>,
) -> Result<Response, WebError> {
    services::delete_bout(&db, bout_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    put,
    path = "/api/bouts/{bout_id}/accept",
    params(
        ("bout_id" = i32, Path, description = "Bout ID")
    ),
    responses(
        (status = 200, description = "Bout accepted", body = Bout),
        (status = 409, description = "Bout missing or not pending")
    ),
    tag = "bouts"
)]
pub async fn accept_bout(
    State(db): State<Database>,
    Path(bout_id): Path<i32>,
) -> Result<Response, WebError> {
    let bout = services::accept_bout(&db, bout_id).await?;

    Ok(Json(bout).into_response())
}

#[utoipa::path(
    put,
    path = "/api/bouts/{bout_id}/decline",
    params(
        ("bout_id" = i32, Path, description = "Bout ID")
    ),
    responses(
        (status = 200, description = "Bout declined", body = Bout),
        (status = 409, description = "Bout missing or not pending")
    ),
    tag = "bouts"
)]
pub async fn decline_bout(
    State(db): State<Database>,
    Path(bout_id): Path<i32>,
) -> Result<Response, WebError> {
    let bout = services::decline_bout(&db, bout_id).await?;

    Ok(Json(bout).into_response())
}

#[utoipa::path(
    put,
    path = "/api/bouts/{bout_id}/complete/{referee_id}",
    params(
        ("bout_id" = i32, Path, description = "Bout ID"),
        ("referee_id" = i32, Path, description = "Referee athlete ID")
    ),
    responses(
        (status = 200, description = "Bout completed", body = Bout),
        (status = 400, description = "Invalid referee"),
        (status = 404, description = "Bout not found"),
        (status = 409, description = "Bout not accepted, already finished, or without outcome")
    ),
    tag = "bouts"
)]
pub async fn complete_bout(
    State(db): State<Database>,
    Path((bout_id, referee_id)): Path<(i32, i32)>,
) -> Result<Response, WebError> {
    let bout = services::complete_bout(&db, bout_id, referee_id).await?;

    Ok(Json(bout).into_response())
}

#[utoipa::path(
    put,
    path = "/api/bouts/{bout_id}/cancel/{challenger_id}",
    params(
        ("bout_id" = i32, Path, description = "Bout ID"),
        ("challenger_id" = i32, Path, description = "ID of the athlete cancelling")
    ),
    responses(
        (status = 200, description = "Bout cancelled", body = Bout),
        (status = 403, description = "Caller is not the challenger"),
        (status = 404, description = "Bout not found"),
        (status = 409, description = "Bout already finished")
    ),
    tag = "bouts"
)]
pub async fn cancel_bout(
    State(db): State<Database>,
    Path((bout_id, challenger_id)): Path<(i32, i32)>,
) -> Result<Response, WebError> {
    let bout = services::cancel_bout(&db, bout_id, challenger_id).await?;

    Ok(Json(bout).into_response())
}

#[utoipa::path(
    get,
    path = "/api/bouts/pending/{athlete_id}",
    params(
        ("athlete_id" = i32, Path, description = "Participant athlete ID")
    ),
    responses(
        (status = 200, description = "Challenges awaiting an answer", body = Vec<BoutResponse>)
    ),
    tag = "bouts"
)]
pub async fn pending_bouts(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    let bouts = services::pending_bouts(&db, athlete_id).await?;

    Ok(Json(bouts).into_response())
}

#[utoipa::path(
    get,
    path = "/api/bouts/incomplete/{athlete_id}",
    params(
        ("athlete_id" = i32, Path, description = "Participant athlete ID")
    ),
    responses(
        (status = 200, description = "Accepted bouts without a result", body = Vec<BoutResponse>)
    ),
    tag = "bouts"
)]
pub async fn incomplete_bouts(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    let bouts = services::incomplete_bouts(&db, athlete_id).await?;

    Ok(Json(bouts).into_response())
}

#[utoipa::path(
    get,
    path = "/api/bouts/{bout_id}/outcome",
    params(
        ("bout_id" = i32, Path, description = "Bout ID")
    ),
    responses(
        (status = 200, description = "Outcome of the bout", body = Outcome),
        (status = 404, description = "No outcome recorded")
    ),
    tag = "bouts"
)]
pub async fn get_bout_outcome(
    State(db): State<Database>,
    Path(bout_id): Path<i32>,
) -> Result<Response, WebError> {
    let outcome = services::get_bout_outcome(&db, bout_id).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    post,
    path = "/api/bouts/{bout_id}/outcome",
    params(
        ("bout_id" = i32, Path, description = "Bout ID")
    ),
    request_body = RecordBoutOutcomeRequest,
    responses(
        (status = 201, description = "Outcome recorded, ratings updated and bout completed", body = Outcome),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Bout not found or participant not registered to the style"),
        (status = 409, description = "Bout not accepted, already completed, or already has an outcome")
    ),
    tag = "bouts"
)]
pub async fn record_bout_outcome(
    State(db): State<Database>,
    Path(bout_id): Path<i32>,
    Json(req): Json<RecordBoutOutcomeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let outcome = services::record_bout_outcome(&db, bout_id, &req).await?;

    Ok((StatusCode::CREATED, Json(outcome)).into_response())
}
