use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::style::{CreateStyleRequest, RegisterStyleRequest, RegisterStylesRequest, StyleRegistration},
    models::Style,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/styles",
    responses(
        (status = 200, description = "List all styles", body = Vec<Style>)
    ),
    tag = "styles"
)]
pub async fn list_styles(State(db): State<Database>) -> Result<Response, WebError> {
    let styles = services::list_styles(db.pool()).await?;

    Ok(Json(styles).into_response())
}

#[utoipa::path(
    post,
    path = "/api/styles",
    request_body = CreateStyleRequest,
    responses(
        (status = 201, description = "Style created", body = Style),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Style already exists")
    ),
    tag = "styles"
)]
pub async fn create_style(
    State(db): State<Database>,
    Json(req): Json<CreateStyleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let style = services::create_style(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(style)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes/{athlete_id}/styles",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    request_body = RegisterStyleRequest,
    responses(
        (status = 200, description = "Registration recorded; a first registration seeds the rating", body = StyleRegistration),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Athlete or style not found")
    ),
    tag = "styles"
)]
pub async fn register_style(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
    Json(req): Json<RegisterStyleRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = services::register_style(&db, athlete_id, req.style_id).await?;

    Ok(Json(registration).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes/{athlete_id}/styles/batch",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    request_body = RegisterStylesRequest,
    responses(
        (status = 200, description = "All registrations recorded", body = Vec<StyleRegistration>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Athlete or a style not found")
    ),
    tag = "styles"
)]
pub async fn register_styles(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
    Json(req): Json<RegisterStylesRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registrations = services::register_styles(&db, athlete_id, &req.style_ids).await?;

    Ok(Json(registrations).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/common-styles/{other_id}",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID"),
        ("other_id" = i32, Path, description = "Other athlete ID")
    ),
    responses(
        (status = 200, description = "Styles both athletes are registered to", body = Vec<Style>)
    ),
    tag = "styles"
)]
pub async fn common_styles(
    State(db): State<Database>,
    Path((athlete_id, other_id)): Path<(i32, i32)>,
) -> Result<Response, WebError> {
    let styles = services::common_styles(db.pool(), athlete_id, other_id).await?;

    Ok(Json(styles).into_response())
}
