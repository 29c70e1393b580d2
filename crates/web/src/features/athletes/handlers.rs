use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::athlete::{
        AthleteResponse, AuthorizeRequest, AuthorizeResponse, CreateAthleteRequest,
        FollowRequest, UpdateAthleteRequest,
    },
    models::{Follow, Record},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes",
    responses(
        (status = 200, description = "List all athletes successfully", body = Vec<AthleteResponse>)
    ),
    tag = "athletes"
)]
pub async fn list_athletes(State(db): State<Database>) -> Result<Response, WebError> {
    let athletes = services::list_athletes(db.pool()).await?;

    let response: Vec<AthleteResponse> = athletes.into_iter().map(AthleteResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/usernames",
    responses(
        (status = 200, description = "Every registered username", body = Vec<String>)
    ),
    tag = "athletes"
)]
pub async fn list_usernames(State(db): State<Database>) -> Result<Response, WebError> {
    let usernames = services::list_usernames(db.pool()).await?;

    Ok(Json(usernames).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(db.pool(), athlete_id).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/by-username/{username}",
    params(
        ("username" = String, Path, description = "Athlete username")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete_by_username(
    State(db): State<Database>,
    Path(username): Path<String>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete_by_username(db.pool(), &username).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    ),
    tag = "athletes"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    Json(req): Json<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::create_athlete(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(AthleteResponse::from(athlete))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/athletes/{athlete_id}",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Athlete not found"),
        (status = 409, description = "Username already taken")
    ),
    tag = "athletes"
)]
pub async fn update_athlete(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
    Json(update_req): Json<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(db.pool(), athlete_id, &update_req).await?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/athletes/{athlete_id}",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found"),
        (status = 409, description = "Athlete is still referenced by bouts or outcomes")
    ),
    tag = "athletes"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    services::delete_athlete(db.pool(), athlete_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/record",
    params(
        ("athlete_id" = i32, Path, description = "Athlete ID")
    ),
    responses(
        (status = 200, description = "Win/loss/draw record", body = Record),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_record(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    let record = services::get_record(db.pool(), athlete_id).await?;

    Ok(Json(record).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes/authorize",
    request_body = AuthorizeRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthorizeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unknown username or wrong password")
    ),
    tag = "athletes"
)]
pub async fn authorize(
    State(db): State<Database>,
    Json(req): Json<AuthorizeRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete_id = services::authorize(&db, &req.username, &req.password)
        .await?
        .ok_or(WebError::Unauthorized)?;

    Ok(Json(AuthorizeResponse {
        authorized: true,
        athlete_id,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes/follow",
    request_body = FollowRequest,
    responses(
        (status = 201, description = "Now following", body = Follow),
        (status = 400, description = "Validation error or self-follow"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn follow(
    State(db): State<Database>,
    Json(req): Json<FollowRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let follow = services::follow(db.pool(), req.follower_id, req.followed_id).await?;

    Ok((StatusCode::CREATED, Json(follow)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{athlete_id}/following",
    params(
        ("athlete_id" = i32, Path, description = "Follower athlete ID")
    ),
    responses(
        (status = 200, description = "IDs of followed athletes", body = Vec<i32>)
    ),
    tag = "athletes"
)]
pub async fn list_followed(
    State(db): State<Database>,
    Path(athlete_id): Path<i32>,
) -> Result<Response, WebError> {
    let followed = services::list_followed(db.pool(), athlete_id).await?;

    Ok(Json(followed).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/athletes/{athlete_id}/following/{followed_id}",
    params(
        ("athlete_id" = i32, Path, description = "Follower athlete ID"),
        ("followed_id" = i32, Path, description = "Followed athlete ID")
    ),
    responses(
        (status = 204, description = "Unfollowed"),
        (status = 404, description = "Not following")
    ),
    tag = "athletes"
)]
pub async fn unfollow(
    State(db): State<Database>,
    Path((athlete_id, followed_id)): Path<(i32, i32)>,
) -> Result<Response, WebError> {
    services::unfollow(db.pool(), athlete_id, followed_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
