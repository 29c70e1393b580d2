use storage::{
    Database,
    dto::{
        bout::{BoutResponse, CreateBoutRequest, UpdateBoutRequest},
        outcome::RecordBoutOutcomeRequest,
    },
    error::Result,
    models::{Bout, Outcome},
    services::{bouts, outcomes},
};

pub async fn list_bouts(db: &Database) -> Result<Vec<BoutResponse>> {
    bouts::list(db).await
}

pub async fn get_bout(db: &Database, bout_id: i32) -> Result<BoutResponse> {
    bouts::get(db, bout_id).await
}

pub async fn create_bout(db: &Database, request: &CreateBoutRequest) -> Result<Bout> {
    bouts::create(db, request.challenger_id, request.acceptor_id, request.style_id).await
}

pub async fn update_bout(db: &Database, bout_id: i32, request: &UpdateBoutRequest) -> Result<Bout> {
    bouts::update(
        db,
        bout_id,
        request.challenger_id,
        request.acceptor_id,
        request.style_id,
    )
    .await
}

pub async fn delete_bout(db: &Database, bout_id: i32) -> Result<()> {
    bouts::delete(db, bout_id).await
}

pub async fn accept_bout(db: &Database, bout_id: i32) -> Result<Bout> {
    bouts::accept(db, bout_id).await
}

pub async fn decline_bout(db: &Database, bout_id: i32) -> Result<Bout> {
    bouts::decline(db, bout_id).await
}

pub async fn complete_bout(db: &Database, bout_id: i32, referee_id: i32) -> Result<Bout> {
    bouts::complete(db, bout_id, referee_id).await
}

pub async fn cancel_bout(db: &Database, bout_id: i32, challenger_id: i32) -> Result<Bout> {
    bouts::cancel(db, bout_id, challenger_id).await
}

pub async fn pending_bouts(db: &Database, athlete_id: i32) -> Result<Vec<BoutResponse>> {
    bouts::get_pending(db, athlete_id).await
}

pub async fn incomplete_bouts(db: &Database, athlete_id: i32) -> Result<Vec<BoutResponse>> {
    bouts::get_incomplete(db, athlete_id).await
}

pub async fn get_bout_outcome(db: &Database, bout_id: i32) -> Result<Outcome> {
    outcomes::get_by_bout_id(db, bout_id).await
}

/// Record the result of an accepted bout and complete it
pub async fn record_bout_outcome(
    db: &Database,
    bout_id: i32,
    request: &RecordBoutOutcomeRequest,
) -> Result<Outcome> {
    outcomes::create_for_bout(db, bout_id, request).await
}
