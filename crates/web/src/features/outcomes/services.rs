use storage::{
    Database, dto::outcome::CreateOutcomeRequest, error::Result, models::Outcome,
    services::outcomes,
};

pub async fn list_outcomes(db: &Database) -> Result<Vec<Outcome>> {
    outcomes::get_all(db).await
}

pub async fn get_outcome(db: &Database, outcome_id: i32) -> Result<Outcome> {
    outcomes::get_by_id(db, outcome_id).await
}

pub async fn create_outcome(db: &Database, request: &CreateOutcomeRequest) -> Result<Outcome> {
    outcomes::create(db, request).await
}
