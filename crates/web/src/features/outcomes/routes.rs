use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_outcome, get_outcome, list_outcomes};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/outcomes", get(list_outcomes).post(create_outcome))
        .route("/outcomes/:outcome_id", get(get_outcome))
}
