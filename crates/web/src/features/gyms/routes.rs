use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_gym, get_gym, list_gyms};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/gyms", get(list_gyms).post(create_gym))
        .route("/gyms/:gym_id", get(get_gym))
}
