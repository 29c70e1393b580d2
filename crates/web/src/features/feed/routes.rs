use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_feed;

pub fn routes() -> Router<Database> {
    Router::new().route("/athletes/:athlete_id/feed", get(get_feed))
}
