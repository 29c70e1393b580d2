use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{current_score, current_scores, score_history};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/athletes/:athlete_id/scores", get(current_scores))
        .route("/athletes/:athlete_id/scores/:style_id", get(current_score))
        .route(
            "/athletes/:athlete_id/scores/:style_id/history",
            get(score_history),
        )
}
