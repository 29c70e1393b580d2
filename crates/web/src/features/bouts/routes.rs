use axum::{
    Router,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{
    accept_bout, cancel_bout, complete_bout, create_bout, decline_bout, delete_bout, get_bout,
    get_bout_outcome, incomplete_bouts, list_bouts, pending_bouts, record_bout_outcome,
    update_bout,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/bouts", get(list_bouts).post(create_bout))
        .route("/bouts/pending/:athlete_id", get(pending_bouts))
        .route("/bouts/incomplete/:athlete_id", get(incomplete_bouts))
        .route(
            "/bouts/:bout_id",
            get(get_bout).put(update_bout).delete(delete_bout),
        )
        .route("/bouts/:bout_id/accept", put(accept_bout))
        .route("/bouts/:bout_id/decline", put(decline_bout))
        .route("/bouts/:bout_id/complete/:referee_id", put(complete_bout))
        .route("/bouts/:bout_id/cancel/:challenger_id", put(cancel_bout))
        .route(
            "/bouts/:bout_id/outcome",
            get(get_bout_outcome).post(record_bout_outcome),
        )
}
