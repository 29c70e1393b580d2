use axum::{
    Router,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{
    authorize, create_athlete, delete_athlete, follow, get_athlete, get_athlete_by_username,
    get_record, list_athletes, list_followed, list_usernames, unfollow, update_athlete,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/athletes", get(list_athletes).post(create_athlete))
        .route("/athletes/usernames", get(list_usernames))
        .route("/athletes/authorize", post(authorize))
        .route("/athletes/follow", post(follow))
        .route("/athletes/by-username/:username", get(get_athlete_by_username))
        .route(
            "/athletes/:athlete_id",
            get(get_athlete).put(update_athlete).delete(delete_athlete),
        )
        .route("/athletes/:athlete_id/record", get(get_record))
        .route("/athletes/:athlete_id/following", get(list_followed))
        .route("/athletes/:athlete_id/following/:followed_id", delete(unfollow))
}
