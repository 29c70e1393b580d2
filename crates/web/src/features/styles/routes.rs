use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{common_styles, create_style, list_styles, register_style, register_styles};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/styles", get(list_styles).post(create_style))
        .route("/athletes/:athlete_id/styles", post(register_style))
        .route("/athletes/:athlete_id/styles/batch", post(register_styles))
        .route(
            "/athletes/:athlete_id/common-styles/:other_id",
            get(common_styles),
        )
}
