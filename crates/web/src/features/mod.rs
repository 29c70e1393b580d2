use axum::Router;
use storage::Database;

pub mod athletes;
pub mod bouts;
pub mod feed;
pub mod gyms;
pub mod outcomes;
pub mod scores;
pub mod styles;

/// Every collection's routes, relative to `/api`.
pub fn router() -> Router<Database> {
    Router::new()
        .merge(athletes::routes::routes())
        .merge(bouts::routes::routes())
        .merge(outcomes::routes::routes())
        .merge(styles::routes::routes())
        .merge(scores::routes::routes())
        .merge(gyms::routes::routes())
        .merge(feed::routes::routes())
}
