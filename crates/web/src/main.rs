use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;
use features::{athletes, bouts, feed, gyms, outcomes, scores, styles};

#[derive(OpenApi)]
#[openapi(
    paths(
        athletes::handlers::list_athletes,
        athletes::handlers::list_usernames,
        athletes::handlers::get_athlete,
        athletes::handlers::get_athlete_by_username,
        athletes::handlers::create_athlete,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
        athletes::handlers::get_record,
        athletes::handlers::authorize,
        athletes::handlers::follow,
        athletes::handlers::list_followed,
        athletes::handlers::unfollow,
        bouts::handlers::list_bouts,
        bouts::handlers::get_bout,
        bouts::handlers::create_bout,
        bouts::handlers::update_bout,
        bouts::handlers::delete_bout,
        bouts::handlers::accept_bout,
        bouts::handlers::decline_bout,
        bouts::handlers::complete_bout,
        bouts::handlers::cancel_bout,
        bouts::handlers::pending_bouts,
        bouts::handlers::incomplete_bouts,
        bouts::handlers::get_bout_outcome,
        bouts::handlers::record_bout_outcome,
        outcomes::handlers::list_outcomes,
        outcomes::handlers::get_outcome,
        outcomes::handlers::create_outcome,
        styles::handlers::list_styles,
        styles::handlers::create_style,
        styles::handlers::register_style,
        styles::handlers::register_styles,
        styles::handlers::common_styles,
        scores::handlers::current_scores,
        scores::handlers::current_score,
        scores::handlers::score_history,
        gyms::handlers::list_gyms,
        gyms::handlers::get_gym,
        gyms::handlers::create_gym,
        feed::handlers::get_feed,
    ),
    components(
        schemas(
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AuthorizeRequest,
            storage::dto::athlete::AuthorizeResponse,
            storage::dto::athlete::FollowRequest,
            storage::dto::bout::CreateBoutRequest,
            storage::dto::bout::UpdateBoutRequest,
            storage::dto::bout::BoutResponse,
            storage::dto::bout::BoutParticipant,
            storage::dto::outcome::CreateOutcomeRequest,
            storage::dto::outcome::RecordBoutOutcomeRequest,
            storage::dto::style::CreateStyleRequest,
            storage::dto::style::RegisterStyleRequest,
            storage::dto::style::RegisterStylesRequest,
            storage::dto::style::StyleRegistration,
            storage::dto::score::CurrentScore,
            storage::dto::score::ScoreHistoryEntry,
            storage::dto::score::ScoreHistoryResponse,
            storage::dto::gym::CreateGymRequest,
            storage::dto::feed::FeedEntry,
            storage::models::Bout,
            storage::models::BoutState,
            storage::models::Outcome,
            storage::models::Record,
            storage::models::Style,
            storage::models::Gym,
            storage::models::Follow,
            storage::models::AthleteScore,
        )
    ),
    tags(
        (name = "athletes", description = "Athlete profiles, credentials and following"),
        (name = "bouts", description = "Bout challenges and their lifecycle"),
        (name = "outcomes", description = "Match results"),
        (name = "styles", description = "Fighting styles and registrations"),
        (name = "scores", description = "Per-style ratings"),
        (name = "gyms", description = "Gyms"),
        (name = "feed", description = "Completed bouts timeline"),
    )
)]
struct ApiDoc;

/// Full application: API routes, docs and the HTTP middleware stack.
pub fn app(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api", features::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Ronin API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::connect(&config.database_url, config.pool_settings())
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("Starting server at http://{}", bind_address);

    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(db))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
