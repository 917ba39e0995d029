use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod services;
mod store;

#[cfg(test)]
mod tests;

use config::Config;
use store::draft::DraftStore;
use store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub drafts: DraftStore,
    pub config: Arc<Config>,
    pub rate_limiter: auth::rate_limit::RateLimitState,
}

/// Full application router. Kept separate from `main` so tests can drive it
/// in-process against synthetic state.
pub fn build_router(state: AppState) -> Router {
    // Login is rate limited per IP; everything else public is read-only.
    let auth_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // Mood tracking
        .route("/api/mood", post(handlers::mood::create_mood_entry))
        .route("/api/mood", get(handlers::mood::list_mood_entries))
        .route("/api/mood/sparkline", get(handlers::mood::get_sparkline))
        .route("/api/mood/summary", get(handlers::mood::get_mood_summary))
        // CBT records
        .route("/api/thoughts", post(handlers::records::create_thought_record))
        .route("/api/thoughts", get(handlers::records::list_thought_records))
        .route(
            "/api/behaviors",
            post(handlers::records::create_behavior_record),
        )
        .route(
            "/api/behaviors",
            get(handlers::records::list_behavior_records),
        )
        .route(
            "/api/behaviors/:id/activities/:activity_id/check",
            post(handlers::records::check_activity),
        )
        .route("/api/archive", get(handlers::archive::get_archive))
        // PHQ-9
        .route("/api/surveys/phq9", post(handlers::surveys::submit_phq9))
        .route("/api/surveys/phq9", get(handlers::surveys::list_phq9_surveys))
        // Weekly reports
        .route("/api/reports", get(handlers::reports::list_reports))
        .route("/api/reports/:id", get(handlers::reports::get_report_detail))
        .route(
            "/api/reports/:id/viewed",
            post(handlers::reports::mark_report_viewed),
        )
        // Alerts
        .route("/api/alerts", get(handlers::alerts::get_alerts))
        .route(
            "/api/alerts/phq9/dismiss",
            post(handlers::alerts::dismiss_phq9_alert),
        )
        .route(
            "/api/alerts/report/dismiss",
            post(handlers::alerts::dismiss_report_alert),
        )
        // Community
        .route("/api/community/posts", get(handlers::community::list_posts))
        .route("/api/community/posts", post(handlers::community::create_post))
        .route(
            "/api/community/posts/:id/like",
            post(handlers::community::toggle_like),
        )
        .route(
            "/api/community/posts/:id",
            delete(handlers::community::delete_post),
        )
        .route(
            "/api/community/posts/:id/flag",
            post(handlers::community::flag_post),
        )
        .route("/api/community/blocks", post(handlers::community::block_user))
        // Draft (single persisted key)
        .route("/api/draft", get(handlers::drafts::get_draft))
        .route("/api/draft", put(handlers::drafts::save_draft))
        .route("/api/draft", delete(handlers::drafts::clear_draft))
        // Data export
        .route("/api/export", post(handlers::export::export_data))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .unwrap(),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solar_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let store = Store::new();
    if config.seed_data {
        store::seed::seed(&store, Utc::now())
            .await
            .expect("Failed to seed mock dataset");
    }

    // The draft file is read exactly once, here.
    let drafts = DraftStore::load(&config.draft_path);

    let state = AppState {
        store,
        drafts,
        config: config.clone(),
        rate_limiter: auth::rate_limit::RateLimitState::new(),
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    // Use into_make_service_with_connect_info to provide client IP for rate limiting
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .unwrap();
}
